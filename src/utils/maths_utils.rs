use argminmax::ArgMinMax;

/// Closed numeric interval on one plot axis.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct Extent {
    pub min: f64,
    pub max: f64,
}

impl Extent {
    pub fn new(a: f64, b: f64) -> Self {
        if a <= b {
            Self { min: a, max: b }
        } else {
            Self { min: b, max: a }
        }
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    #[inline]
    pub fn center(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    /// Grows a degenerate (zero width) extent so it can be plotted and zoomed.
    pub fn non_degenerate(&self) -> Extent {
        if self.width() > f64::EPSILON {
            return *self;
        }
        let pad = (self.center().abs() * 0.01).max(0.5);
        Extent {
            min: self.min - pad,
            max: self.max + pad,
        }
    }
}

/// Min/max of the finite values in `values`, or `None` when there are none.
pub fn finite_extent(values: &[f64]) -> Option<Extent> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        return None;
    }
    let (min_index, max_index) = finite.argminmax();
    Some(Extent::new(finite[min_index], finite[max_index]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extent_ignores_non_finite_values() {
        let extent = finite_extent(&[f64::NAN, 3.0, -1.5, f64::INFINITY, 2.0]).unwrap();
        assert_eq!(extent, Extent::new(-1.5, 3.0));
    }

    #[test]
    fn extent_of_nothing_is_none() {
        assert!(finite_extent(&[]).is_none());
        assert!(finite_extent(&[f64::NAN]).is_none());
    }

    #[test]
    fn degenerate_extent_gets_padding() {
        let flat = Extent::new(0.02, 0.02).non_degenerate();
        assert!(flat.width() > 0.0);
        assert!(flat.min < 0.02 && flat.max > 0.02);
    }
}
