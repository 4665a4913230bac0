use crate::config::PLOT_CONFIG;
use crate::utils::maths_utils::Extent;

/// How far the chart may be zoomed and panned, relative to the full data extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomLimits {
    /// 1.0 means the widest view is exactly the data extent
    pub min_scale: f64,
    pub max_scale: f64,
    /// Fraction of the data extent the view may stray past either edge
    pub pan_margin_pct: f64,
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self {
            min_scale: PLOT_CONFIG.min_zoom_scale,
            max_scale: PLOT_CONFIG.max_zoom_scale,
            pan_margin_pct: PLOT_CONFIG.pan_margin_pct,
        }
    }
}

/// Pulls `view` back inside the zoom limits of one axis.
///
/// The width is clamped to `[full / max_scale, full / min_scale]`, keeping the
/// view centre, then the view is shifted so it never leaves the margin around `full`.
pub fn clamp_axis(full: Extent, view: Extent, limits: &ZoomLimits) -> Extent {
    let full = full.non_degenerate();
    let full_width = full.width();

    let max_width = full_width / limits.min_scale.max(f64::EPSILON);
    let min_width = full_width / limits.max_scale.max(limits.min_scale);
    let width = if view.width().is_finite() {
        view.width().clamp(min_width, max_width)
    } else {
        max_width
    };

    let center = if view.center().is_finite() {
        view.center()
    } else {
        full.center()
    };

    let margin = full_width * limits.pan_margin_pct.max(0.0);
    let lowest = full.min - margin;
    let highest = full.max + margin - width;
    let min = (center - width / 2.0).clamp(lowest, highest.max(lowest));

    Extent::new(min, min + width)
}

/// True when `a` and `b` differ by more than floating point noise, relative to `scale`.
pub fn differs(a: Extent, b: Extent, scale: f64) -> bool {
    let tolerance = scale.abs().max(f64::EPSILON) * 1e-9;
    (a.min - b.min).abs() > tolerance || (a.max - b.max).abs() > tolerance
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits() -> ZoomLimits {
        ZoomLimits {
            min_scale: 1.0,
            max_scale: 8.0,
            pan_margin_pct: 0.1,
        }
    }

    #[test]
    fn view_inside_limits_is_untouched() {
        let full = Extent::new(0.0, 100.0);
        let view = Extent::new(20.0, 60.0);
        assert_eq!(clamp_axis(full, view, &limits()), view);
    }

    #[test]
    fn cannot_zoom_out_past_full_extent() {
        let full = Extent::new(0.0, 100.0);
        let clamped = clamp_axis(full, Extent::new(-200.0, 300.0), &limits());
        assert!((clamped.width() - 100.0).abs() < 1e-9);
        assert!(clamped.min >= -10.0 && clamped.max <= 110.0);
    }

    #[test]
    fn cannot_zoom_in_past_max_scale() {
        let full = Extent::new(0.0, 80.0);
        let clamped = clamp_axis(full, Extent::new(40.0, 40.5), &limits());
        assert!((clamped.width() - 10.0).abs() < 1e-9);
        // Centre is kept
        assert!((clamped.center() - 40.25).abs() < 1e-9);
    }

    #[test]
    fn panning_stops_at_the_margin() {
        let full = Extent::new(0.0, 100.0);

        let right = clamp_axis(full, Extent::new(150.0, 200.0), &limits());
        assert!((right.max - 110.0).abs() < 1e-9);
        assert!((right.width() - 50.0).abs() < 1e-9);

        let left = clamp_axis(full, Extent::new(-90.0, -40.0), &limits());
        assert!((left.min + 10.0).abs() < 1e-9);
    }

    #[test]
    fn non_finite_view_falls_back_to_full() {
        let full = Extent::new(0.0, 100.0);
        let view = Extent {
            min: f64::NAN,
            max: f64::NAN,
        };
        let clamped = clamp_axis(full, view, &limits());
        assert!((clamped.width() - 100.0).abs() < 1e-9);
        assert!((clamped.center() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn differs_ignores_noise() {
        let a = Extent::new(0.0, 1.0);
        let b = Extent::new(1e-15, 1.0);
        assert!(!differs(a, b, 1.0));
        assert!(differs(a, Extent::new(0.1, 1.0), 1.0));
    }
}
