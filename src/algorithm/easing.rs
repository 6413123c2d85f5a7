use serde::{Deserialize, Serialize};

/// Easing law mapping linear progress `t ∈ [0, 1]` to visual progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ZoomEasing {
    Linear,
    EaseIn,
    /// `1 - (1 - t)^3`, decelerating.
    #[default]
    EaseOut,
    EaseInOut,
}

impl ZoomEasing {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            ZoomEasing::Linear => t,
            ZoomEasing::EaseIn => t * t * t,
            ZoomEasing::EaseOut => 1.0 - (1.0 - t).powi(3),
            ZoomEasing::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) * 0.5
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [ZoomEasing; 4] = [
        ZoomEasing::Linear,
        ZoomEasing::EaseIn,
        ZoomEasing::EaseOut,
        ZoomEasing::EaseInOut,
    ];

    #[test]
    fn every_law_hits_both_endpoints_exactly() {
        for easing in ALL {
            assert_eq!(easing.apply(0.0), 0.0, "{easing:?} at 0");
            assert_eq!(easing.apply(1.0), 1.0, "{easing:?} at 1");
        }
    }

    #[test]
    fn ease_out_cubic_matches_closed_form() {
        let eased = ZoomEasing::EaseOut.apply(0.5);
        assert!((eased - 0.875).abs() < 1e-12);
    }

    #[test]
    fn progress_outside_unit_range_is_clamped() {
        assert_eq!(ZoomEasing::EaseOut.apply(-3.0), 0.0);
        assert_eq!(ZoomEasing::EaseOut.apply(4.0), 1.0);
    }

    #[test]
    fn ease_out_is_monotonic() {
        let mut previous = 0.0;
        for step in 1..=100 {
            let eased = ZoomEasing::EaseOut.apply(step as f64 / 100.0);
            assert!(eased >= previous);
            previous = eased;
        }
    }
}
