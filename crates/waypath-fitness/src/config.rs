//! Scoring constants.

use crate::error::FitnessError;

/// Constants for [`FitnessScorer`](crate::FitnessScorer).
///
/// The two presets match the two simulator variants: feed-forward roads
/// only count obstacles inside a small radius, recurrent roads count a
/// wider neighbourhood with capped distances.
#[derive(Clone, Debug, PartialEq)]
pub struct FitnessConfig {
    /// Nearest obstacles considered per waypoint. Default: 5 / 10.
    pub neighbour_count: usize,
    /// Only obstacles strictly closer than this count. Default:
    /// `Some(30.0)` / `None`.
    pub proximity_radius: Option<f64>,
    /// Distances above this are clamped to it. Default: `None` / `Some(100.0)`.
    pub distance_cap: Option<f64>,
    /// Proximity value for a waypoint with no counted obstacle. Default: 1.
    pub empty_baseline: f64,
    /// Multiplier on the geometric-mean distance. Default: 0.033 / 0.01.
    pub proximity_scale: f64,
    /// Added after scaling. Default: 1.
    pub proximity_offset: f64,
    /// Weight of each in-bounds waypoint. Default: 30.
    pub waypoint_weight: f64,
    /// Gap penalty slope: `1 / (1 + gap * gap_scale)`. Default: 0.1.
    pub gap_scale: f64,
    /// Exponent on the gap factor. Default: 0.8.
    pub gap_exponent: f64,
    /// Exponent on the inverse length penalty. Default: 0.8 / 0.7.
    pub length_exponent: f64,
}

impl Default for FitnessConfig {
    fn default() -> Self {
        Self::feed_forward()
    }
}

impl FitnessConfig {
    /// Constants for roads built by the feed-forward simulator.
    pub fn feed_forward() -> Self {
        Self {
            neighbour_count: 5,
            proximity_radius: Some(30.0),
            distance_cap: None,
            empty_baseline: 1.0,
            proximity_scale: 0.033,
            proximity_offset: 1.0,
            waypoint_weight: 30.0,
            gap_scale: 0.1,
            gap_exponent: 0.8,
            length_exponent: 0.8,
        }
    }

    /// Constants for roads built by the recurrent simulator.
    pub fn recurrent() -> Self {
        Self {
            neighbour_count: 10,
            proximity_radius: None,
            distance_cap: Some(100.0),
            proximity_scale: 0.01,
            length_exponent: 0.7,
            ..Self::feed_forward()
        }
    }

    /// Check every constant.
    pub fn validate(&self) -> Result<(), FitnessError> {
        let invalid = |reason: String| -> Result<(), FitnessError> {
            Err(FitnessError::InvalidConfig { reason })
        };

        // 1. Optional distances must be finite and non-negative.
        for (name, value) in [
            ("proximity_radius", self.proximity_radius),
            ("distance_cap", self.distance_cap),
        ] {
            if let Some(v) = value {
                if !v.is_finite() || v < 0.0 {
                    return invalid(format!("{name} must be finite and non-negative, got {v}"));
                }
            }
        }
        // 2. Terms of the per-waypoint sum must be non-negative so that
        //    no valid path scores below zero.
        for (name, value) in [
            ("empty_baseline", self.empty_baseline),
            ("proximity_scale", self.proximity_scale),
            ("proximity_offset", self.proximity_offset),
            ("waypoint_weight", self.waypoint_weight),
        ] {
            if !value.is_finite() || value < 0.0 {
                return invalid(format!("{name} must be finite and non-negative, got {value}"));
            }
        }
        // 3. Exponents must be finite.
        for (name, value) in [
            ("gap_exponent", self.gap_exponent),
            ("length_exponent", self.length_exponent),
        ] {
            if !value.is_finite() {
                return invalid(format!("{name} must be finite, got {value}"));
            }
        }
        // 4. A negative gap slope could divide by zero.
        if !self.gap_scale.is_finite() || self.gap_scale < 0.0 {
            return invalid(format!(
                "gap_scale must be finite and non-negative, got {}",
                self.gap_scale
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_valid() {
        assert!(FitnessConfig::feed_forward().validate().is_ok());
        assert!(FitnessConfig::recurrent().validate().is_ok());
    }

    #[test]
    fn recurrent_preset_differs_where_expected() {
        let ff = FitnessConfig::feed_forward();
        let rec = FitnessConfig::recurrent();
        assert_eq!(rec.neighbour_count, 10);
        assert_eq!(rec.proximity_radius, None);
        assert_eq!(rec.distance_cap, Some(100.0));
        assert_eq!(rec.waypoint_weight, ff.waypoint_weight);
        assert_eq!(rec.gap_exponent, ff.gap_exponent);
    }

    #[test]
    fn rejects_negative_gap_scale() {
        let c = FitnessConfig {
            gap_scale: -0.1,
            ..FitnessConfig::default()
        };
        assert!(matches!(c.validate(), Err(FitnessError::InvalidConfig { .. })));
    }

    #[test]
    fn rejects_terms_that_could_score_below_zero() {
        for c in [
            FitnessConfig {
                proximity_offset: -1.0,
                ..FitnessConfig::default()
            },
            FitnessConfig {
                waypoint_weight: -30.0,
                ..FitnessConfig::default()
            },
            FitnessConfig {
                proximity_scale: -0.01,
                ..FitnessConfig::recurrent()
            },
            FitnessConfig {
                empty_baseline: -1.0,
                ..FitnessConfig::default()
            },
        ] {
            assert!(matches!(c.validate(), Err(FitnessError::InvalidConfig { .. })), "{c:?}");
        }
    }

    #[test]
    fn zero_terms_are_allowed() {
        let c = FitnessConfig {
            proximity_offset: 0.0,
            empty_baseline: 0.0,
            ..FitnessConfig::default()
        };
        assert!(c.validate().is_ok());
    }

    #[test]
    fn rejects_nan_radius() {
        let c = FitnessConfig {
            proximity_radius: Some(f64::NAN),
            ..FitnessConfig::default()
        };
        assert!(c.validate().is_err());
    }
}
