//! [`FitnessScorer`]: path → scalar fitness.
//!
//! ```text
//! proximity = Σ over in-bounds waypoints of
//!             waypoint_weight · (geomean(distances) · proximity_scale + proximity_offset)
//! fitness   = proximity
//!           · (1 / (1 + gap · gap_scale))^gap_exponent
//!           · (1 + |length − straight_line|)^(−length_exponent)
//! ```
//!
//! `distances` are the distances from the waypoint to its nearest
//! obstacles, filtered by `proximity_radius` and clamped by
//! `distance_cap`. An empty set uses `empty_baseline` in place of the
//! geometric mean.

use waypath_core::{Course, Path, Point};
use waypath_space::SpatialIndex;

use crate::config::FitnessConfig;
use crate::error::FitnessError;

/// Every intermediate of one score, for logging and tests.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitnessBreakdown {
    /// Accumulated proximity reward.
    pub proximity: f64,
    /// Waypoints that fell inside the bounds and were scored.
    pub counted: usize,
    /// Sum of consecutive waypoint distances.
    pub path_length: f64,
    /// `1 + |path_length − straight_line|`.
    pub length_penalty: f64,
    /// Distance from the last waypoint to the destination.
    pub gap: f64,
    /// Final score.
    pub fitness: f64,
}

/// Scores finished paths.
///
/// Stateless apart from its constants; the caller supplies the
/// [`SpatialIndex`] so that nearest-obstacle answers cached during the
/// simulation are reused here.
#[derive(Clone, Debug)]
pub struct FitnessScorer {
    config: FitnessConfig,
}

impl FitnessScorer {
    /// Create a scorer, validating the constants.
    pub fn new(config: FitnessConfig) -> Result<Self, FitnessError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The scoring constants.
    pub fn config(&self) -> &FitnessConfig {
        &self.config
    }

    /// Score `path` on `course`.
    ///
    /// Any finite path yields a finite score; only arithmetic overflow is
    /// reported as [`FitnessError::NonFiniteFitness`].
    pub fn score(
        &self,
        path: &Path,
        index: &mut SpatialIndex,
        course: &Course,
    ) -> Result<FitnessBreakdown, FitnessError> {
        let c = &self.config;

        let mut proximity = 0.0;
        let mut counted = 0;
        for &waypoint in path.iter().filter(|&&p| course.bounds.contains(p)) {
            let mean = self.waypoint_mean(waypoint, index)?;
            proximity += c.waypoint_weight * (mean * c.proximity_scale + c.proximity_offset);
            counted += 1;
        }

        let path_length = path.length();
        let length_penalty = 1.0 + (path_length - course.straight_line()).abs();
        let gap = path.last().distance(course.destination);
        let gap_term = 1.0 / (1.0 + gap * c.gap_scale);

        let fitness =
            proximity * gap_term.powf(c.gap_exponent) * length_penalty.powf(-c.length_exponent);
        if !fitness.is_finite() {
            return Err(FitnessError::NonFiniteFitness { value: fitness });
        }

        Ok(FitnessBreakdown {
            proximity,
            counted,
            path_length,
            length_penalty,
            gap,
            fitness,
        })
    }

    /// Geometric mean of the counted obstacle distances, or the baseline.
    fn waypoint_mean(
        &self,
        waypoint: Point,
        index: &mut SpatialIndex,
    ) -> Result<f64, FitnessError> {
        let c = &self.config;
        let nearby = index.nearest(waypoint, c.neighbour_count)?;

        let mut log_sum = 0.0;
        let mut n = 0usize;
        for o in nearby.iter() {
            let d = o.center.distance(waypoint);
            if c.proximity_radius.is_some_and(|r| d >= r) {
                continue;
            }
            let d = c.distance_cap.map_or(d, |cap| d.min(cap));
            if d == 0.0 {
                // One zero factor makes the whole product zero.
                return Ok(0.0);
            }
            log_sum += d.ln();
            n += 1;
        }

        Ok(if n == 0 {
            c.empty_baseline
        } else {
            (log_sum / n as f64).exp()
        })
    }
}
