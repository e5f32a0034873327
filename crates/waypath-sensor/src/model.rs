//! [`SensorModel`]: builds the policy input vector for one step.
//!
//! # Aggregate layout
//!
//! | Slice | Contents |
//! |-------|----------|
//! | `[0..2]` | destination − current |
//! | `[2..4]` | current (absolute) |
//! | `[4..4+2n]` | obstacle center − current, nearest first, `n ≤ obstacle_slots` |
//! | rest | padding pair `current − (margin, margin)` per unused slot |
//!
//! Every component is divided by `input_scale`.
//!
//! # Single-obstacle layout
//!
//! Used by stateful policies that are fed one obstacle per activation:
//! `[destination − current, current, obstacle center − current]`, six
//! components, same scaling.

use waypath_core::{Obstacle, Point};

use crate::error::SensorError;

/// Components before the first obstacle slot.
pub const HEADER_LEN: usize = 4;

/// Length of a single-obstacle vector.
pub const SINGLE_LEN: usize = HEADER_LEN + 2;

/// Tunable sensor layout parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct SensorConfig {
    /// Obstacle offset pairs in the aggregate vector. Default: 5.
    pub obstacle_slots: usize,
    /// Obstacles at or beyond this distance are not sensed. Default: 30.
    pub detection_radius: f64,
    /// Shift applied to the current position to form a padding pair.
    /// Default: 30.
    pub padding_margin: f64,
    /// Every component is divided by this. Default: 1 (raw coordinates).
    pub input_scale: f64,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            obstacle_slots: 5,
            detection_radius: 30.0,
            padding_margin: 30.0,
            input_scale: 1.0,
        }
    }
}

impl SensorConfig {
    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), SensorError> {
        if self.obstacle_slots == 0 {
            return Err(SensorError::NoObstacleSlots);
        }
        for (name, value) in [
            ("detection_radius", self.detection_radius),
            ("padding_margin", self.padding_margin),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(SensorError::InvalidDistance { name, value });
            }
        }
        if !self.input_scale.is_finite() || self.input_scale <= 0.0 {
            return Err(SensorError::InvalidScale {
                value: self.input_scale,
            });
        }
        Ok(())
    }

    /// Length of the aggregate vector for this layout.
    pub fn aggregate_len(&self) -> usize {
        HEADER_LEN + 2 * self.obstacle_slots
    }
}

/// Builds sensor vectors for a validated [`SensorConfig`].
#[derive(Clone, Debug)]
pub struct SensorModel {
    config: SensorConfig,
}

impl SensorModel {
    /// Create a model, validating the layout.
    pub fn new(config: SensorConfig) -> Result<Self, SensorError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The layout parameters.
    pub fn config(&self) -> &SensorConfig {
        &self.config
    }

    /// Exact length of every aggregate vector this model produces.
    pub fn aggregate_len(&self) -> usize {
        self.config.aggregate_len()
    }

    /// Fill `out` with the aggregate vector.
    ///
    /// `nearby` should be sorted nearest first; obstacles at or beyond
    /// `detection_radius` are skipped and at most `obstacle_slots` are
    /// used. Returns the number of obstacles written.
    pub fn fill_aggregate(
        &self,
        current: Point,
        destination: Point,
        nearby: &[Obstacle],
        out: &mut [f64],
    ) -> Result<usize, SensorError> {
        let expected = self.aggregate_len();
        if out.len() != expected {
            return Err(SensorError::LengthMismatch {
                expected,
                actual: out.len(),
            });
        }
        Ok(self.write_aggregate(current, destination, nearby, out))
    }

    /// Allocate and return the aggregate vector.
    pub fn build_vector(
        &self,
        current: Point,
        destination: Point,
        nearby: &[Obstacle],
    ) -> Vec<f64> {
        let mut out = vec![0.0; self.aggregate_len()];
        self.write_aggregate(current, destination, nearby, &mut out);
        out
    }

    /// `out` must be exactly `aggregate_len()` long.
    fn write_aggregate(
        &self,
        current: Point,
        destination: Point,
        nearby: &[Obstacle],
        out: &mut [f64],
    ) -> usize {
        let scale = self.config.input_scale;
        write_header(current, destination, scale, out);

        let sensed = nearby
            .iter()
            .filter(|o| o.center.distance(current) < self.config.detection_radius)
            .take(self.config.obstacle_slots);
        let mut used = 0;
        for (slot, o) in out[HEADER_LEN..].chunks_exact_mut(2).zip(sensed) {
            let d = o.center - current;
            slot[0] = d.x / scale;
            slot[1] = d.y / scale;
            used += 1;
        }

        let pad = current - Point::new(self.config.padding_margin, self.config.padding_margin);
        for slot in out[HEADER_LEN + 2 * used..].chunks_exact_mut(2) {
            slot[0] = pad.x / scale;
            slot[1] = pad.y / scale;
        }
        used
    }

    /// The six-component vector describing one obstacle.
    pub fn single_vector(
        &self,
        current: Point,
        destination: Point,
        obstacle: &Obstacle,
    ) -> [f64; SINGLE_LEN] {
        let scale = self.config.input_scale;
        let mut out = [0.0; SINGLE_LEN];
        write_header(current, destination, scale, &mut out);
        let d = obstacle.center - current;
        out[HEADER_LEN] = d.x / scale;
        out[HEADER_LEN + 1] = d.y / scale;
        out
    }
}

fn write_header(current: Point, destination: Point, scale: f64, out: &mut [f64]) {
    let to_dest = destination - current;
    out[0] = to_dest.x / scale;
    out[1] = to_dest.y / scale;
    out[2] = current.x / scale;
    out[3] = current.y / scale;
}
