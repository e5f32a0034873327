//! Turning raw policy outputs into a displacement.

use waypath_core::Point;

use crate::error::SimulationError;

/// Number of outputs a policy must return: one per axis.
pub const ACTION_LEN: usize = 2;

/// Linear remap from the policy's native output range to `[-1, 1]`.
///
/// With the default `[0, 1]` range (a sigmoid output layer) an output of
/// `0.5` means "stay", `1.0` a full step forward and `0.0` a full step
/// back on that axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActionDecoder {
    /// Output value mapped to `-1`. Default: 0.
    pub output_min: f64,
    /// Output value mapped to `+1`. Default: 1.
    pub output_max: f64,
}

impl Default for ActionDecoder {
    fn default() -> Self {
        Self {
            output_min: 0.0,
            output_max: 1.0,
        }
    }
}

impl ActionDecoder {
    /// The range must be finite and non-empty.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if !self.output_min.is_finite()
            || !self.output_max.is_finite()
            || self.output_max <= self.output_min
        {
            return Err(SimulationError::InvalidConfig {
                reason: format!(
                    "decoder range [{}, {}] must be finite with max > min",
                    self.output_min, self.output_max
                ),
            });
        }
        Ok(())
    }

    /// Map one output component to `[-1, 1]` (unclamped).
    pub fn unit(&self, v: f64) -> f64 {
        2.0 * (v - self.output_min) / (self.output_max - self.output_min) - 1.0
    }

    /// Decode a full action into a displacement of at most
    /// `step_length` per axis (for in-range outputs).
    ///
    /// `step` is only used to label errors.
    pub fn decode(
        &self,
        outputs: &[f64],
        step_length: f64,
        step: usize,
    ) -> Result<Point, SimulationError> {
        if outputs.len() != ACTION_LEN {
            return Err(SimulationError::OutputLength {
                expected: ACTION_LEN,
                actual: outputs.len(),
            });
        }
        if let Some(&value) = outputs.iter().find(|v| !v.is_finite()) {
            return Err(SimulationError::NonFiniteOutput { step, value });
        }
        Ok(Point::new(
            self.unit(outputs[0]) * step_length,
            self.unit(outputs[1]) * step_length,
        ))
    }
}
