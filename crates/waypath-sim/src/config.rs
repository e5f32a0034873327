//! Simulation parameters and simulator selection.

use waypath_core::Point;
use waypath_sensor::{SensorConfig, SensorModel};

use crate::decoder::ActionDecoder;
use crate::error::SimulationError;
use crate::feed_forward::FeedForwardSimulator;
use crate::recurrent::RecurrentSimulator;
use crate::simulator::PathSimulator;

// ── SimulationConfig ────────────────────────────────────────────

/// Parameters shared by both simulator variants.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationConfig {
    /// Distance covered by a full-scale action. Default: 8.
    pub step_length: f64,
    /// Fixed first move from the origin, taken before the policy is
    /// consulted. Default: `(3, 3)`. A zero lead-in starts stepping from
    /// the origin itself.
    pub lead_in: Point,
    /// Policy-driven steps before the run is cut off. Default: 249.
    pub max_steps: usize,
    /// The run ends once the agent is strictly closer than this to the
    /// destination. Default: 30 (feed-forward), 50 (recurrent).
    pub termination_radius: f64,
    /// How raw policy outputs become a displacement.
    pub decoder: ActionDecoder,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::feed_forward()
    }
}

impl SimulationConfig {
    /// Parameters tuned for the stateless variant.
    pub fn feed_forward() -> Self {
        Self {
            step_length: 8.0,
            lead_in: Point::new(3.0, 3.0),
            max_steps: 249,
            termination_radius: 30.0,
            decoder: ActionDecoder::default(),
        }
    }

    /// Parameters tuned for the stateful variant.
    pub fn recurrent() -> Self {
        Self {
            termination_radius: 50.0,
            ..Self::feed_forward()
        }
    }

    /// Check every parameter is usable.
    pub fn validate(&self) -> Result<(), SimulationError> {
        // 1. Step length must be finite and positive.
        if !self.step_length.is_finite() || self.step_length <= 0.0 {
            return Err(SimulationError::InvalidConfig {
                reason: format!(
                    "step_length must be finite and positive, got {}",
                    self.step_length
                ),
            });
        }
        // 2. Lead-in must be finite.
        if !self.lead_in.is_finite() {
            return Err(SimulationError::InvalidConfig {
                reason: format!("lead_in must be finite, got {}", self.lead_in),
            });
        }
        // 3. Termination radius must be finite and non-negative.
        if !self.termination_radius.is_finite() || self.termination_radius < 0.0 {
            return Err(SimulationError::InvalidConfig {
                reason: format!(
                    "termination_radius must be finite and non-negative, got {}",
                    self.termination_radius
                ),
            });
        }
        // 4. Decoder range.
        self.decoder.validate()
    }

    /// Upper bound on the number of waypoints a run can produce.
    pub fn max_waypoints(&self) -> usize {
        self.max_steps + 2
    }
}

// ── RecurrentConfig ─────────────────────────────────────────────

/// Neighbourhood parameters for the stateful variant.
#[derive(Clone, Debug, PartialEq)]
pub struct RecurrentConfig {
    /// Nearest obstacles fed to the policy each step. Default: 10.
    pub neighbour_count: usize,
    /// Optional cut-off: obstacles at or beyond this distance are not
    /// fed. Default: `None` (every one of the nearest is fed).
    pub neighbour_radius: Option<f64>,
}

impl Default for RecurrentConfig {
    fn default() -> Self {
        Self {
            neighbour_count: 10,
            neighbour_radius: None,
        }
    }
}

impl RecurrentConfig {
    /// Check the neighbourhood parameters.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if let Some(r) = self.neighbour_radius {
            if !r.is_finite() || r < 0.0 {
                return Err(SimulationError::InvalidConfig {
                    reason: format!("neighbour_radius must be finite and non-negative, got {r}"),
                });
            }
        }
        Ok(())
    }
}

// ── SimulatorKind ───────────────────────────────────────────────

/// Which simulator variant to build.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SimulatorKind {
    /// One activation per step; see [`FeedForwardSimulator`].
    #[default]
    FeedForward,
    /// One activation per nearby obstacle; see [`RecurrentSimulator`].
    Recurrent,
}

impl SimulatorKind {
    /// Construct the selected simulator.
    pub fn build(
        self,
        simulation: SimulationConfig,
        sensor: SensorConfig,
        recurrent: RecurrentConfig,
    ) -> Result<Box<dyn PathSimulator>, SimulationError> {
        let sensor = SensorModel::new(sensor)?;
        Ok(match self {
            Self::FeedForward => Box::new(FeedForwardSimulator::new(simulation, sensor)?),
            Self::Recurrent => Box::new(RecurrentSimulator::new(simulation, sensor, recurrent)?),
        })
    }
}
