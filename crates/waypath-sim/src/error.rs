//! Error types for path simulation.

use thiserror::Error;
use waypath_sensor::SensorError;
use waypath_space::SpaceError;

/// Fatal errors from a simulation run or simulator construction.
///
/// Every variant except the wrapped spatial error points at a
/// configuration mismatch between the sensor layout and the policy, so
/// the run is aborted rather than patched up.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum SimulationError {
    /// The policy returned an action vector of the wrong width.
    #[error("policy returned {actual} outputs, expected {expected}")]
    OutputLength {
        /// Required action width.
        expected: usize,
        /// Width actually returned.
        actual: usize,
    },
    /// The policy declares an input width the sensor layout does not produce.
    #[error("policy expects {declared} inputs, sensor layout produces {expected}")]
    InputLength {
        /// Sensor layout width.
        expected: usize,
        /// Width declared by the policy.
        declared: usize,
    },
    /// The policy returned NaN or infinity.
    #[error("policy returned non-finite output {value} at step {step}")]
    NonFiniteOutput {
        /// Step index (0-based, after the lead-in).
        step: usize,
        /// The offending value.
        value: f64,
    },
    /// A waypoint overflowed to infinity.
    #[error("waypoint at step {step} is not finite")]
    NonFiniteWaypoint {
        /// Step index (0-based, after the lead-in).
        step: usize,
    },
    /// A simulation parameter is out of range.
    #[error("invalid simulation config: {reason}")]
    InvalidConfig {
        /// Which invariant was violated.
        reason: String,
    },
    /// The sensor layout is invalid.
    #[error("sensor: {0}")]
    Sensor(#[from] SensorError),
    /// A nearest-obstacle query failed.
    #[error("spatial query: {0}")]
    Space(#[from] SpaceError),
}
