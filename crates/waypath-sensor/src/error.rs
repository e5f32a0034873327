//! Error types for sensor configuration and vector construction.

use thiserror::Error;

/// Errors from [`SensorConfig::validate`](crate::SensorConfig::validate)
/// or from writing into a wrongly sized buffer.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum SensorError {
    /// The layout must reserve at least one obstacle slot.
    #[error("obstacle_slots must be at least 1")]
    NoObstacleSlots,
    /// A distance parameter is NaN, infinite or negative.
    #[error("{name} must be finite and non-negative, got {value}")]
    InvalidDistance {
        /// Parameter name.
        name: &'static str,
        /// Configured value.
        value: f64,
    },
    /// The input scale is zero, negative or not finite.
    #[error("input_scale must be finite and positive, got {value}")]
    InvalidScale {
        /// Configured value.
        value: f64,
    },
    /// The output buffer does not match the layout length.
    #[error("sensor buffer has {actual} elements, layout needs {expected}")]
    LengthMismatch {
        /// Layout length.
        expected: usize,
        /// Buffer length supplied.
        actual: usize,
    },
}
