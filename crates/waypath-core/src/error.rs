//! Error types for constructing core values.

use thiserror::Error;

/// Errors raised while assembling an [`ObstacleField`](crate::ObstacleField)
/// or a [`Course`](crate::Course).
#[derive(Clone, Debug, PartialEq, Error)]
pub enum FieldError {
    /// An obstacle center or size is NaN or infinite.
    #[error("obstacle {index} is not finite: center=({x}, {y}), size={size}")]
    NonFiniteObstacle {
        /// Position of the obstacle in insertion order.
        index: usize,
        /// Center x coordinate.
        x: f64,
        /// Center y coordinate.
        y: f64,
        /// Obstacle size.
        size: f64,
    },
    /// An obstacle has a negative size.
    #[error("obstacle {index} has negative size {size}")]
    NegativeSize {
        /// Position of the obstacle in insertion order.
        index: usize,
        /// The offending size.
        size: f64,
    },
    /// Course bounds must be finite and strictly positive.
    #[error("bounds must be finite and positive, got {width}x{height}")]
    InvalidBounds {
        /// Configured width.
        width: f64,
        /// Configured height.
        height: f64,
    },
    /// Course origin or destination is NaN or infinite.
    #[error("course endpoint {which} is not finite")]
    NonFiniteEndpoint {
        /// `"origin"` or `"destination"`.
        which: &'static str,
    },
}
