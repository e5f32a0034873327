//! Error types for spatial queries and cache configuration.

use thiserror::Error;
use waypath_core::Point;

/// Errors arising from index construction or nearest-neighbour queries.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum SpaceError {
    /// A query point has a NaN or infinite coordinate.
    #[error("query point {point} is not finite")]
    NonFinitePoint {
        /// The offending point.
        point: Point,
    },
    /// The cache must be able to hold at least one entry.
    #[error("cache capacity must be at least 1")]
    ZeroCapacity,
    /// The quantization step must be finite and strictly positive.
    #[error("cache resolution must be finite and positive, got {value}")]
    InvalidResolution {
        /// The configured resolution.
        value: f64,
    },
    /// A quantized coordinate does not fit the cache key.
    #[error("query point {point} is too far from the origin to quantize")]
    QuantizationOverflow {
        /// The offending point.
        point: Point,
    },
}
