//! Error types for fitness scoring.

use thiserror::Error;
use waypath_space::SpaceError;

/// Errors from configuring or running a [`FitnessScorer`](crate::FitnessScorer).
#[derive(Clone, Debug, PartialEq, Error)]
pub enum FitnessError {
    /// A scoring constant is out of range.
    #[error("invalid fitness config: {reason}")]
    InvalidConfig {
        /// Which invariant was violated.
        reason: String,
    },
    /// The arithmetic overflowed or produced NaN.
    #[error("fitness is not finite: {value}")]
    NonFiniteFitness {
        /// The offending result.
        value: f64,
    },
    /// A nearest-obstacle query failed.
    #[error("spatial query: {0}")]
    Space(#[from] SpaceError),
}
