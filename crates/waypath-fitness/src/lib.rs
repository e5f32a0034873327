//! Fitness scoring for Waypath.
//!
//! [`FitnessScorer`] turns a finished path into a single scalar: higher is
//! better. The score rewards waypoints that keep their distance from
//! nearby obstacles, penalizes detours relative to the straight line, and
//! penalizes stopping short of the destination.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod scorer;

pub use config::FitnessConfig;
pub use error::FitnessError;
pub use scorer::{FitnessBreakdown, FitnessScorer};
