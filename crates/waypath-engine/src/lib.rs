//! Candidate evaluation and road building for Waypath.
//!
//! [`EvaluationHarness`] is the bridge between an external
//! population-based [`SearchEngine`] and the simulation core: each
//! generation it simulates every candidate on a worker pool, scores the
//! resulting path, and returns a [`FitnessTable`]. [`RoadBuilder`] drives
//! one full search and writes the winner's path into a [`ForestModel`].
//!
//! Failed candidates (bad output width, NaN outputs, panics) receive the
//! sentinel fitness and never abort the batch. A [`CancelToken`], a
//! per-generation deadline and a run-wide evaluation budget bound the
//! work done.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod builder;
pub mod cancel;
pub mod config;
pub mod evaluation;
pub mod forest;
pub mod harness;
pub mod metrics;
pub mod search;
mod worker;

pub use builder::{BuildError, RoadBuilder};
pub use cancel::CancelToken;
pub use config::{build_simulator, ConfigError, EvaluationConfig, RoadConfig};
pub use evaluation::{Evaluation, EvaluationError, FitnessSlot, FitnessTable, Outcome, ScoredRun};
pub use forest::{Forest, ForestModel};
pub use harness::{EvaluationHarness, HarnessError};
pub use metrics::{EvaluationMetrics, GenerationReport};
pub use search::{Evaluator, SearchEngine, SearchError};
