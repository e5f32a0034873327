//! Waypath: build a road through an obstacle field by evolving the
//! policy that walks it.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Waypath sub-crates. An external population-based search engine
//! supplies [`Candidate`](prelude::Candidate)s; Waypath simulates and scores
//! them, hands back a fitness table, and publishes the winner's path.
//!
//! # Quick start
//!
//! ```rust
//! use waypath::prelude::*;
//!
//! // A policy that ignores its sensors and always pushes the same way.
//! struct Steady(f64, f64);
//! impl Policy for Steady {
//!     fn activate(&mut self, _inputs: &[f64]) -> Vec<f64> {
//!         vec![self.0, self.1]
//!     }
//! }
//!
//! #[derive(Clone)]
//! struct Genome(f64, f64);
//! impl Candidate for Genome {
//!     fn instantiate(&self) -> Box<dyn Policy> {
//!         Box::new(Steady(self.0, self.1))
//!     }
//! }
//!
//! let field = ObstacleField::new(vec![
//!     Obstacle::new(Point::new(300.0, 200.0), 4.0),
//!     Obstacle::new(Point::new(600.0, 420.0), 6.0),
//! ])
//! .unwrap();
//! let course = Course::for_screen(900.0, 600.0).unwrap();
//! let mut harness = EvaluationHarness::new(field, course, RoadConfig::feed_forward()).unwrap();
//!
//! let batch = vec![
//!     (CandidateId(1), Genome(1.0, 0.8333)),
//!     (CandidateId(2), Genome(0.5, 0.5)),
//! ];
//! let table = harness.evaluate(&batch).unwrap();
//! assert_eq!(table.len(), 2);
//! assert!(table.iter().all(|(_, e)| e.is_scored()));
//! assert_eq!(table.best().map(|(id, _)| id), Some(CandidateId(1)));
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `waypath-core` | Geometry, obstacles, paths, the policy contracts |
//! | [`space`] | `waypath-space` | Nearest-obstacle index and its query cache |
//! | [`sensor`] | `waypath-sensor` | Sensor vector layout |
//! | [`sim`] | `waypath-sim` | Feed-forward and recurrent path simulators |
//! | [`fitness`] | `waypath-fitness` | Path scoring |
//! | [`engine`] | `waypath-engine` | Parallel evaluation, search contract, road building |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and traits (`waypath-core`).
///
/// Contains [`types::Point`], [`types::ObstacleField`], [`types::Path`]
/// and the [`types::Policy`] / [`types::Candidate`] boundary with the
/// search engine.
pub use waypath_core as types;

/// Nearest-obstacle queries (`waypath-space`).
///
/// [`space::SpatialIndex`] answers k-nearest queries through a bounded,
/// quantized [`space::NearestCache`].
pub use waypath_space as space;

/// Sensor vector construction (`waypath-sensor`).
pub use waypath_sensor as sensor;

/// Path simulators (`waypath-sim`).
///
/// [`sim::FeedForwardSimulator`] activates once per step on an aggregate
/// sensor vector; [`sim::RecurrentSimulator`] activates once per nearby
/// obstacle.
pub use waypath_sim as sim;

/// Path scoring (`waypath-fitness`).
pub use waypath_fitness as fitness;

/// Evaluation harness and road building (`waypath-engine`).
///
/// [`engine::EvaluationHarness`] scores a generation on a worker pool;
/// [`engine::RoadBuilder`] runs a whole search and publishes the road.
pub use waypath_engine as engine;

/// Common imports for typical Waypath usage.
///
/// ```rust
/// use waypath::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use waypath_core::{
        Bounds, Candidate, CandidateId, Course, Obstacle, ObstacleField, Path, Point, Policy,
    };

    // Errors
    pub use waypath_core::FieldError;
    pub use waypath_engine::{BuildError, ConfigError, EvaluationError, HarnessError, SearchError};

    // Configuration
    pub use waypath_fitness::FitnessConfig;
    pub use waypath_sensor::SensorConfig;
    pub use waypath_sim::{RecurrentConfig, SimulationConfig, SimulatorKind};
    pub use waypath_space::CacheConfig;

    // Simulation
    pub use waypath_sim::{PathSimulator, SimState, Trajectory};

    // Engine
    pub use waypath_engine::{
        CancelToken, EvaluationConfig, EvaluationHarness, Evaluator, FitnessTable, Forest,
        ForestModel, GenerationReport, Outcome, RoadBuilder, RoadConfig, ScoredRun, SearchEngine,
    };
}
