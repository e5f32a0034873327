//! Path simulators for Waypath.
//!
//! A [`PathSimulator`] drives one policy from the course origin toward the
//! destination, one waypoint per step, until it gets close enough or runs
//! out of steps. Two implementations share that contract:
//!
//! - [`FeedForwardSimulator`]: one activation per step with the aggregate
//!   sensor vector (all nearby obstacles at once).
//! - [`RecurrentSimulator`]: one activation per nearby obstacle, letting a
//!   stateful policy accumulate context; the last output moves the agent.
//!
//! [`SimulatorKind`] picks between them from configuration.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod decoder;
pub mod error;
pub mod feed_forward;
pub mod recurrent;
pub mod simulator;
pub mod trajectory;

pub use config::{RecurrentConfig, SimulationConfig, SimulatorKind};
pub use decoder::{ActionDecoder, ACTION_LEN};
pub use error::SimulationError;
pub use feed_forward::FeedForwardSimulator;
pub use recurrent::RecurrentSimulator;
pub use simulator::PathSimulator;
pub use trajectory::{SimState, Trajectory};
