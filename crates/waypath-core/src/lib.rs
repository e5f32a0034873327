//! Core types and traits for the Waypath road-evolution workspace.
//!
//! This is the leaf crate with no internal dependencies. It defines the
//! vocabulary shared by every other crate: planar geometry ([`Point`],
//! [`Bounds`], [`Course`]), the static obstacle set ([`Obstacle`],
//! [`ObstacleField`]), the append-only [`Path`], identifiers, and the
//! [`Policy`] / [`Candidate`] contracts through which an external search
//! engine hands decision functions to the simulator.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod geometry;
pub mod id;
pub mod obstacle;
pub mod path;
pub mod policy;

pub use error::FieldError;
pub use geometry::{distance, Bounds, Course, Point};
pub use id::{CandidateId, FieldInstanceId};
pub use obstacle::{Obstacle, ObstacleField};
pub use path::Path;
pub use policy::{Candidate, Policy};
