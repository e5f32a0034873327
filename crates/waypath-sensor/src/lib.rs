//! Sensor vectors for Waypath policies.
//!
//! A policy sees the world only through the numeric vector built here.
//! [`SensorModel`] lays out the destination offset, the agent's absolute
//! position and the offsets to nearby obstacles, padding unused obstacle
//! slots so the vector length never depends on local obstacle density.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod model;

pub use error::SensorError;
pub use model::{SensorConfig, SensorModel, HEADER_LEN, SINGLE_LEN};
