//! Nearest-obstacle queries for Waypath simulations.
//!
//! [`SpatialIndex`] answers "the `k` obstacles closest to this point"
//! against an immutable [`ObstacleField`](waypath_core::ObstacleField).
//! Both the path simulator and the fitness scorer ask the same question
//! about the same handful of waypoints over and over, so answers are
//! memoized in a bounded [`NearestCache`] keyed by a quantized point.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cache;
pub mod error;
pub mod index;

pub use cache::{CacheConfig, CacheKey, CacheStats, NearestCache, QuantizedPoint};
pub use error::SpaceError;
pub use index::{Neighbours, SpatialIndex};
