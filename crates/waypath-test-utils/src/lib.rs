//! Test utilities and mock types for Waypath development.
//!
//! Provides mock [`Policy`](waypath_core::Policy) implementations with
//! scripted behavior and deterministic obstacle-field fixtures.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;
pub mod policies;

pub use fixtures::{line_field, scattered_field, screen_course};
pub use policies::{
    sigmoid, AccumulatorPolicy, ConstantPolicy, LinearPolicy, NanPolicy, PanickingPolicy,
    RecordingPolicy, SequencePolicy,
};
