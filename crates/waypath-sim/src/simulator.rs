//! The [`PathSimulator`] trait.

use waypath_core::{Course, Policy};
use waypath_space::SpatialIndex;

use crate::error::SimulationError;
use crate::trajectory::Trajectory;

/// Drives a policy along a course and records the path it takes.
///
/// Implementations hold only immutable configuration, so one simulator
/// is shared by every evaluation worker (`Send + Sync`). All mutable
/// state lives in the arguments: the policy's own state and the
/// caller's [`SpatialIndex`] cache.
///
/// # Contract
///
/// - The run terminates within `max_steps` policy-driven steps for any
///   policy, including one that ignores its input.
/// - The path starts at `course.origin`.
/// - Given the same policy state, obstacle field and configuration the
///   trajectory is identical, whatever the index cache already holds.
/// - A policy returning anything but two finite outputs aborts the run.
pub trait PathSimulator: Send + Sync {
    /// Human-readable name, used in logs.
    fn name(&self) -> &str;

    /// Width of the vectors passed to `Policy::activate`.
    fn input_len(&self) -> usize;

    /// Run `policy` from the origin until termination.
    fn simulate(
        &self,
        policy: &mut dyn Policy,
        index: &mut SpatialIndex,
        course: &Course,
    ) -> Result<Trajectory, SimulationError>;
}

/// Fail fast when a policy declares a different input width.
pub(crate) fn check_input_len(policy: &dyn Policy, expected: usize) -> Result<(), SimulationError> {
    match policy.input_len() {
        Some(declared) if declared != expected => {
            Err(SimulationError::InputLength { expected, declared })
        }
        _ => Ok(()),
    }
}
