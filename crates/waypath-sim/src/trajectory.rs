//! Simulation state machine and its result.

use waypath_core::{Course, Path, Point};

use crate::config::SimulationConfig;
use crate::error::SimulationError;

/// Where a simulation run stands.
///
/// `Running` is the only non-terminal state. Goal proximity is checked
/// before each step; the step budget after it. A run that lands near the
/// goal on its last allowed step reports `MaxSteps`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SimState {
    /// Still stepping.
    Running,
    /// Stopped strictly inside the termination radius.
    NearGoal,
    /// Stopped after `max_steps` policy-driven steps.
    MaxSteps,
}

impl SimState {
    /// Whether no further steps will be taken.
    pub fn is_terminal(self) -> bool {
        !matches!(self, SimState::Running)
    }
}

/// A finished simulation run.
#[derive(Clone, Debug, PartialEq)]
pub struct Trajectory {
    /// Waypoints from the origin.
    pub path: Path,
    /// Terminal state; never [`SimState::Running`].
    pub termination: SimState,
    /// Policy-driven steps taken (the lead-in is not counted).
    pub steps: usize,
    /// Total `Policy::activate` calls.
    pub activations: usize,
}

/// Shared step loop.
///
/// `decide` receives the current waypoint and the step index and returns
/// the displacement for that step, along with how many activations it
/// spent.
pub(crate) fn run_steps<F>(
    config: &SimulationConfig,
    course: &Course,
    mut decide: F,
) -> Result<Trajectory, SimulationError>
where
    F: FnMut(Point, usize) -> Result<(Point, usize), SimulationError>,
{
    let mut path = Path::with_capacity(course.origin, config.max_waypoints());
    if config.lead_in != Point::ZERO {
        path.push(course.origin + config.lead_in);
    }

    let mut steps = 0;
    let mut activations = 0;
    let mut state = SimState::Running;
    while !state.is_terminal() {
        let here = path.last();
        if here.distance(course.destination) < config.termination_radius {
            state = SimState::NearGoal;
        } else if steps >= config.max_steps {
            // Only reachable with a zero budget.
            state = SimState::MaxSteps;
        } else {
            let (delta, spent) = decide(here, steps)?;
            let next = here + delta;
            if !next.is_finite() {
                return Err(SimulationError::NonFiniteWaypoint { step: steps });
            }
            path.push(next);
            activations += spent;
            steps += 1;
            if steps >= config.max_steps {
                state = SimState::MaxSteps;
            }
        }
    }

    Ok(Trajectory {
        path,
        termination: state,
        steps,
        activations,
    })
}
