//! Stateless simulator: one activation per step.

use tracing::trace;
use waypath_core::{Course, Policy};
use waypath_sensor::SensorModel;
use waypath_space::SpatialIndex;

use crate::config::SimulationConfig;
use crate::error::SimulationError;
use crate::simulator::{check_input_len, PathSimulator};
use crate::trajectory::{run_steps, Trajectory};

/// Feeds the aggregate sensor vector to the policy once per step.
///
/// Each step asks the index for the `obstacle_slots` nearest obstacles,
/// lets the [`SensorModel`] keep those inside its detection radius and
/// pad the rest, and decodes the single activation into the move.
#[derive(Clone, Debug)]
pub struct FeedForwardSimulator {
    config: SimulationConfig,
    sensor: SensorModel,
}

impl FeedForwardSimulator {
    /// Create a simulator, validating the step parameters.
    pub fn new(config: SimulationConfig, sensor: SensorModel) -> Result<Self, SimulationError> {
        config.validate()?;
        Ok(Self { config, sensor })
    }

    /// Step parameters.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }
}

impl PathSimulator for FeedForwardSimulator {
    fn name(&self) -> &str {
        "FeedForwardSimulator"
    }

    fn input_len(&self) -> usize {
        self.sensor.aggregate_len()
    }

    fn simulate(
        &self,
        policy: &mut dyn Policy,
        index: &mut SpatialIndex,
        course: &Course,
    ) -> Result<Trajectory, SimulationError> {
        check_input_len(policy, self.input_len())?;
        let slots = self.sensor.config().obstacle_slots;
        let mut inputs = vec![0.0; self.input_len()];

        let trajectory = run_steps(&self.config, course, |here, step| {
            let nearby = index.nearest(here, slots)?;
            self.sensor
                .fill_aggregate(here, course.destination, &nearby, &mut inputs)?;
            let outputs = policy.activate(&inputs);
            let delta = self
                .config
                .decoder
                .decode(&outputs, self.config.step_length, step)?;
            Ok((delta, 1))
        })?;

        trace!(
            steps = trajectory.steps,
            termination = ?trajectory.termination,
            "feed-forward simulation finished"
        );
        Ok(trajectory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use waypath_core::{ObstacleField, Point};
    use waypath_sensor::SensorConfig;
    use waypath_space::CacheConfig;
    use waypath_test_utils::{line_field, ConstantPolicy, RecordingPolicy};

    use crate::trajectory::SimState;

    fn sim() -> FeedForwardSimulator {
        FeedForwardSimulator::new(
            SimulationConfig::feed_forward(),
            SensorModel::new(SensorConfig::default()).unwrap(),
        )
        .unwrap()
    }

    fn index(field: ObstacleField) -> SpatialIndex {
        SpatialIndex::new(field, &CacheConfig::default()).unwrap()
    }

    fn course() -> Course {
        Course::for_screen(900.0, 600.0).unwrap()
    }

    #[test]
    fn one_activation_per_step() {
        let mut policy = ConstantPolicy::new(vec![1.0, 1.0]);
        let mut idx = index(ObstacleField::empty());
        let t = sim().simulate(&mut policy, &mut idx, &course()).unwrap();
        assert_eq!(t.activations, t.steps);
        assert_eq!(policy.calls(), t.steps);
    }

    #[test]
    fn diagonal_policy_reaches_goal_in_straight_line() {
        let mut policy = ConstantPolicy::new(vec![1.0, 1.0]);
        let mut idx = index(ObstacleField::empty());
        let t = sim().simulate(&mut policy, &mut idx, &course()).unwrap();

        // The diagonal passes no closer than ~212 to (900, 600).
        assert_eq!(t.termination, SimState::MaxSteps);
        for w in t.path.points()[1..].windows(2) {
            assert_eq!(w[1] - w[0], Point::new(8.0, 8.0));
        }
        assert_eq!(t.path.origin(), Point::ZERO);
        assert_eq!(t.path[1], Point::new(3.0, 3.0));
        assert_eq!(t.steps, 249);
    }

    #[test]
    fn sensor_vector_has_layout_width() {
        let mut policy = RecordingPolicy::new(vec![0.5, 0.5]);
        let mut idx = index(line_field(&[10.0, 20.0], 5.0));
        let config = SimulationConfig {
            max_steps: 3,
            ..SimulationConfig::feed_forward()
        };
        let sensor = SensorModel::new(SensorConfig::default()).unwrap();
        let s = FeedForwardSimulator::new(config, sensor).unwrap();
        let t = s.simulate(&mut policy, &mut idx, &course()).unwrap();
        assert_eq!(t.termination, SimState::MaxSteps);
        assert_eq!(policy.inputs().len(), 3);
        assert!(policy.inputs().iter().all(|v| v.len() == 14));
        // Standing still at (3, 3): obstacle (10, 5) is sensed first.
        assert_eq!(&policy.inputs()[0][4..6], &[7.0, 2.0]);
    }

    #[test]
    fn declared_input_mismatch_fails_fast() {
        let mut policy = ConstantPolicy::new(vec![0.5, 0.5]).with_input_len(6);
        let mut idx = index(ObstacleField::empty());
        let err = sim().simulate(&mut policy, &mut idx, &course()).unwrap_err();
        assert_eq!(
            err,
            SimulationError::InputLength {
                expected: 14,
                declared: 6
            }
        );
        assert_eq!(policy.calls(), 0);
    }

    #[test]
    fn wrong_output_width_fails_fast() {
        let mut policy = ConstantPolicy::new(vec![0.5, 0.5, 0.5]);
        let mut idx = index(ObstacleField::empty());
        let err = sim().simulate(&mut policy, &mut idx, &course()).unwrap_err();
        assert!(matches!(err, SimulationError::OutputLength { expected: 2, actual: 3 }));
        assert_eq!(policy.calls(), 1);
    }
}
