//! Stateful simulator: one activation per nearby obstacle.

use tracing::trace;
use waypath_core::{Course, Point, Policy};
use waypath_sensor::{SensorModel, SINGLE_LEN};
use waypath_space::SpatialIndex;

use crate::config::{RecurrentConfig, SimulationConfig};
use crate::error::SimulationError;
use crate::simulator::{check_input_len, PathSimulator};
use crate::trajectory::{run_steps, Trajectory};

/// Feeds the nearest obstacles to the policy one at a time.
///
/// Each step ranks the `neighbour_count` nearest obstacles and activates
/// the policy once per obstacle with its single-obstacle vector, nearest
/// first. Every output is validated; the last one decides the move. The
/// policy's internal state carries over between activations and steps.
///
/// A step with no obstacle to feed (empty field, or all outside
/// `neighbour_radius`) spends no activations and moves one
/// `step_length` straight toward the destination.
#[derive(Clone, Debug)]
pub struct RecurrentSimulator {
    config: SimulationConfig,
    sensor: SensorModel,
    recurrent: RecurrentConfig,
}

impl RecurrentSimulator {
    /// Create a simulator, validating every parameter.
    pub fn new(
        config: SimulationConfig,
        sensor: SensorModel,
        recurrent: RecurrentConfig,
    ) -> Result<Self, SimulationError> {
        config.validate()?;
        recurrent.validate()?;
        Ok(Self {
            config,
            sensor,
            recurrent,
        })
    }

    /// Step parameters.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Neighbourhood parameters.
    pub fn recurrent(&self) -> &RecurrentConfig {
        &self.recurrent
    }

    fn toward_destination(&self, here: Point, destination: Point) -> Point {
        let to_dest = destination - here;
        let d = to_dest.norm();
        if d == 0.0 {
            Point::ZERO
        } else {
            to_dest * (self.config.step_length / d)
        }
    }
}

impl PathSimulator for RecurrentSimulator {
    fn name(&self) -> &str {
        "RecurrentSimulator"
    }

    fn input_len(&self) -> usize {
        SINGLE_LEN
    }

    fn simulate(
        &self,
        policy: &mut dyn Policy,
        index: &mut SpatialIndex,
        course: &Course,
    ) -> Result<Trajectory, SimulationError> {
        check_input_len(policy, SINGLE_LEN)?;
        let radius = self.recurrent.neighbour_radius;

        let trajectory = run_steps(&self.config, course, |here, step| {
            let nearby = index.nearest(here, self.recurrent.neighbour_count)?;
            let mut decided = None;
            let mut spent = 0;
            for obstacle in nearby
                .iter()
                .filter(|o| radius.is_none_or(|r| o.center.distance(here) < r))
            {
                let inputs = self.sensor.single_vector(here, course.destination, obstacle);
                let outputs = policy.activate(&inputs);
                spent += 1;
                decided = Some(
                    self.config
                        .decoder
                        .decode(&outputs, self.config.step_length, step)?,
                );
            }
            let delta =
                decided.unwrap_or_else(|| self.toward_destination(here, course.destination));
            Ok((delta, spent))
        })?;

        trace!(
            steps = trajectory.steps,
            activations = trajectory.activations,
            termination = ?trajectory.termination,
            "recurrent simulation finished"
        );
        Ok(trajectory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use waypath_core::ObstacleField;
    use waypath_sensor::SensorConfig;
    use waypath_space::CacheConfig;
    use waypath_test_utils::{
        line_field, scattered_field, ConstantPolicy, RecordingPolicy, SequencePolicy,
    };

    use crate::trajectory::SimState;

    fn sim(recurrent: RecurrentConfig) -> RecurrentSimulator {
        RecurrentSimulator::new(
            SimulationConfig::recurrent(),
            SensorModel::new(SensorConfig::default()).unwrap(),
            recurrent,
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
    fn one_activation_per_neighbour() {
        let mut policy = ConstantPolicy::new(vec![1.0, 1.0]);
        let mut idx = index(scattered_field(7, 30, 900.0, 600.0));
        let t = sim(RecurrentConfig::default())
            .simulate(&mut policy, &mut idx, &course())
            .unwrap();
        assert_eq!(t.activations, 10 * t.steps);
        assert_eq!(policy.calls(), t.activations);
    }

    #[test]
    fn small_field_bounds_activations() {
        let mut policy = ConstantPolicy::new(vec![1.0, 1.0]);
        let mut idx = index(line_field(&[100.0, 200.0, 300.0], 50.0));
        let t = sim(RecurrentConfig::default())
            .simulate(&mut policy, &mut idx, &course())
            .unwrap();
        assert_eq!(t.activations, 3 * t.steps);
    }

    #[test]
    fn last_output_decides_the_move() {
        // Two obstacles per step: the first output says "back", the second "forward".
        let mut policy = SequencePolicy::new(vec![vec![0.0, 0.0], vec![1.0, 0.5]]);
        let mut idx = index(line_field(&[400.0, 500.0], 0.0));
        let config = RecurrentConfig {
            neighbour_count: 2,
            ..RecurrentConfig::default()
        };
        let t = sim(config).simulate(&mut policy, &mut idx, &course()).unwrap();
        assert_eq!(t.path[2] - t.path[1], Point::new(8.0, 0.0));
    }

    #[test]
    fn neighbours_are_fed_nearest_first() {
        let mut policy = RecordingPolicy::new(vec![0.5, 0.5]);
        let mut idx = index(line_field(&[50.0, 10.0], 3.0));
        let s = RecurrentSimulator::new(
            SimulationConfig {
                max_steps: 1,
                ..SimulationConfig::recurrent()
            },
            SensorModel::new(SensorConfig::default()).unwrap(),
            RecurrentConfig::default(),
        )
        .unwrap();
        s.simulate(&mut policy, &mut idx, &course()).unwrap();
        let fed: Vec<f64> = policy.inputs().iter().map(|v| v[4]).collect();
        assert_eq!(fed, vec![7.0, 47.0]);
        assert!(policy.inputs().iter().all(|v| v.len() == SINGLE_LEN));
    }

    #[test]
    fn empty_neighbourhood_heads_for_destination() {
        let mut policy = ConstantPolicy::new(vec![0.0, 0.0]);
        let mut idx = index(ObstacleField::empty());
        let t = sim(RecurrentConfig::default())
            .simulate(&mut policy, &mut idx, &course())
            .unwrap();
        assert_eq!(t.termination, SimState::NearGoal);
        assert_eq!(t.activations, 0);
        assert_eq!(policy.calls(), 0);
        let step = t.path[2] - t.path[1];
        assert!((step.norm() - 8.0).abs() < 1e-9);
    }

    #[test]
    fn radius_filters_far_neighbours() {
        let mut policy = ConstantPolicy::new(vec![0.5, 0.5]);
        let mut idx = index(line_field(&[500.0], 500.0));
        let config = RecurrentConfig {
            neighbour_radius: Some(20.0),
            ..RecurrentConfig::default()
        };
        let t = sim(config).simulate(&mut policy, &mut idx, &course()).unwrap();
        // Too far to feed at the start; the fallback moves the agent.
        assert_eq!(policy.calls(), t.activations);
        assert_ne!(t.path[2], t.path[1]);
    }

    #[test]
    fn every_output_is_validated() {
        let mut policy = SequencePolicy::new(vec![vec![0.5], vec![1.0, 1.0]]);
        let mut idx = index(line_field(&[10.0, 20.0], 0.0));
        let err = sim(RecurrentConfig::default())
            .simulate(&mut policy, &mut idx, &course())
            .unwrap_err();
        assert!(matches!(err, SimulationError::OutputLength { actual: 1, .. }));
    }

    #[test]
    fn declared_aggregate_width_is_rejected() {
        let mut policy = ConstantPolicy::new(vec![0.5, 0.5]).with_input_len(14);
        let mut idx = index(ObstacleField::empty());
        assert!(matches!(
            sim(RecurrentConfig::default()).simulate(&mut policy, &mut idx, &course()),
            Err(SimulationError::InputLength { expected: 6, declared: 14 })
        ));
    }
}
