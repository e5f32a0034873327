//! End-to-end simulator behavior over realistic obstacle fields.

use proptest::prelude::*;
use waypath_core::{ObstacleField, Point};
use waypath_sensor::SensorConfig;
use waypath_sim::{PathSimulator, RecurrentConfig, SimState, SimulationConfig, SimulatorKind};
use waypath_space::{CacheConfig, SpatialIndex};
use waypath_test_utils::{
    screen_course, scattered_field, AccumulatorPolicy, ConstantPolicy, LinearPolicy,
};

fn index(field: ObstacleField) -> SpatialIndex {
    SpatialIndex::new(field, &CacheConfig::default()).unwrap()
}

fn build(kind: SimulatorKind) -> Box<dyn PathSimulator> {
    let simulation = match kind {
        SimulatorKind::FeedForward => SimulationConfig::feed_forward(),
        SimulatorKind::Recurrent => SimulationConfig::recurrent(),
    };
    kind.build(simulation, SensorConfig::default(), RecurrentConfig::default())
        .unwrap()
}

#[test]
fn heading_for_goal_terminates_near_goal() {
    // Full step on x, ~2/3 on y tracks the 900×600 diagonal closely.
    let mut policy = ConstantPolicy::new(vec![1.0, 0.5 + 600.0 / 900.0 / 2.0]);
    let mut idx = index(ObstacleField::empty());
    let course = screen_course();
    let t = build(SimulatorKind::FeedForward)
        .simulate(&mut policy, &mut idx, &course)
        .unwrap();
    assert_eq!(t.termination, SimState::NearGoal);
    assert!(t.path.last().distance(course.destination) < 30.0);
    assert!(t.steps < 249);
}

#[test]
fn constant_policy_moves_with_constant_displacement() {
    for kind in [SimulatorKind::FeedForward, SimulatorKind::Recurrent] {
        let mut policy = ConstantPolicy::new(vec![0.75, 0.25]);
        let mut idx = index(scattered_field(11, 40, 900.0, 600.0));
        let t = build(kind).simulate(&mut policy, &mut idx, &screen_course()).unwrap();
        assert_eq!(t.termination, SimState::MaxSteps, "{kind:?}");
        assert_eq!(t.path.len(), 251);
        for w in t.path.points()[1..].windows(2) {
            assert_eq!(w[1] - w[0], Point::new(4.0, -4.0));
        }
    }
}

#[test]
fn warm_cache_does_not_change_trajectories() {
    let field = scattered_field(5, 60, 900.0, 600.0);
    let sim = build(SimulatorKind::Recurrent);
    let course = screen_course();

    let mut warm = index(field.clone());
    let first = sim
        .simulate(&mut AccumulatorPolicy::new(), &mut warm, &course)
        .unwrap();
    let second = sim
        .simulate(&mut AccumulatorPolicy::new(), &mut warm, &course)
        .unwrap();
    let mut cold = index(field);
    let third = sim
        .simulate(&mut AccumulatorPolicy::new(), &mut cold, &course)
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(first, third);
    assert!(warm.stats().hits > 0);
}

#[test]
fn reused_stateful_policy_diverges() {
    let field = scattered_field(5, 60, 900.0, 600.0);
    let sim = build(SimulatorKind::Recurrent);
    let course = screen_course();
    let mut idx = index(field);

    let mut policy = AccumulatorPolicy::new();
    let first = sim.simulate(&mut policy, &mut idx, &course).unwrap();
    let second = sim.simulate(&mut policy, &mut idx, &course).unwrap();
    assert_ne!(first.path, second.path);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn any_policy_terminates_within_budget(
        seed in 0u64..1000,
        count in 0usize..50,
        wx in prop::collection::vec(-1.0f64..1.0, 14),
        wy in prop::collection::vec(-1.0f64..1.0, 14),
        bias in (-2.0f64..2.0, -2.0f64..2.0),
        max_steps in 0usize..120,
        recurrent in any::<bool>(),
    ) {
        let (kind, base) = if recurrent {
            (SimulatorKind::Recurrent, SimulationConfig::recurrent())
        } else {
            (SimulatorKind::FeedForward, SimulationConfig::feed_forward())
        };
        let sim = kind
            .build(
                SimulationConfig { max_steps, ..base },
                SensorConfig { input_scale: 100.0, ..SensorConfig::default() },
                RecurrentConfig::default(),
            )
            .unwrap();
        let mut policy = LinearPolicy::new([wx, wy], [bias.0, bias.1]);
        let mut idx = index(scattered_field(seed, count, 900.0, 600.0));
        let course = screen_course();
        let t = sim.simulate(&mut policy, &mut idx, &course).unwrap();

        prop_assert!(t.termination.is_terminal());
        prop_assert!(t.steps <= max_steps);
        prop_assert_eq!(t.path.len(), t.steps + 2);
        prop_assert_eq!(t.path.origin(), course.origin);
        prop_assert!(t.path.iter().all(|p| p.is_finite()));
        if t.termination == SimState::NearGoal {
            prop_assert!(t.path.last().distance(course.destination) < 50.0);
        }
        // Policy outputs are in [0, 1], so no step exceeds the diagonal.
        for w in t.path.points()[1..].windows(2) {
            prop_assert!((w[1] - w[0]).norm() <= 8.0 * 2f64.sqrt() + 1e-9);
        }
    }
}
