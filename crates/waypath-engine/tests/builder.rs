//! End-to-end road building against a fixed-population search engine.

mod common;

use common::{linear, FixedPopulation, Genome};
use waypath_engine::{BuildError, Forest, ForestModel, RoadBuilder, RoadConfig, SearchError};
use waypath_test_utils::scattered_field;

fn config() -> RoadConfig {
    RoadConfig {
        generations: 3,
        ..RoadConfig::feed_forward()
    }
}

fn forest(seed: u64, count: usize) -> Forest {
    Forest::new(scattered_field(seed, count, 900.0, 600.0), 900.0, 600.0).unwrap()
}

fn engine(population: Vec<Genome>) -> FixedPopulation {
    FixedPopulation {
        population,
        runs: 0,
    }
}

#[test]
fn build_publishes_the_winners_road() {
    let mut forest = forest(9, 150);
    let mut engine = engine((0..10).map(|i| linear(i, 14)).chain([Genome::Panics]).collect());
    let mut builder = RoadBuilder::new(config()).unwrap();

    let run = builder.build(&mut forest, &mut engine).unwrap();
    assert_eq!(engine.runs, 1);
    assert!(run.breakdown.fitness > 0.0);
    assert_eq!(forest.road(), Some(&run.trajectory.path));
    assert!(builder.winner().is_some());
    assert_ne!(builder.winner(), Some(&Genome::Panics));
}

#[test]
fn cached_winner_skips_the_search() {
    let mut forest = forest(9, 150);
    let mut engine = engine((0..4).map(|i| linear(i, 14)).collect());
    let mut builder = RoadBuilder::new(config()).unwrap();

    let first = builder.build(&mut forest, &mut engine).unwrap();
    let second = builder.build(&mut forest, &mut engine).unwrap();
    assert_eq!(engine.runs, 1);
    assert_eq!(first, second);
}

#[test]
fn seeded_winner_is_published_directly() {
    let mut forest = forest(2, 50);
    let mut engine = engine(Vec::new());
    let mut builder = RoadBuilder::new(config())
        .unwrap()
        .with_winner(Genome::Constant(1.0, 0.8333));

    let run = builder.build(&mut forest, &mut engine).unwrap();
    assert_eq!(engine.runs, 0);
    assert_eq!(forest.road().map(|r| r.len()), Some(run.trajectory.path.len()));
}

#[test]
fn empty_population_is_a_search_error() {
    let mut forest = forest(2, 50);
    let mut engine = engine(Vec::new());
    let mut builder = RoadBuilder::<Genome>::new(config()).unwrap();
    assert_eq!(
        builder.build(&mut forest, &mut engine).unwrap_err(),
        BuildError::Search(SearchError::NoCandidates)
    );
    assert!(forest.road().is_none());
}

#[test]
fn failing_winner_is_reported_and_kept() {
    let mut forest = forest(2, 50);
    let mut engine = engine(Vec::new());
    let mut builder = RoadBuilder::new(config())
        .unwrap()
        .with_winner(Genome::WrongWidth);
    assert!(matches!(
        builder.build(&mut forest, &mut engine),
        Err(BuildError::Winner(_))
    ));
    assert_eq!(builder.winner(), Some(&Genome::WrongWidth));
    assert!(forest.road().is_none());
}
