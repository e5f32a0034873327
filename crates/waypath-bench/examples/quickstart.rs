//! End-to-end road building example.
//!
//! Demonstrates: seeded forest → RoadBuilder → RandomSearch over linear
//! genomes → published road. Run with `RUST_LOG=info` (or `debug`) to see
//! the per-generation reports.

use tracing_subscriber::EnvFilter;
use waypath_bench::{reference_field, RandomSearch, SCREEN_HEIGHT, SCREEN_WIDTH};
use waypath_engine::{build_simulator, Forest, ForestModel, RoadBuilder, RoadConfig};

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    println!("=== Waypath Quickstart ===\n");

    for (label, mut config) in [
        ("feed-forward", RoadConfig::feed_forward()),
        ("recurrent", RoadConfig::recurrent()),
    ] {
        config.generations = 20;
        let inputs = build_simulator(&config).unwrap().input_len();
        let mut forest = Forest::new(reference_field(42), SCREEN_WIDTH, SCREEN_HEIGHT).unwrap();
        let mut search = RandomSearch::new(7, 24, inputs);
        let mut builder = RoadBuilder::new(config).unwrap();

        let run = builder.build(&mut forest, &mut search).unwrap();
        let road = forest.road().unwrap();
        let end = road.last();
        println!(
            "{label:>12}: fitness={:>10.4}, waypoints={:>4}, length={:>8.1}, \
             end=({:.1}, {:.1}), {:?}",
            run.breakdown.fitness,
            road.len(),
            run.breakdown.path_length,
            end.x,
            end.y,
            run.trajectory.termination,
        );
    }
}
