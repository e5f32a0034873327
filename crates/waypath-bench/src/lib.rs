//! Benchmark profiles and utilities for the Waypath road builder.
//!
//! Provides pre-built fields and candidate batches for benchmarks and
//! examples:
//!
//! - [`reference_field`]: 900x600 screen with 300 obstacles
//! - [`dense_field`]: same screen with 3000 obstacles
//! - [`random_batch`]: seeded population of [`LinearGenome`]s
//! - [`RandomSearch`]: a tiny mutate-the-best search engine

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use waypath_core::{Candidate, CandidateId, Obstacle, ObstacleField, Point, Policy};
use waypath_engine::{Evaluator, SearchEngine, SearchError};

/// Screen width shared by every profile.
pub const SCREEN_WIDTH: f64 = 900.0;
/// Screen height shared by every profile.
pub const SCREEN_HEIGHT: f64 = 600.0;

/// 300 obstacles scattered uniformly over the screen.
pub fn reference_field(seed: u64) -> ObstacleField {
    scatter(seed, 300)
}

/// 3000 obstacles; ten times the reference density.
pub fn dense_field(seed: u64) -> ObstacleField {
    scatter(seed, 3000)
}

fn scatter(seed: u64, count: usize) -> ObstacleField {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let obstacles = (0..count)
        .map(|_| {
            Obstacle::new(
                Point::new(
                    rng.random_range(0.0..SCREEN_WIDTH),
                    rng.random_range(0.0..SCREEN_HEIGHT),
                ),
                rng.random_range(2.0..8.0),
            )
        })
        .collect();
    ObstacleField::new(obstacles).unwrap()
}

// ── Genome ──────────────────────────────────────────────────────

/// A single-layer network genome: two sigmoid outputs over `inputs` weights.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearGenome {
    /// One weight row per output axis.
    pub weights: [Vec<f64>; 2],
    /// Output biases.
    pub bias: [f64; 2],
}

impl LinearGenome {
    /// Random genome with weights in `[-0.05, 0.05]` and biases in `[-1, 2]`.
    pub fn random(rng: &mut impl Rng, inputs: usize) -> Self {
        let mut row = || -> Vec<f64> {
            (0..inputs)
                .map(|_| rng.random_range(-0.05..0.05))
                .collect()
        };
        let weights = [row(), row()];
        Self {
            weights,
            bias: [rng.random_range(-1.0..2.0), rng.random_range(-1.0..2.0)],
        }
    }

    /// Copy with every gene nudged by up to `scale`.
    pub fn mutate(&self, rng: &mut impl Rng, scale: f64) -> Self {
        let mut child = self.clone();
        for row in &mut child.weights {
            for w in row.iter_mut() {
                *w += rng.random_range(-scale..scale) * 0.05;
            }
        }
        for b in &mut child.bias {
            *b += rng.random_range(-scale..scale);
        }
        child
    }
}

struct LinearNet {
    genome: LinearGenome,
}

impl Policy for LinearNet {
    fn activate(&mut self, inputs: &[f64]) -> Vec<f64> {
        self.genome
            .weights
            .iter()
            .zip(self.genome.bias)
            .map(|(row, b)| {
                let z: f64 = row.iter().zip(inputs).map(|(w, x)| w * x).sum::<f64>() + b;
                1.0 / (1.0 + (-z).exp())
            })
            .collect()
    }

    fn input_len(&self) -> Option<usize> {
        Some(self.genome.weights[0].len())
    }
}

impl Candidate for LinearGenome {
    fn instantiate(&self) -> Box<dyn Policy> {
        Box::new(LinearNet {
            genome: self.clone(),
        })
    }
}

/// `n` random genomes with ids `0..n`.
pub fn random_batch(seed: u64, n: usize, inputs: usize) -> Vec<(CandidateId, LinearGenome)> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n as u64)
        .map(|i| (CandidateId(i), LinearGenome::random(&mut rng, inputs)))
        .collect()
}

// ── Search ──────────────────────────────────────────────────────

/// Keep the best genome seen so far; each generation is that genome
/// plus `population - 1` mutants of it.
#[derive(Debug)]
pub struct RandomSearch {
    rng: ChaCha8Rng,
    population: usize,
    inputs: usize,
    next_id: u64,
}

impl RandomSearch {
    /// Seeded search over genomes of width `inputs`.
    pub fn new(seed: u64, population: usize, inputs: usize) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            population,
            inputs,
            next_id: 0,
        }
    }

    fn id(&mut self) -> CandidateId {
        self.next_id += 1;
        CandidateId(self.next_id)
    }
}

impl SearchEngine for RandomSearch {
    type Candidate = LinearGenome;

    fn run(
        &mut self,
        evaluator: &mut dyn Evaluator<LinearGenome>,
        generations: usize,
    ) -> Result<LinearGenome, SearchError> {
        if self.population == 0 {
            return Err(SearchError::NoCandidates);
        }
        let mut best: Option<(LinearGenome, f64)> = None;
        for generation in 0..generations {
            let mut batch = Vec::with_capacity(self.population);
            if let Some((genome, _)) = &best {
                let genome = genome.clone();
                let id = self.id();
                batch.push((id, genome.clone()));
                let scale = 1.0 / (1.0 + generation as f64 * 0.1);
                while batch.len() < self.population {
                    let id = self.id();
                    batch.push((id, genome.mutate(&mut self.rng, scale)));
                }
            } else {
                while batch.len() < self.population {
                    let id = self.id();
                    batch.push((id, LinearGenome::random(&mut self.rng, self.inputs)));
                }
            }

            let table = evaluator.evaluate(&batch)?;
            if let Some((id, e)) = table.best() {
                if best.as_ref().is_none_or(|(_, f)| e.fitness > *f) {
                    let genome = batch
                        .iter()
                        .find(|(cid, _)| *cid == id)
                        .map(|(_, g)| g.clone())
                        .ok_or(SearchError::NoCandidates)?;
                    best = Some((genome, e.fitness));
                }
            }
        }
        best.map(|(g, _)| g).ok_or(SearchError::NoCandidates)
    }
}
