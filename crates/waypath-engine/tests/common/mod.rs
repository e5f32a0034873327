//! Shared genomes and a fixed-population search engine for harness tests.

#![allow(dead_code)]

use waypath_core::{Candidate, CandidateId, Policy};
use waypath_engine::{Evaluator, SearchEngine, SearchError};
use waypath_test_utils::{ConstantPolicy, LinearPolicy, NanPolicy, PanickingPolicy};

/// A scripted genome covering good and pathological policies.
#[derive(Clone, Debug, PartialEq)]
pub enum Genome {
    Constant(f64, f64),
    Linear(LinearPolicy),
    Panics,
    WrongWidth,
    Nan,
}

impl Candidate for Genome {
    fn instantiate(&self) -> Box<dyn Policy> {
        match self {
            Genome::Constant(x, y) => Box::new(ConstantPolicy::new(vec![*x, *y])),
            Genome::Linear(p) => Box::new(p.clone()),
            Genome::Panics => Box::new(PanickingPolicy::new(3)),
            Genome::WrongWidth => Box::new(ConstantPolicy::new(vec![0.5])),
            Genome::Nan => Box::new(NanPolicy::new(2)),
        }
    }
}

/// Deterministic linear genome for candidate `i`, `inputs` weights per axis.
pub fn linear(i: u64, inputs: usize) -> Genome {
    let w = |j: usize, axis: u64| {
        let h = (i * 31 + j as u64 * 17 + axis * 7) % 101;
        (h as f64 / 50.0 - 1.0) * 0.01
    };
    Genome::Linear(LinearPolicy::new(
        [
            (0..inputs).map(|j| w(j, 0)).collect(),
            (0..inputs).map(|j| w(j, 1)).collect(),
        ],
        [1.0 + (i % 5) as f64 * 0.2, 0.5 + (i % 3) as f64 * 0.2],
    ))
}

/// Number genomes from id 100 upward, in order.
pub fn batch(genomes: Vec<Genome>) -> Vec<(CandidateId, Genome)> {
    genomes
        .into_iter()
        .enumerate()
        .map(|(i, g)| (CandidateId(i as u64 + 100), g))
        .collect()
}

/// Evaluates the same population every generation and keeps the best.
pub struct FixedPopulation {
    pub population: Vec<Genome>,
    pub runs: usize,
}

impl SearchEngine for FixedPopulation {
    type Candidate = Genome;

    fn run(
        &mut self,
        evaluator: &mut dyn Evaluator<Genome>,
        generations: usize,
    ) -> Result<Genome, SearchError> {
        self.runs += 1;
        let batch = batch(self.population.clone());
        let mut best: Option<(f64, Genome)> = None;
        for _ in 0..generations {
            let table = evaluator.evaluate(&batch)?;
            if let Some((id, e)) = table.best() {
                let genome = batch
                    .iter()
                    .find(|(cid, _)| *cid == id)
                    .map(|(_, g)| g.clone())
                    .ok_or(SearchError::NoCandidates)?;
                if best.as_ref().is_none_or(|(f, _)| e.fitness > *f) {
                    best = Some((e.fitness, genome));
                }
            }
        }
        best.map(|(_, g)| g).ok_or(SearchError::NoCandidates)
    }
}
