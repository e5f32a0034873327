//! Per-generation evaluation metrics.
//!
//! [`EvaluationMetrics`] captures counts and timing for one `evaluate`
//! call; [`GenerationReport`] adds the fitness summary the search loop
//! logs after every generation.

use std::fmt;

use waypath_core::CandidateId;
use waypath_space::CacheStats;

use crate::evaluation::{FitnessTable, Outcome};

/// Counts and timing collected during one batch evaluation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EvaluationMetrics {
    /// Candidates simulated and scored.
    pub scored: usize,
    /// Candidates that failed (sentinel fitness).
    pub failed: usize,
    /// Candidates never started (sentinel fitness).
    pub cancelled: usize,
    /// Policy-driven steps across scored candidates.
    pub steps: u64,
    /// `Policy::activate` calls across scored candidates.
    pub activations: u64,
    /// Worker threads used.
    pub workers: usize,
    /// Nearest-cache counters summed over every worker, since the
    /// harness was built.
    pub cache: CacheStats,
    /// Wall-clock time for the whole batch, in microseconds.
    pub elapsed_us: u64,
}

impl EvaluationMetrics {
    pub(crate) fn tally(table: &FitnessTable) -> Self {
        let mut m = Self::default();
        for (_, e) in table.iter() {
            match &e.outcome {
                Outcome::Scored {
                    steps, activations, ..
                } => {
                    m.scored += 1;
                    m.steps += *steps as u64;
                    m.activations += *activations as u64;
                }
                Outcome::Failed { .. } => m.failed += 1,
                Outcome::Cancelled => m.cancelled += 1,
            }
        }
        m
    }
}

/// Summary of one generation, one line per generation when logged.
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationReport {
    /// 1-based generation counter of the harness.
    pub generation: u64,
    /// Batch size.
    pub candidates: usize,
    /// Best candidate and its fitness, if the batch was non-empty.
    pub best: Option<(CandidateId, f64)>,
    /// Mean fitness over the whole batch, sentinels included.
    pub mean_fitness: f64,
    /// Counts and timing.
    pub metrics: EvaluationMetrics,
}

impl GenerationReport {
    pub(crate) fn new(generation: u64, table: &FitnessTable, metrics: EvaluationMetrics) -> Self {
        let candidates = table.len();
        let mean_fitness = if candidates == 0 {
            0.0
        } else {
            table.iter().map(|(_, e)| e.fitness).sum::<f64>() / candidates as f64
        };
        Self {
            generation,
            candidates,
            best: table.best().map(|(id, e)| (id, e.fitness)),
            mean_fitness,
            metrics,
        }
    }
}

impl fmt::Display for GenerationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "generation {}: {} candidates, mean fitness {:.5}",
            self.generation, self.candidates, self.mean_fitness
        )?;
        if let Some((id, best)) = self.best {
            write!(f, ", best {best:.5} (candidate {id})")?;
        }
        write!(
            f,
            ", {} failed, {} cancelled, cache hit rate {:.1}%, {:.3}s",
            self.metrics.failed,
            self.metrics.cancelled,
            self.metrics.cache.hit_rate() * 100.0,
            self.metrics.elapsed_us as f64 / 1e6
        )
    }
}
