//! [`EvaluationHarness`]: batch evaluation over a worker pool.
//!
//! # Threading
//!
//! ```text
//!   evaluate(batch)
//!     |  slot indices  [task_tx: bounded(admitted)]
//!     v
//!   worker 0 .. worker N-1     (std::thread::scope, one SpatialIndex each)
//!     |  (slot, Evaluation)  [result_tx: unbounded]
//!     v
//!   FitnessTable (batch order)
//! ```
//!
//! Workers are scoped to one `evaluate` call. Their indexes, one per
//! configured worker, are owned by the harness and persist across
//! generations, so warm caches carry over. Every nearest-obstacle answer
//! is a pure function of the query and the field, so results do not
//! depend on which worker ran which candidate.

use std::time::Instant;

use indexmap::{IndexMap, IndexSet};
use thiserror::Error;
use tracing::{debug, info};
use waypath_core::{Candidate, CandidateId, Course, ObstacleField};
use waypath_fitness::FitnessScorer;
use waypath_sim::PathSimulator;
use waypath_space::{CacheStats, SpatialIndex};

use crate::cancel::CancelToken;
use crate::config::{build_simulator, ConfigError, EvaluationConfig, RoadConfig};
use crate::evaluation::{Evaluation, EvaluationError, FitnessTable, ScoredRun};
use crate::metrics::{EvaluationMetrics, GenerationReport};
use crate::worker::{self, WorkerContext};

// ── Error type ──────────────────────────────────────────────────

/// Structural errors that reject a whole batch.
///
/// Individual candidate failures are not errors at this level; see
/// [`Outcome::Failed`](crate::Outcome::Failed).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum HarnessError {
    /// The same id appears twice in one batch.
    #[error("candidate id {id} appears more than once in the batch")]
    DuplicateCandidate {
        /// The repeated id.
        id: CandidateId,
    },
}

// ── EvaluationHarness ───────────────────────────────────────────

/// Simulates and scores candidate batches, one generation per call.
pub struct EvaluationHarness {
    field: ObstacleField,
    course: Course,
    simulator: Box<dyn PathSimulator>,
    scorer: FitnessScorer,
    config: RoadConfig,
    indexes: Vec<SpatialIndex>,
    cancel: CancelToken,
    generation: u64,
    evaluations: u64,
    last_report: Option<GenerationReport>,
}

impl EvaluationHarness {
    /// Create a harness over `field` and `course`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if any part of `config` is invalid.
    pub fn new(
        field: ObstacleField,
        course: Course,
        config: RoadConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let simulator = build_simulator(&config)?;
        let scorer = FitnessScorer::new(config.fitness.clone())?;
        let indexes = (0..config.evaluation.resolved_worker_count())
            .map(|_| SpatialIndex::new(field.clone(), &config.cache))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            field,
            course,
            simulator,
            scorer,
            config,
            indexes,
            cancel: CancelToken::new(),
            generation: 0,
            evaluations: 0,
            last_report: None,
        })
    }

    /// The obstacle set candidates are evaluated against.
    pub fn field(&self) -> &ObstacleField {
        &self.field
    }

    /// Start, destination and bounds.
    pub fn course(&self) -> &Course {
        &self.course
    }

    /// The configuration this harness was built from.
    pub fn config(&self) -> &RoadConfig {
        &self.config
    }

    /// The simulator in use.
    pub fn simulator(&self) -> &dyn PathSimulator {
        self.simulator.as_ref()
    }

    /// Generations evaluated so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Evaluations started so far, across all generations.
    pub fn evaluations(&self) -> u64 {
        self.evaluations
    }

    /// A handle that cancels in-flight and future generations until reset.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Report for the most recent `evaluate` call.
    pub fn last_report(&self) -> Option<&GenerationReport> {
        self.last_report.as_ref()
    }

    /// Nearest-cache counters summed over every worker index.
    pub fn cache_stats(&self) -> CacheStats {
        let mut total = CacheStats::default();
        for index in &self.indexes {
            total.merge(&index.stats());
        }
        total
    }

    /// Install a new obstacle set. Worker caches are invalidated if it
    /// differs from the current one.
    pub fn set_field(&mut self, field: ObstacleField) {
        for index in &mut self.indexes {
            index.set_field(field.clone());
        }
        self.field = field;
    }

    /// Evaluate one generation.
    ///
    /// Every candidate gets exactly one [`Evaluation`]; failures and
    /// cancellations carry the sentinel fitness. The table preserves
    /// batch order.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::DuplicateCandidate`] if an id repeats, in
    /// which case nothing is evaluated.
    pub fn evaluate<C: Candidate>(
        &mut self,
        batch: &[(CandidateId, C)],
    ) -> Result<FitnessTable, HarnessError> {
        let started = Instant::now();
        let mut seen = IndexSet::with_capacity(batch.len());
        for (id, _) in batch {
            if !seen.insert(*id) {
                return Err(HarnessError::DuplicateCandidate { id: *id });
            }
        }
        self.generation += 1;

        let eval = &self.config.evaluation;
        let sentinel = eval.sentinel_fitness;
        let admitted = admitted_count(eval, self.evaluations, batch.len());
        let workers = self.indexes.len().min(admitted);
        debug!(
            generation = self.generation,
            candidates = batch.len(),
            admitted,
            workers,
            "evaluating generation"
        );

        let mut slots: Vec<Option<Evaluation>> = (0..batch.len()).map(|_| None).collect();
        for slot in &mut slots[admitted..] {
            *slot = Some(Evaluation::cancelled(sentinel));
        }

        if workers > 0 {
            let (task_tx, task_rx) = crossbeam_channel::bounded(admitted);
            for slot in 0..admitted {
                if task_tx.send(slot).is_err() {
                    break;
                }
            }
            drop(task_tx);
            let (result_tx, result_rx) = crossbeam_channel::unbounded();

            let ctx = WorkerContext {
                simulator: self.simulator.as_ref(),
                scorer: &self.scorer,
                course: &self.course,
                cancel: &self.cancel,
                deadline: eval.deadline.map(|d| started + d),
                sentinel,
            };
            std::thread::scope(|s| {
                for index in self.indexes.iter_mut().take(workers) {
                    let task_rx = task_rx.clone();
                    let result_tx = result_tx.clone();
                    let ctx = &ctx;
                    s.spawn(move || worker::worker_loop(ctx, batch, index, task_rx, result_tx));
                }
                drop(result_tx);
                for (slot, evaluation) in result_rx.iter() {
                    slots[slot] = Some(evaluation);
                }
            });
        }

        let entries: IndexMap<CandidateId, Evaluation> = batch
            .iter()
            .zip(slots)
            .map(|((id, _), e)| (*id, e.unwrap_or_else(|| Evaluation::cancelled(sentinel))))
            .collect();
        let table = FitnessTable::from_entries(entries);

        let mut metrics = EvaluationMetrics::tally(&table);
        self.evaluations += (metrics.scored + metrics.failed) as u64;
        metrics.workers = workers;
        metrics.cache = self.cache_stats();
        metrics.elapsed_us = started.elapsed().as_micros() as u64;

        let report = GenerationReport::new(self.generation, &table, metrics);
        info!(
            generation = report.generation,
            best = report.best.map(|(_, f)| f),
            mean = report.mean_fitness,
            failed = report.metrics.failed,
            cancelled = report.metrics.cancelled,
            "{report}"
        );
        self.last_report = Some(report);
        Ok(table)
    }

    /// Simulate and score a single candidate on the calling thread.
    ///
    /// Used to re-run a winner for publishing. Does not count toward the
    /// evaluation budget and ignores the cancel token.
    pub fn simulate<C: Candidate + ?Sized>(
        &mut self,
        candidate: &C,
    ) -> Result<ScoredRun, EvaluationError> {
        let ctx = WorkerContext {
            simulator: self.simulator.as_ref(),
            scorer: &self.scorer,
            course: &self.course,
            cancel: &self.cancel,
            deadline: None,
            sentinel: self.config.evaluation.sentinel_fitness,
        };
        worker::run_candidate(&ctx, candidate, &mut self.indexes[0])
    }
}

/// How many of `batch_len` candidates the run-wide budget still allows.
fn admitted_count(eval: &EvaluationConfig, used: u64, batch_len: usize) -> usize {
    match eval.max_evaluations {
        Some(max) => usize::try_from(max.saturating_sub(used))
            .unwrap_or(usize::MAX)
            .min(batch_len),
        None => batch_len,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn budget_admits_remaining_evaluations() {
        let mut e = EvaluationConfig::default();
        assert_eq!(admitted_count(&e, 100, 10), 10);
        e.max_evaluations = Some(25);
        assert_eq!(admitted_count(&e, 20, 10), 5);
        assert_eq!(admitted_count(&e, 30, 10), 0);
        assert_eq!(admitted_count(&e, 0, 10), 10);
    }
}
