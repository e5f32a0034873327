//! Evaluation worker: simulate, score, and report one candidate at a time.
//!
//! Each worker owns a [`SpatialIndex`] for its lifetime and receives
//! batch slot indices over a crossbeam channel. Panics raised by a
//! policy are caught here so that one bad candidate never takes the
//! pool down.

use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use crossbeam_channel::{Receiver, Sender};
use tracing::{debug, warn};
use waypath_core::{Candidate, CandidateId, Course};
use waypath_fitness::FitnessScorer;
use waypath_sim::PathSimulator;
use waypath_space::SpatialIndex;

use crate::cancel::CancelToken;
use crate::evaluation::{Evaluation, EvaluationError, ScoredRun};

/// Read-only state shared by every worker of one batch.
pub(crate) struct WorkerContext<'a> {
    pub simulator: &'a dyn PathSimulator,
    pub scorer: &'a FitnessScorer,
    pub course: &'a Course,
    pub cancel: &'a CancelToken,
    pub deadline: Option<Instant>,
    pub sentinel: f64,
}

impl WorkerContext<'_> {
    fn should_stop(&self) -> bool {
        self.cancel.is_cancelled() || self.deadline.is_some_and(|d| Instant::now() >= d)
    }
}

/// Simulate and score one candidate with a fresh policy.
pub(crate) fn run_candidate<C: Candidate + ?Sized>(
    ctx: &WorkerContext<'_>,
    candidate: &C,
    index: &mut SpatialIndex,
) -> Result<ScoredRun, EvaluationError> {
    let result = panic::catch_unwind(AssertUnwindSafe(|| -> Result<ScoredRun, EvaluationError> {
        let mut policy = candidate.instantiate();
        let trajectory = ctx.simulator.simulate(policy.as_mut(), index, ctx.course)?;
        let breakdown = ctx.scorer.score(&trajectory.path, index, ctx.course)?;
        Ok(ScoredRun {
            trajectory,
            breakdown,
        })
    }));
    result.unwrap_or_else(|payload| {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "non-string panic payload".to_string());
        Err(EvaluationError::Panicked { message })
    })
}

/// Turn one candidate into an [`Evaluation`], logging the outcome.
pub(crate) fn evaluate_slot<C: Candidate>(
    ctx: &WorkerContext<'_>,
    id: CandidateId,
    candidate: &C,
    index: &mut SpatialIndex,
) -> Evaluation {
    match run_candidate(ctx, candidate, index) {
        Ok(run) => {
            debug!(
                candidate = %id,
                fitness = run.breakdown.fitness,
                steps = run.trajectory.steps,
                termination = ?run.trajectory.termination,
                "candidate scored"
            );
            Evaluation::scored(&run.trajectory, &run.breakdown)
        }
        Err(reason) => {
            warn!(candidate = %id, error = %reason, "candidate failed, assigning sentinel fitness");
            Evaluation::failed(reason, ctx.sentinel)
        }
    }
}

/// Main loop for an evaluation worker.
///
/// Runs until the task channel is drained and closed. Slots received
/// after cancellation or past the deadline are reported cancelled
/// without instantiating a policy.
pub(crate) fn worker_loop<C: Candidate>(
    ctx: &WorkerContext<'_>,
    batch: &[(CandidateId, C)],
    index: &mut SpatialIndex,
    task_rx: Receiver<usize>,
    result_tx: Sender<(usize, Evaluation)>,
) {
    while let Ok(slot) = task_rx.recv() {
        let evaluation = if ctx.should_stop() {
            Evaluation::cancelled(ctx.sentinel)
        } else {
            let (id, candidate) = &batch[slot];
            evaluate_slot(ctx, *id, candidate, index)
        };
        if result_tx.send((slot, evaluation)).is_err() {
            break;
        }
    }
}
