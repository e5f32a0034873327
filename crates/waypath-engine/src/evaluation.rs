//! Per-candidate results and the generation's fitness table.

use indexmap::IndexMap;
use thiserror::Error;
use waypath_core::CandidateId;
use waypath_fitness::{FitnessBreakdown, FitnessError};
use waypath_sim::{SimState, SimulationError, Trajectory};

// ── Error type ──────────────────────────────────────────────────

/// Why one candidate could not be scored.
///
/// Never aborts a batch: the candidate receives the sentinel fitness and
/// the error is kept in its [`Outcome::Failed`].
#[derive(Clone, Debug, PartialEq, Error)]
pub enum EvaluationError {
    /// The simulation aborted (bad policy output, bad input width).
    #[error("simulation failed: {0}")]
    Simulation(#[from] SimulationError),
    /// Scoring the finished path failed.
    #[error("scoring failed: {0}")]
    Fitness(#[from] FitnessError),
    /// The policy panicked.
    #[error("policy panicked: {message}")]
    Panicked {
        /// The panic payload, if it was a string.
        message: String,
    },
}

// ── Outcome ─────────────────────────────────────────────────────

/// What happened to one candidate.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// Simulated and scored.
    Scored {
        /// How the simulation ended.
        termination: SimState,
        /// Policy-driven steps taken.
        steps: usize,
        /// Waypoints on the path, origin included.
        waypoints: usize,
        /// `Policy::activate` calls spent.
        activations: usize,
    },
    /// Simulation or scoring failed; fitness is the sentinel.
    Failed {
        /// The underlying error.
        reason: EvaluationError,
    },
    /// Never started (cancel token, deadline, or evaluation budget);
    /// fitness is the sentinel.
    Cancelled,
}

/// Fitness and outcome for one candidate.
#[derive(Clone, Debug, PartialEq)]
pub struct Evaluation {
    /// Score the search engine should use. Always finite.
    pub fitness: f64,
    /// How the score was obtained.
    pub outcome: Outcome,
}

impl Evaluation {
    pub(crate) fn scored(trajectory: &Trajectory, breakdown: &FitnessBreakdown) -> Self {
        Self {
            fitness: breakdown.fitness,
            outcome: Outcome::Scored {
                termination: trajectory.termination,
                steps: trajectory.steps,
                waypoints: trajectory.path.len(),
                activations: trajectory.activations,
            },
        }
    }

    pub(crate) fn failed(reason: EvaluationError, sentinel: f64) -> Self {
        Self {
            fitness: sentinel,
            outcome: Outcome::Failed { reason },
        }
    }

    pub(crate) fn cancelled(sentinel: f64) -> Self {
        Self {
            fitness: sentinel,
            outcome: Outcome::Cancelled,
        }
    }

    /// Whether the fitness came from an actual score.
    pub fn is_scored(&self) -> bool {
        matches!(self.outcome, Outcome::Scored { .. })
    }
}

/// A finished run of one candidate, kept for publishing.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoredRun {
    /// The simulated path and how it ended.
    pub trajectory: Trajectory,
    /// Every intermediate of the score.
    pub breakdown: FitnessBreakdown,
}

// ── FitnessSlot ─────────────────────────────────────────────────

/// Somewhere a search engine stores a candidate's fitness.
pub trait FitnessSlot {
    /// Overwrite the stored fitness.
    fn set_fitness(&mut self, fitness: f64);
}

impl FitnessSlot for f64 {
    fn set_fitness(&mut self, fitness: f64) {
        *self = fitness;
    }
}

impl FitnessSlot for Option<f64> {
    fn set_fitness(&mut self, fitness: f64) {
        *self = Some(fitness);
    }
}

// ── FitnessTable ────────────────────────────────────────────────

/// Evaluations for one batch, in batch order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FitnessTable {
    entries: IndexMap<CandidateId, Evaluation>,
}

impl FitnessTable {
    pub(crate) fn from_entries(entries: IndexMap<CandidateId, Evaluation>) -> Self {
        Self { entries }
    }

    /// Evaluation for `id`, if it was in the batch.
    pub fn get(&self, id: CandidateId) -> Option<&Evaluation> {
        self.entries.get(&id)
    }

    /// Fitness for `id`, if it was in the batch.
    pub fn fitness(&self, id: CandidateId) -> Option<f64> {
        self.get(id).map(|e| e.fitness)
    }

    /// Highest fitness in the batch; the earliest candidate wins ties.
    pub fn best(&self) -> Option<(CandidateId, &Evaluation)> {
        let mut best: Option<(CandidateId, &Evaluation)> = None;
        for (&id, e) in &self.entries {
            if best.is_none_or(|(_, b)| e.fitness > b.fitness) {
                best = Some((id, e));
            }
        }
        best
    }

    /// `(id, evaluation)` pairs in batch order.
    pub fn iter(&self) -> impl Iterator<Item = (CandidateId, &Evaluation)> + '_ {
        self.entries.iter().map(|(&id, e)| (id, e))
    }

    /// Number of candidates.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the batch was empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write each candidate's fitness into its slot. Returns how many
    /// slots were written; ids not in the table are left untouched.
    pub fn apply_to<F: FitnessSlot>(&self, slots: &mut [(CandidateId, F)]) -> usize {
        let mut written = 0;
        for (id, slot) in slots.iter_mut() {
            if let Some(f) = self.fitness(*id) {
                slot.set_fitness(f);
                written += 1;
            }
        }
        written
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(fitness: &[(u64, f64)]) -> FitnessTable {
        FitnessTable::from_entries(
            fitness
                .iter()
                .map(|&(id, f)| (CandidateId(id), Evaluation::cancelled(f)))
                .collect(),
        )
    }

    #[test]
    fn best_prefers_earliest_on_ties() {
        let t = table(&[(7, 1.0), (3, 5.0), (9, 5.0), (1, 2.0)]);
        assert_eq!(t.best().map(|(id, _)| id), Some(CandidateId(3)));
    }

    #[test]
    fn iteration_keeps_batch_order() {
        let t = table(&[(7, 1.0), (3, 5.0), (1, 2.0)]);
        let ids: Vec<u64> = t.iter().map(|(id, _)| id.0).collect();
        assert_eq!(ids, vec![7, 3, 1]);
    }

    #[test]
    fn empty_table_has_no_best() {
        assert!(FitnessTable::default().best().is_none());
    }

    #[test]
    fn apply_to_writes_known_ids() {
        let t = table(&[(1, 4.0), (2, 8.0)]);
        let mut genomes: Vec<(CandidateId, Option<f64>)> =
            vec![(CandidateId(2), None), (CandidateId(5), None)];
        assert_eq!(t.apply_to(&mut genomes), 1);
        assert_eq!(genomes[0].1, Some(8.0));
        assert_eq!(genomes[1].1, None);
    }
}
