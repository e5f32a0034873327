//! Contracts with the external population-based search engine.
//!
//! The search engine (speciation, mutation, crossover, the generational
//! loop) lives outside this workspace. It sees Waypath only through
//! [`Evaluator`]: hand over a batch, get a fitness per candidate back.

use thiserror::Error;
use waypath_core::{Candidate, CandidateId};

use crate::evaluation::FitnessTable;
use crate::harness::{EvaluationHarness, HarnessError};

/// Scores a generation's batch of candidates.
pub trait Evaluator<C: Candidate> {
    /// Evaluate every candidate in `batch` once.
    fn evaluate(&mut self, batch: &[(CandidateId, C)]) -> Result<FitnessTable, HarnessError>;
}

impl<C: Candidate> Evaluator<C> for EvaluationHarness {
    fn evaluate(&mut self, batch: &[(CandidateId, C)]) -> Result<FitnessTable, HarnessError> {
        EvaluationHarness::evaluate(self, batch)
    }
}

/// Errors a search engine may report.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum SearchError {
    /// The evaluator rejected a batch.
    #[error("evaluation: {0}")]
    Evaluation(#[from] HarnessError),
    /// The population produced no candidate to return.
    #[error("search produced no candidates")]
    NoCandidates,
    /// Engine-specific failure.
    #[error("search engine: {reason}")]
    Engine {
        /// Human-readable description.
        reason: String,
    },
}

/// A population-based optimizer that proposes candidates and keeps the
/// best one.
pub trait SearchEngine {
    /// The genome type this engine evolves.
    type Candidate: Candidate;

    /// Run up to `generations` generations, calling `evaluator` once per
    /// generation with the full batch, and return the winner.
    fn run(
        &mut self,
        evaluator: &mut dyn Evaluator<Self::Candidate>,
        generations: usize,
    ) -> Result<Self::Candidate, SearchError>;
}
