//! [`RoadBuilder`]: search for a winning policy and publish its road.

use thiserror::Error;
use tracing::info;
use waypath_core::{Candidate, FieldError, ObstacleField};

use crate::config::{ConfigError, RoadConfig};
use crate::evaluation::{EvaluationError, ScoredRun};
use crate::forest::ForestModel;
use crate::harness::EvaluationHarness;
use crate::search::{SearchEngine, SearchError};

// ── Error type ──────────────────────────────────────────────────

/// Errors from [`RoadBuilder::build`].
#[derive(Clone, Debug, PartialEq, Error)]
pub enum BuildError {
    /// The forest's obstacles or screen size are invalid.
    #[error("forest: {0}")]
    Forest(#[from] FieldError),
    /// The road configuration is invalid.
    #[error("config: {0}")]
    Config(#[from] ConfigError),
    /// The search engine failed.
    #[error("search: {0}")]
    Search(#[from] SearchError),
    /// Re-running the winner failed.
    #[error("winner: {0}")]
    Winner(#[from] EvaluationError),
}

// ── RoadBuilder ─────────────────────────────────────────────────

/// Runs the search once, remembers the winner, and writes its road into
/// a [`ForestModel`].
///
/// Later `build` calls reuse the cached winner and only re-simulate it,
/// so a road can be republished onto an edited forest without another
/// search.
#[derive(Debug)]
pub struct RoadBuilder<C> {
    config: RoadConfig,
    winner: Option<C>,
}

impl<C: Candidate> RoadBuilder<C> {
    /// Create a builder, validating `config`.
    pub fn new(config: RoadConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            winner: None,
        })
    }

    /// Seed a known winner; `build` will skip the search.
    pub fn with_winner(mut self, winner: C) -> Self {
        self.winner = Some(winner);
        self
    }

    /// The cached winner, once a search has run.
    pub fn winner(&self) -> Option<&C> {
        self.winner.as_ref()
    }

    /// Drop the cached winner so the next `build` searches again.
    pub fn take_winner(&mut self) -> Option<C> {
        self.winner.take()
    }

    /// The configuration in use.
    pub fn config(&self) -> &RoadConfig {
        &self.config
    }

    /// Find (or reuse) the winner, simulate it on `forest`, and store the
    /// resulting path as the forest's road.
    pub fn build<F, E>(&mut self, forest: &mut F, engine: &mut E) -> Result<ScoredRun, BuildError>
    where
        F: ForestModel + ?Sized,
        E: SearchEngine<Candidate = C> + ?Sized,
    {
        let field = ObstacleField::new(forest.organisms().to_vec())?;
        let course = forest.course()?;
        let mut harness = EvaluationHarness::new(field, course, self.config.clone())?;

        let winner = match self.winner.take() {
            Some(w) => w,
            None => {
                info!(generations = self.config.generations, "searching for a winning policy");
                engine.run(&mut harness, self.config.generations)?
            }
        };
        let run = harness.simulate(&winner);
        self.winner = Some(winner);
        let run = run?;

        info!(
            fitness = run.breakdown.fitness,
            waypoints = run.trajectory.path.len(),
            termination = ?run.trajectory.termination,
            "road published"
        );
        forest.set_road(run.trajectory.path.clone());
        Ok(run)
    }
}
