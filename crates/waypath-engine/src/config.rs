//! Road configuration, validation, and error types.
//!
//! [`RoadConfig`] composes the per-component configs into everything a
//! [`EvaluationHarness`](crate::EvaluationHarness) needs.
//! [`validate()`](RoadConfig::validate) checks every component at
//! startup so that configuration mistakes surface before the first
//! generation rather than as a batch of failed candidates.

use std::time::Duration;

use thiserror::Error;
use waypath_fitness::{FitnessConfig, FitnessError};
use waypath_sensor::{SensorConfig, SensorError};
use waypath_sim::{PathSimulator, RecurrentConfig, SimulationConfig, SimulationError, SimulatorKind};
use waypath_space::{CacheConfig, SpaceError};

// ── EvaluationConfig ───────────────────────────────────────────────

/// Worker pool and cancellation settings.
#[derive(Clone, Debug, PartialEq)]
pub struct EvaluationConfig {
    /// Number of evaluation threads. `None` = auto-detect
    /// (`available_parallelism`). Never more than the batch size.
    pub worker_count: Option<usize>,
    /// Per-generation wall-clock budget. Candidates not started when it
    /// expires are reported cancelled. Default: `None`.
    pub deadline: Option<Duration>,
    /// Run-wide cap on evaluations started. Default: `None`.
    pub max_evaluations: Option<u64>,
    /// Fitness assigned to failed and cancelled candidates. Must be finite
    /// and at most 0, the lowest score a valid path can get. Default: 0.
    pub sentinel_fitness: f64,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            worker_count: None,
            deadline: None,
            max_evaluations: None,
            sentinel_fitness: 0.0,
        }
    }
}

impl EvaluationConfig {
    /// Resolve the actual worker count, applying auto-detection if `None`.
    ///
    /// Explicit values are clamped to `[1, 64]`.
    pub fn resolved_worker_count(&self) -> usize {
        match self.worker_count {
            Some(n) => n.clamp(1, 64),
            None => std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4)
                .clamp(1, 64),
        }
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`RoadConfig::validate()`].
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// Simulation parameters are invalid.
    #[error("simulation: {0}")]
    Simulation(#[from] SimulationError),
    /// Sensor layout is invalid.
    #[error("sensor: {0}")]
    Sensor(#[from] SensorError),
    /// Fitness constants are invalid.
    #[error("fitness: {0}")]
    Fitness(#[from] FitnessError),
    /// Cache configuration is invalid.
    #[error("cache: {0}")]
    Cache(#[from] SpaceError),
    /// Sentinel fitness is not finite, or could outrank a scored path.
    #[error("sentinel_fitness must be finite and at most 0, got {value}")]
    InvalidSentinel {
        /// The invalid value.
        value: f64,
    },
    /// `max_evaluations` is zero.
    #[error("max_evaluations must be at least 1")]
    ZeroEvaluationBudget,
}

// ── RoadConfig ─────────────────────────────────────────────────────

/// Complete configuration for evaluating candidates and building a road.
#[derive(Clone, Debug, PartialEq)]
pub struct RoadConfig {
    /// Which simulator drives the policies.
    pub kind: SimulatorKind,
    /// Step parameters.
    pub simulation: SimulationConfig,
    /// Sensor layout (the feed-forward aggregate vector; the recurrent
    /// variant only uses `input_scale`).
    pub sensor: SensorConfig,
    /// Neighbourhood parameters for the recurrent variant.
    pub recurrent: RecurrentConfig,
    /// Scoring constants.
    pub fitness: FitnessConfig,
    /// Per-worker nearest-obstacle cache.
    pub cache: CacheConfig,
    /// Worker pool and cancellation.
    pub evaluation: EvaluationConfig,
    /// Generations the search engine is asked to run. Default: 100.
    pub generations: usize,
}

impl Default for RoadConfig {
    fn default() -> Self {
        Self::feed_forward()
    }
}

impl RoadConfig {
    /// Feed-forward simulator with its matching fitness preset.
    pub fn feed_forward() -> Self {
        Self {
            kind: SimulatorKind::FeedForward,
            simulation: SimulationConfig::feed_forward(),
            sensor: SensorConfig::default(),
            recurrent: RecurrentConfig::default(),
            fitness: FitnessConfig::feed_forward(),
            cache: CacheConfig::default(),
            evaluation: EvaluationConfig::default(),
            generations: 100,
        }
    }

    /// Recurrent simulator with its matching fitness preset.
    pub fn recurrent() -> Self {
        Self {
            kind: SimulatorKind::Recurrent,
            simulation: SimulationConfig::recurrent(),
            fitness: FitnessConfig::recurrent(),
            ..Self::feed_forward()
        }
    }

    /// Validate all structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // 1. Simulation step parameters.
        self.simulation.validate()?;
        // 2. Sensor layout.
        self.sensor.validate()?;
        // 3. Recurrent neighbourhood, even when `kind` is feed-forward.
        self.recurrent.validate()?;
        // 4. Fitness constants.
        self.fitness.validate()?;
        // 5. Cache sizing.
        self.cache.validate()?;
        // 6. Evaluation settings.
        let e = &self.evaluation;
        if !e.sentinel_fitness.is_finite() || e.sentinel_fitness > 0.0 {
            return Err(ConfigError::InvalidSentinel {
                value: e.sentinel_fitness,
            });
        }
        if e.max_evaluations == Some(0) {
            return Err(ConfigError::ZeroEvaluationBudget);
        }
        Ok(())
    }
}

/// Build the simulator selected by `config.kind`.
pub fn build_simulator(config: &RoadConfig) -> Result<Box<dyn PathSimulator>, ConfigError> {
    Ok(config.kind.build(
        config.simulation.clone(),
        config.sensor.clone(),
        config.recurrent.clone(),
    )?)
}
