pub mod lifecycle;
pub mod metrics;

pub use metrics::*;

use crate::config::{SimConfig, SimConfigError};
use crate::grid::{Cell, Ocean, PredatorState, VictimState};
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use std::{error::Error, fmt};
use tracing::info;

/// The ecosystem engine: owns the ocean, the simulation clock and the random source.
pub struct World {
    pub(crate) ocean: Ocean,
    pub(crate) config: SimConfig,
    pub(crate) rng: ChaCha12Rng,
    pub(crate) current_iteration: usize,
    pub(crate) records: Vec<IterationRecord>,
    pub(crate) events_last_step: StepEvents,
    pub(crate) total_events: StepEvents,
    pub(crate) predators_extinct: bool,
    pub(crate) victims_extinct: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WorldInitError {
    Config(SimConfigError),
    OceanSizeMismatch { expected: usize, actual: usize },
}

impl fmt::Display for WorldInitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorldInitError::Config(e) => write!(f, "{}", e),
            WorldInitError::OceanSizeMismatch { expected, actual } => write!(
                f,
                "ocean size ({actual}) must match config ocean_size ({expected})"
            ),
        }
    }
}

impl From<SimConfigError> for WorldInitError {
    fn from(err: SimConfigError) -> Self {
        WorldInitError::Config(err)
    }
}

impl Error for WorldInitError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            WorldInitError::Config(e) => Some(e),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunError {
    InvalidIterations,
    TooManyIterations { max: usize, actual: usize },
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunError::InvalidIterations => write!(f, "iterations must be positive"),
            RunError::TooManyIterations { max, actual } => {
                write!(f, "iterations ({actual}) exceed supported maximum ({max})")
            }
        }
    }
}

impl Error for RunError {}

impl World {
    pub const MAX_ITERATIONS: usize = 1_000_000;

    pub fn new(config: SimConfig) -> Self {
        Self::try_new(config).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Validate `config` and populate a fresh ocean using a generator seeded from `config.seed`.
    pub fn try_new(config: SimConfig) -> Result<Self, WorldInitError> {
        let rng = ChaCha12Rng::seed_from_u64(config.seed);
        Self::with_rng(config, rng)
    }

    /// Like [`World::try_new`], drawing placement and every later choice from `rng`.
    pub fn with_rng(config: SimConfig, mut rng: ChaCha12Rng) -> Result<Self, WorldInitError> {
        config.validate()?;
        let ocean = Self::populate(&config, &mut rng);
        info!(
            ocean_size = config.ocean_size,
            predators = ocean.predators.len(),
            victims = ocean.victims.len(),
            barriers = ocean.barriers.len(),
            victim_sweep = %config.victim_sweep,
            "ocean initialized"
        );
        Ok(Self::assemble(config, ocean, rng))
    }

    /// Start from a caller-built ocean instead of a random placement.
    pub fn from_ocean(
        config: SimConfig,
        ocean: Ocean,
        rng: ChaCha12Rng,
    ) -> Result<Self, WorldInitError> {
        config.validate()?;
        if ocean.size() != config.ocean_size {
            return Err(WorldInitError::OceanSizeMismatch {
                expected: config.ocean_size,
                actual: ocean.size(),
            });
        }
        Ok(Self::assemble(config, ocean, rng))
    }

    fn assemble(config: SimConfig, ocean: Ocean, rng: ChaCha12Rng) -> Self {
        let predators_extinct = ocean.predators.is_empty();
        let victims_extinct = ocean.victims.is_empty();
        Self {
            ocean,
            config,
            rng,
            current_iteration: 0,
            records: Vec::new(),
            events_last_step: StepEvents::default(),
            total_events: StepEvents::default(),
            predators_extinct,
            victims_extinct,
        }
    }

    /// Sample distinct cells without replacement and split the sample into
    /// predators, victims and barriers, in that order.
    fn populate(config: &SimConfig, rng: &mut ChaCha12Rng) -> Ocean {
        let size = config.ocean_size;
        let mut ocean = Ocean::new(size);
        let predators_end = config.predators;
        let victims_end = predators_end + config.victims;
        let total = victims_end + config.barriers;

        let picks = rand::seq::index::sample(rng, ocean.capacity(), total);
        for (rank, index) in picks.iter().enumerate() {
            let cell = Cell::new(index / size, index % size);
            let placed = if rank < predators_end {
                ocean.place_predator(cell, PredatorState::default())
            } else if rank < victims_end {
                ocean.place_victim(cell, VictimState::default())
            } else {
                ocean.place_barrier(cell)
            };
            debug_assert!(placed, "sampled cells must be distinct");
        }
        ocean
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn ocean(&self) -> &Ocean {
        &self.ocean
    }

    pub fn current_iteration(&self) -> usize {
        self.current_iteration
    }

    pub fn predator_count(&self) -> usize {
        self.ocean.predators.len()
    }

    pub fn victim_count(&self) -> usize {
        self.ocean.victims.len()
    }

    pub fn barrier_count(&self) -> usize {
        self.ocean.barriers.len()
    }

    /// Every record produced so far, in iteration order.
    pub fn records(&self) -> &[IterationRecord] {
        &self.records
    }

    pub fn events_last_step(&self) -> StepEvents {
        self.events_last_step
    }

    pub fn total_events(&self) -> StepEvents {
        self.total_events
    }

    /// Run one iteration and return `(predator_count, victim_count)` afterwards.
    pub fn advance_one_iteration(&mut self) -> (usize, usize) {
        let record = self.step();
        (record.predators, record.victims)
    }

    pub fn run(&mut self) -> RunSummary {
        self.try_run(self.config.iterations)
            .unwrap_or_else(|e| panic!("{e}"))
    }

    /// Run exactly `iterations` iterations. Extinction does not end the run early.
    pub fn try_run(&mut self, iterations: usize) -> Result<RunSummary, RunError> {
        if iterations == 0 {
            return Err(RunError::InvalidIterations);
        }
        if iterations > Self::MAX_ITERATIONS {
            return Err(RunError::TooManyIterations {
                max: Self::MAX_ITERATIONS,
                actual: iterations,
            });
        }

        let first_record = self.records.len();
        let mut totals = StepEvents::default();
        for _ in 0..iterations {
            self.step();
            totals.accumulate(&self.events_last_step);
        }
        let summary = RunSummary {
            schema_version: 1,
            iterations,
            records: self.records[first_record..].to_vec(),
            totals,
            final_predators: self.predator_count(),
            final_victims: self.victim_count(),
            barriers: self.barrier_count(),
        };
        info!(
            iterations,
            final_predators = summary.final_predators,
            final_victims = summary.final_victims,
            predations = totals.predations,
            starvations = totals.starvations,
            "run complete"
        );
        Ok(summary)
    }
}
