use super::World;
use serde::{Deserialize, Serialize};

/// Population snapshot produced after every iteration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IterationRecord {
    /// Clock value after the iteration (1-based).
    pub iteration: usize,
    pub predators: usize,
    pub victims: usize,
}

/// Per-iteration event counters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StepEvents {
    pub predator_moves: usize,
    pub victim_moves: usize,
    pub predations: usize,
    pub predator_births: usize,
    pub victim_births: usize,
    pub starvations: usize,
}

impl StepEvents {
    pub(crate) fn accumulate(&mut self, other: &StepEvents) {
        self.predator_moves += other.predator_moves;
        self.victim_moves += other.victim_moves;
        self.predations += other.predations;
        self.predator_births += other.predator_births;
        self.victim_births += other.victim_births;
        self.starvations += other.starvations;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PopulationStats {
    pub predators: usize,
    pub victims: usize,
    pub barriers: usize,
    pub occupied_cells: usize,
    pub free_cells: usize,
}

fn default_schema_version() -> u32 {
    1
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunSummary {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub iterations: usize,
    pub records: Vec<IterationRecord>,
    #[serde(default)]
    pub totals: StepEvents,
    pub final_predators: usize,
    pub final_victims: usize,
    #[serde(default)]
    pub barriers: usize,
}

impl RunSummary {
    /// Iteration (1-based) of the first record with no predators left, if any.
    pub fn predator_extinction(&self) -> Option<usize> {
        self.records
            .iter()
            .find(|r| r.predators == 0)
            .map(|r| r.iteration)
    }

    /// Iteration (1-based) of the first record with no victims left, if any.
    pub fn victim_extinction(&self) -> Option<usize> {
        self.records
            .iter()
            .find(|r| r.victims == 0)
            .map(|r| r.iteration)
    }
}

impl World {
    pub fn population_stats(&self) -> PopulationStats {
        let occupied = self.ocean.occupied_count();
        PopulationStats {
            predators: self.ocean.predators.len(),
            victims: self.ocean.victims.len(),
            barriers: self.ocean.barriers.len(),
            occupied_cells: occupied,
            free_cells: self.ocean.capacity() - occupied,
        }
    }

    pub(crate) fn current_record(&self) -> IterationRecord {
        IterationRecord {
            iteration: self.current_iteration,
            predators: self.ocean.predators.len(),
            victims: self.ocean.victims.len(),
        }
    }
}
