use super::metrics::{IterationRecord, StepEvents};
use super::World;
use crate::config::VictimSweep;
use crate::grid::{Cell, PredatorState, VictimState};
use rand::Rng;
use std::collections::HashSet;
use tracing::{debug, info};

impl World {
    fn pick(&mut self, cells: &[Cell]) -> Option<Cell> {
        if cells.is_empty() {
            return None;
        }
        let index = self.rng.random_range(0..cells.len());
        Some(cells[index])
    }

    /// Eat an adjacent victim if there is one, otherwise step onto a free cell.
    /// Returns the predator's new cell when it moved.
    fn move_or_eat(&mut self, cell: Cell, events: &mut StepEvents) -> Option<Cell> {
        let prey = self.ocean.victim_neighbours(cell);
        let target = match self.pick(&prey) {
            Some(target) => target,
            None => {
                let free = self.ocean.free_neighbours(cell);
                self.pick(&free)?
            }
        };
        if self.ocean.relocate(cell, target, self.current_iteration) {
            events.predations += 1;
        }
        events.predator_moves += 1;
        Some(target)
    }

    fn drift(&mut self, cell: Cell, events: &mut StepEvents) -> Option<Cell> {
        let free = self.ocean.free_neighbours(cell);
        let target = self.pick(&free)?;
        self.ocean.relocate(cell, target, self.current_iteration);
        events.victim_moves += 1;
        Some(target)
    }

    fn step_movement_phase(&mut self, events: &mut StepEvents) {
        match self.config.victim_sweep {
            VictimSweep::EveryCell => self.sweep_snapshot(events),
            VictimSweep::RowBreak => self.sweep_live_rows(events),
        }
    }

    /// Row-major sweep over the cells occupied at the start of the pass.
    ///
    /// Each individual moves at most once: a cell that received a mover during
    /// this pass is not visited again.
    fn sweep_snapshot(&mut self, events: &mut StepEvents) {
        let mut settled: HashSet<Cell> = HashSet::new();
        for cell in self.ocean.mobile_cells() {
            if settled.contains(&cell) {
                continue;
            }
            if self.ocean.predators.contains_key(&cell) {
                if let Some(target) = self.move_or_eat(cell, events) {
                    settled.insert(target);
                }
            } else if self.ocean.victims.contains_key(&cell) {
                if let Some(target) = self.drift(cell, events) {
                    settled.insert(target);
                }
            }
        }
    }

    /// Row-major scan of the live grid. The first victim found in a row ends
    /// that row. Anything that moved ahead of the scan is visited again, so a
    /// victim moving into a later row can end that row too.
    fn sweep_live_rows(&mut self, events: &mut StepEvents) {
        let size = self.ocean.size();
        for x in 0..size {
            for y in 0..size {
                let cell = Cell::new(x, y);
                if self.ocean.predators.contains_key(&cell) {
                    self.move_or_eat(cell, events);
                } else if self.ocean.victims.contains_key(&cell) {
                    self.drift(cell, events);
                    break;
                }
            }
        }
    }

    /// Starve or breed every predator present at the start of the pass.
    fn step_predator_lifecycle_phase(&mut self, events: &mut StepEvents) {
        let now = self.current_iteration;
        let cells: Vec<Cell> = self.ocean.predators.keys().copied().collect();
        for cell in cells {
            let Some(state) = self.ocean.predators.get(&cell).copied() else {
                continue;
            };
            // Starvation wins over reproduction.
            if now - state.last_fed >= self.config.predator_hunger_threshold {
                self.ocean.predators.remove(&cell);
                events.starvations += 1;
                continue;
            }
            if now - state.last_reproduced < self.config.reproduction_frequency {
                continue;
            }
            let free = self.ocean.free_neighbours(cell);
            if let Some(target) = self.pick(&free) {
                let child = PredatorState {
                    last_fed: state.last_fed,
                    last_reproduced: now,
                };
                if self.ocean.place_predator(target, child) {
                    events.predator_births += 1;
                }
            }
        }
    }

    fn step_victim_lifecycle_phase(&mut self, events: &mut StepEvents) {
        let now = self.current_iteration;
        let cells: Vec<Cell> = self.ocean.victims.keys().copied().collect();
        for cell in cells {
            let Some(state) = self.ocean.victims.get(&cell).copied() else {
                continue;
            };
            if now - state.last_reproduced < self.config.reproduction_frequency {
                continue;
            }
            let free = self.ocean.free_neighbours(cell);
            if let Some(target) = self.pick(&free) {
                let child = VictimState {
                    last_reproduced: now,
                };
                if self.ocean.place_victim(target, child) {
                    events.victim_births += 1;
                }
            }
        }
    }

    fn note_extinctions(&mut self) {
        if !self.predators_extinct && self.ocean.predators.is_empty() {
            self.predators_extinct = true;
            info!(iteration = self.current_iteration, "predators extinct");
        }
        if !self.victims_extinct && self.ocean.victims.is_empty() {
            self.victims_extinct = true;
            info!(iteration = self.current_iteration, "victims extinct");
        }
    }

    /// Advance the clock, run the movement pass, then the reproduce-or-die
    /// pass, and append the resulting population record.
    pub fn step(&mut self) -> IterationRecord {
        self.current_iteration = self.current_iteration.saturating_add(1);
        let mut events = StepEvents::default();

        self.step_movement_phase(&mut events);
        self.step_predator_lifecycle_phase(&mut events);
        self.step_victim_lifecycle_phase(&mut events);

        self.events_last_step = events;
        self.total_events.accumulate(&events);
        self.note_extinctions();

        let record = self.current_record();
        self.records.push(record);
        debug!(
            iteration = record.iteration,
            predators = record.predators,
            victims = record.victims,
            births = events.predator_births + events.victim_births,
            starvations = events.starvations,
            predations = events.predations,
            "iteration complete"
        );
        record
    }
}
