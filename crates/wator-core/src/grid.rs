use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Moore neighbourhood offsets in scan order: `dx` outer, `dy` inner, both ascending.
const MOORE_OFFSETS: [(i64, i64); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// A cell of the ocean. Ordering is row-major (`x` first, then `y`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: usize,
    pub y: usize,
}

impl Cell {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PredatorState {
    /// Iteration of the last meal (0 if it has never eaten).
    pub last_fed: usize,
    /// Iteration of the last reproduction event.
    pub last_reproduced: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VictimState {
    pub last_reproduced: usize,
}

/// Sparse occupancy of a square, non-wrapping grid.
///
/// The three mappings are kept pairwise disjoint: a cell holds at most one
/// occupant. Barriers are fixed once the ocean is populated.
#[derive(Clone, Debug, Default)]
pub struct Ocean {
    size: usize,
    pub(crate) predators: BTreeMap<Cell, PredatorState>,
    pub(crate) victims: BTreeMap<Cell, VictimState>,
    pub(crate) barriers: BTreeSet<Cell>,
}

impl Ocean {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn predators(&self) -> &BTreeMap<Cell, PredatorState> {
        &self.predators
    }

    pub fn victims(&self) -> &BTreeMap<Cell, VictimState> {
        &self.victims
    }

    pub fn barriers(&self) -> &BTreeSet<Cell> {
        &self.barriers
    }

    pub fn is_on_grid(&self, x: i64, y: i64) -> bool {
        self.to_cell(x, y).is_some()
    }

    pub fn is_free(&self, x: i64, y: i64) -> bool {
        self.to_cell(x, y).is_some_and(|cell| self.is_free_cell(cell))
    }

    pub fn is_victim(&self, x: i64, y: i64) -> bool {
        self.to_cell(x, y)
            .is_some_and(|cell| self.victims.contains_key(&cell))
    }

    pub(crate) fn is_free_cell(&self, cell: Cell) -> bool {
        !self.predators.contains_key(&cell)
            && !self.victims.contains_key(&cell)
            && !self.barriers.contains(&cell)
    }

    /// On-grid, unoccupied neighbours of `cell` in Moore scan order.
    pub fn free_neighbours(&self, cell: Cell) -> Vec<Cell> {
        self.neighbours(cell)
            .filter(|&n| self.is_free_cell(n))
            .collect()
    }

    /// Neighbours of `cell` currently holding a victim, in Moore scan order.
    pub fn victim_neighbours(&self, cell: Cell) -> Vec<Cell> {
        self.neighbours(cell)
            .filter(|n| self.victims.contains_key(n))
            .collect()
    }

    /// Occupied cells that may move this iteration, in row-major order.
    pub(crate) fn mobile_cells(&self) -> Vec<Cell> {
        let mut cells: Vec<Cell> = self
            .predators
            .keys()
            .chain(self.victims.keys())
            .copied()
            .collect();
        cells.sort_unstable();
        cells
    }

    pub fn occupied_count(&self) -> usize {
        self.predators.len() + self.victims.len() + self.barriers.len()
    }

    pub fn capacity(&self) -> usize {
        self.size * self.size
    }

    /// Relocate the occupant of `from` to the free or victim-holding cell `to`.
    ///
    /// A predator landing on a victim eats it and records `iteration` as its
    /// last meal. Returns `true` when a victim was eaten.
    pub(crate) fn relocate(&mut self, from: Cell, to: Cell, iteration: usize) -> bool {
        if let Some(mut state) = self.predators.remove(&from) {
            let ate = self.victims.remove(&to).is_some();
            if ate {
                state.last_fed = iteration;
            }
            self.predators.insert(to, state);
            ate
        } else {
            if let Some(state) = self.victims.remove(&from) {
                debug_assert!(self.is_free_cell(to), "victims only move onto free cells");
                self.victims.insert(to, state);
            }
            false
        }
    }

    /// Put a predator on `cell`. Returns `false`, leaving the ocean untouched,
    /// when the cell is off-grid or already occupied.
    pub fn place_predator(&mut self, cell: Cell, state: PredatorState) -> bool {
        if !self.in_bounds(cell) || !self.is_free_cell(cell) {
            return false;
        }
        self.predators.insert(cell, state);
        true
    }

    pub fn place_victim(&mut self, cell: Cell, state: VictimState) -> bool {
        if !self.in_bounds(cell) || !self.is_free_cell(cell) {
            return false;
        }
        self.victims.insert(cell, state);
        true
    }

    pub fn place_barrier(&mut self, cell: Cell) -> bool {
        if !self.in_bounds(cell) || !self.is_free_cell(cell) {
            return false;
        }
        self.barriers.insert(cell);
        true
    }

    fn in_bounds(&self, cell: Cell) -> bool {
        cell.x < self.size && cell.y < self.size
    }

    fn to_cell(&self, x: i64, y: i64) -> Option<Cell> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        (x < self.size && y < self.size).then_some(Cell { x, y })
    }

    fn neighbours(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        MOORE_OFFSETS.iter().filter_map(move |&(dx, dy)| {
            let x = cell.x.checked_add_signed(dx as isize)?;
            let y = cell.y.checked_add_signed(dy as isize)?;
            (x < self.size && y < self.size).then_some(Cell { x, y })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn off_grid_coordinates_are_neither_free_nor_victims() {
        let mut ocean = Ocean::new(3);
        assert!(ocean.place_victim(Cell::new(0, 0), VictimState::default()));
        assert!(!ocean.is_on_grid(-1, 0));
        assert!(!ocean.is_on_grid(0, 3));
        assert!(!ocean.is_free(-1, -1));
        assert!(!ocean.is_free(3, 1));
        assert!(!ocean.is_victim(-1, 0));
        assert!(ocean.is_victim(0, 0));
        assert!(!ocean.is_free(0, 0));
        assert!(ocean.is_free(2, 2));
    }

    #[test]
    fn neighbours_follow_scan_order() {
        let ocean = Ocean::new(3);
        let free = ocean.free_neighbours(Cell::new(1, 1));
        let expected: Vec<Cell> = vec![
            Cell::new(0, 0),
            Cell::new(0, 1),
            Cell::new(0, 2),
            Cell::new(1, 0),
            Cell::new(1, 2),
            Cell::new(2, 0),
            Cell::new(2, 1),
            Cell::new(2, 2),
        ];
        assert_eq!(free, expected);
    }

    #[test]
    fn corner_has_three_neighbours() {
        let ocean = Ocean::new(4);
        assert_eq!(
            ocean.free_neighbours(Cell::new(0, 0)),
            vec![Cell::new(0, 1), Cell::new(1, 0), Cell::new(1, 1)]
        );
        assert_eq!(ocean.free_neighbours(Cell::new(3, 3)).len(), 3);
    }

    #[test]
    fn occupied_cells_are_excluded_from_free_neighbours() {
        let mut ocean = Ocean::new(3);
        assert!(ocean.place_barrier(Cell::new(0, 0)));
        assert!(ocean.place_predator(Cell::new(0, 1), PredatorState::default()));
        assert!(ocean.place_victim(Cell::new(2, 2), VictimState::default()));
        let free = ocean.free_neighbours(Cell::new(1, 1));
        assert_eq!(free.len(), 5);
        assert!(!free.contains(&Cell::new(0, 0)));
        assert!(!free.contains(&Cell::new(0, 1)));
        assert!(!free.contains(&Cell::new(2, 2)));
        assert_eq!(
            ocean.victim_neighbours(Cell::new(1, 1)),
            vec![Cell::new(2, 2)]
        );
    }

    #[test]
    fn placement_refuses_occupied_and_off_grid_cells() {
        let mut ocean = Ocean::new(2);
        assert!(ocean.place_barrier(Cell::new(1, 1)));
        assert!(!ocean.place_predator(Cell::new(1, 1), PredatorState::default()));
        assert!(!ocean.place_victim(Cell::new(2, 0), VictimState::default()));
        assert_eq!(ocean.occupied_count(), 1);
    }

    #[test]
    fn predator_relocating_onto_victim_eats_it() {
        let mut ocean = Ocean::new(2);
        let state = PredatorState {
            last_fed: 0,
            last_reproduced: 3,
        };
        assert!(ocean.place_predator(Cell::new(0, 0), state));
        assert!(ocean.place_victim(Cell::new(1, 1), VictimState::default()));
        assert!(ocean.relocate(Cell::new(0, 0), Cell::new(1, 1), 7));
        assert!(ocean.victims().is_empty());
        assert_eq!(
            ocean.predators().get(&Cell::new(1, 1)),
            Some(&PredatorState {
                last_fed: 7,
                last_reproduced: 3
            })
        );
    }

    #[test]
    fn mobile_cells_are_row_major() {
        let mut ocean = Ocean::new(3);
        assert!(ocean.place_victim(Cell::new(1, 0), VictimState::default()));
        assert!(ocean.place_predator(Cell::new(0, 2), PredatorState::default()));
        assert!(ocean.place_predator(Cell::new(1, 2), PredatorState::default()));
        assert!(ocean.place_barrier(Cell::new(0, 0)));
        assert_eq!(
            ocean.mobile_cells(),
            vec![Cell::new(0, 2), Cell::new(1, 0), Cell::new(1, 2)]
        );
    }
}
