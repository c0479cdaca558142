#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! A single cell of a Sudoku grid: its fixed coordinate, its three-way value
//! state, and the candidate computation at the heart of the elimination
//! algorithm.
//!
//! A cell distinguishes values that were *given* as puzzle clues from values
//! it *solved* by elimination; a given value is immune to solving and a cell
//! can never hold both at once. Candidate computation consults the owning
//! grid for the live row, column, and box state, so a cell evaluated later in
//! a pass sees values committed earlier in that same pass.

use crate::sudoku::error::PuzzleError;
use crate::sudoku::grid::Grid;
use bit_vec::BitVec;
use smallvec::{SmallVec, smallvec};
use std::fmt::{self, Display};

/// A cell value. `0` is reserved to mean "no value"; legal given and solved
/// values lie in `[1, length]` for the owning grid's side length.
pub type Value = usize;

/// Candidate values for a single cell, in ascending order. The inline
/// capacity covers grids up to rank 4 without touching the heap.
pub type Candidates = SmallVec<[Value; 16]>;

/// The value state of a cell. Exactly one variant holds at any time, so a
/// cell can never be simultaneously given and solved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum CellState {
    /// No value yet.
    #[default]
    Unknown,
    /// A value fixed as an input constraint (puzzle clue), immune to solving.
    Given(Value),
    /// A value derived by elimination.
    Solved(Value),
}

/// A single cell of a [`Grid`].
///
/// Cells are created by the grid at construction and keep their coordinate
/// for life; only the value state changes. Constraint lookups go through the
/// `&Grid` handed to [`Cell::allowed_values`] and [`Cell::solve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Cell {
    column: usize,
    row: usize,
    state: CellState,
}

impl Cell {
    /// Creates an unknown cell at the given coordinate.
    #[must_use]
    pub const fn new(column: usize, row: usize) -> Self {
        Self {
            column,
            row,
            state: CellState::Unknown,
        }
    }

    /// The cell's column coordinate.
    #[must_use]
    pub const fn column(&self) -> usize {
        self.column
    }

    /// The cell's row coordinate.
    #[must_use]
    pub const fn row(&self) -> usize {
        self.row
    }

    /// The cell's current value state.
    #[must_use]
    pub const fn state(&self) -> CellState {
        self.state
    }

    /// The cell's value, or `0` when unknown.
    #[must_use]
    pub const fn value(&self) -> Value {
        match self.state {
            CellState::Unknown => 0,
            CellState::Given(value) | CellState::Solved(value) => value,
        }
    }

    /// Whether the value is a puzzle given.
    #[must_use]
    pub const fn is_given(&self) -> bool {
        matches!(self.state, CellState::Given(_))
    }

    /// Whether the value was derived by elimination.
    #[must_use]
    pub const fn is_solved(&self) -> bool {
        matches!(self.state, CellState::Solved(_))
    }

    /// Whether the cell has no value yet.
    #[must_use]
    pub const fn is_unknown(&self) -> bool {
        matches!(self.state, CellState::Unknown)
    }

    /// Clears the cell back to the unknown state, discarding any given or
    /// solved value.
    pub const fn reset(&mut self) {
        self.state = CellState::Unknown;
    }

    pub(crate) const fn mark_given(&mut self, value: Value) {
        self.state = CellState::Given(value);
    }

    /// Computes the values this cell may still take, in ascending order,
    /// given the current state of its row, column, and box in `grid`.
    ///
    /// A given cell's only candidate is its given value. Otherwise every
    /// value already present in the cell's row, column, or box is excluded
    /// and the remainder of `[1, length]` is returned. Unknown neighbours
    /// hold value `0` and contribute no exclusion.
    ///
    /// # Errors
    ///
    /// `NoCandidates` if every value is excluded, which means the grid has
    /// reached a contradictory state.
    ///
    /// # Panics
    ///
    /// May panic if `grid` is not the grid this cell belongs to.
    pub fn allowed_values(&self, grid: &Grid) -> Result<Candidates, PuzzleError> {
        if let CellState::Given(value) = self.state {
            return Ok(smallvec![value]);
        }

        let length = grid.length();
        let rank = grid.rank();
        let mut excluded = BitVec::from_elem(length + 1, false);

        for i in 0..length {
            if i != self.column {
                excluded.set(grid.value_at(i, self.row), true);
            }
            if i != self.row {
                excluded.set(grid.value_at(self.column, i), true);
            }

            // Box walk: i splits into a column step and a within-box row
            // offset, tiled from the cell's own offset inside its box. Kept
            // exactly in this form; the guard skips coordinates sharing
            // either axis with this cell, which the row and column walks
            // above already cover.
            let box_index = i % rank;
            let column = self.column % rank + (i - box_index) / rank;
            let row = self.row % rank + box_index;
            if column != self.column && row != self.row {
                excluded.set(grid.value_at(column, row), true);
            }
        }

        let allowed: Candidates = (1..=length).filter(|&value| !excluded[value]).collect();
        if allowed.is_empty() {
            return Err(PuzzleError::NoCandidates {
                column: self.column,
                row: self.row,
            });
        }
        Ok(allowed)
    }

    /// Runs one elimination step for this cell.
    ///
    /// Returns `Ok(false)` without recomputing anything if the cell is given,
    /// or if it is already solved and `force` is not set. Otherwise the
    /// candidate set is recomputed against `grid`; when exactly one candidate
    /// remains it is committed as the solved value. The result reports
    /// whether the cell's value actually changed, so a forced re-solve that
    /// recommits the identical value reports no change.
    ///
    /// # Errors
    ///
    /// `NoCandidates` if the candidate set is empty.
    pub fn solve(&mut self, grid: &Grid, force: bool) -> Result<bool, PuzzleError> {
        if self.is_given() || (self.is_solved() && !force) {
            return Ok(false);
        }

        let allowed = self.allowed_values(grid)?;
        if let [value] = allowed.as_slice() {
            let changed = self.value() != *value;
            self.state = CellState::Solved(*value);
            return Ok(changed);
        }
        Ok(false)
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cell[{}, {}]", self.column, self.row)
    }
}
