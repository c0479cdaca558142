#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The Sudoku grid: cell ownership, dimensions, iteration surface, and the
//! sequential fixed-point driver for the elimination algorithm.
//!
//! A grid of rank `R` has side length `R²` and `R⁴` cells, stored row-major
//! in a single allocation created at construction and never resized. Solving
//! runs full ascending-index passes over the cells until a pass commits no
//! new value; cells visited later in a pass observe values committed earlier
//! in the same pass. This sequential coupling is intentional and is why the
//! loop is not parallelised.

use crate::sudoku::cell::{Cell, Value};
use crate::sudoku::error::PuzzleError;
use itertools::Itertools;
use std::fmt::{self, Display};
use std::ops::Index;

/// A rank-2 sample puzzle that elimination solves completely.
pub const EXAMPLE_FOUR: [[Value; 4]; 4] = [
    [0, 0, 0, 0],
    [0, 0, 0, 4],
    [2, 0, 0, 3],
    [0, 3, 1, 2],
];

/// A rank-3 sample puzzle. Elimination resolves seven of its cells over
/// several passes and then stalls, which is the documented limit of the
/// naked-single rule: the remaining cells all keep two or more candidates.
pub const EXAMPLE_NINE: [[Value; 9]; 9] = [
    [1, 2, 0, 0, 0, 0, 0, 0, 8],
    [0, 0, 0, 0, 3, 2, 0, 0, 7],
    [0, 0, 0, 0, 0, 0, 0, 5, 0],
    [0, 0, 0, 0, 0, 5, 0, 0, 0],
    [0, 0, 0, 6, 0, 9, 0, 0, 2],
    [2, 5, 0, 0, 0, 3, 0, 0, 9],
    [9, 4, 0, 5, 0, 0, 6, 3, 0],
    [0, 0, 0, 0, 0, 7, 9, 6, 0],
    [0, 9, 1, 0, 0, 0, 0, 0, 0],
];

/// A square Sudoku grid of arbitrary rank.
///
/// The grid owns its cells; cells borrow the grid back for constraint
/// lookups and never outlive it. Assigning given values goes through
/// [`Grid::set_given`] so that every clue satisfies the row, column, and box
/// constraints against the rest of the grid at the moment it is placed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rank: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates a grid of the given rank with every cell unknown.
    ///
    /// # Errors
    ///
    /// `InvalidDimension` if `rank` is 0.
    pub fn new(rank: usize) -> Result<Self, PuzzleError> {
        if rank == 0 {
            return Err(PuzzleError::InvalidDimension);
        }

        let length = rank * rank;
        let cells = (0..length * length)
            .map(|index| Cell::new(index % length, index / length))
            .collect();

        Ok(Self { rank, cells })
    }

    /// The rank: the grid is `rank² × rank²`, tiled into `rank × rank` boxes.
    #[must_use]
    pub const fn rank(&self) -> usize {
        self.rank
    }

    /// The side length of the square grid, `rank²`.
    #[must_use]
    pub const fn length(&self) -> usize {
        self.rank * self.rank
    }

    /// The total number of cells, `length²`.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.length() * self.length()
    }

    fn cell_index(&self, column: usize, row: usize) -> Result<usize, PuzzleError> {
        let length = self.length();
        if column >= length {
            return Err(PuzzleError::IndexOutOfBounds {
                index: column,
                length,
            });
        }
        if row >= length {
            return Err(PuzzleError::IndexOutOfBounds { index: row, length });
        }
        Ok(row * length + column)
    }

    /// The raw value at an in-range coordinate, `0` for unknown cells.
    pub(crate) fn value_at(&self, column: usize, row: usize) -> Value {
        self.cells[row * self.length() + column].value()
    }

    /// The cell at `(column, row)`.
    ///
    /// # Errors
    ///
    /// `IndexOutOfBounds` if either coordinate is `length` or more.
    pub fn cell_at(&self, column: usize, row: usize) -> Result<&Cell, PuzzleError> {
        Ok(&self.cells[self.cell_index(column, row)?])
    }

    /// The `length` cells of row `row`, ascending by column.
    ///
    /// The sequence is lazy and restartable: call again for a fresh pass.
    ///
    /// # Errors
    ///
    /// `IndexOutOfBounds` if `row` is `length` or more.
    pub fn row(&self, row: usize) -> Result<impl Iterator<Item = &Cell>, PuzzleError> {
        let length = self.length();
        if row >= length {
            return Err(PuzzleError::IndexOutOfBounds { index: row, length });
        }
        Ok(self.cells[row * length..(row + 1) * length].iter())
    }

    /// The `length` cells of column `column`, ascending by row.
    ///
    /// The sequence is lazy and restartable: call again for a fresh pass.
    ///
    /// # Errors
    ///
    /// `IndexOutOfBounds` if `column` is `length` or more.
    pub fn column(&self, column: usize) -> Result<impl Iterator<Item = &Cell>, PuzzleError> {
        let length = self.length();
        if column >= length {
            return Err(PuzzleError::IndexOutOfBounds {
                index: column,
                length,
            });
        }
        Ok(self.cells.iter().skip(column).step_by(length))
    }

    /// The number of cells still unknown, recomputed on demand.
    #[must_use]
    pub fn count_unknown(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_unknown()).count()
    }

    /// Whether every cell holds a given or solved value.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_unknown())
    }

    /// Assigns a given value to the cell at `(column, row)`.
    ///
    /// Any prior given or solved value is cleared first, so the cell's own
    /// value never excludes itself and re-assigning a cell its existing value
    /// succeeds. The assignment must satisfy the row, column, and box
    /// constraints against the rest of the grid; a rejected assignment leaves
    /// the cell exactly as it was.
    ///
    /// # Errors
    ///
    /// - `OutOfRange` if `value` exceeds the side length. `0` is never a
    ///   legal given value and is rejected as `NotAllowed`.
    /// - `IndexOutOfBounds` if either coordinate is out of range.
    /// - `NotAllowed` if the value conflicts with the current row, column, or
    ///   box state.
    /// - `NoCandidates` if the rest of the grid already excludes every value
    ///   for this cell.
    pub fn set_given(&mut self, column: usize, row: usize, value: Value) -> Result<(), PuzzleError> {
        let length = self.length();
        if value > length {
            return Err(PuzzleError::OutOfRange { value, length });
        }

        let index = self.cell_index(column, row)?;
        let prior = self.cells[index];
        self.cells[index].reset();

        match self.cells[index].allowed_values(self) {
            Ok(allowed) if allowed.contains(&value) => {
                self.cells[index].mark_given(value);
                Ok(())
            }
            Ok(_) => {
                self.cells[index] = prior;
                Err(PuzzleError::NotAllowed { column, row, value })
            }
            Err(error) => {
                self.cells[index] = prior;
                Err(error)
            }
        }
    }

    /// Resets the cell at `(column, row)` back to unknown.
    ///
    /// # Errors
    ///
    /// `IndexOutOfBounds` if either coordinate is out of range.
    pub fn reset(&mut self, column: usize, row: usize) -> Result<(), PuzzleError> {
        let index = self.cell_index(column, row)?;
        self.cells[index].reset();
        Ok(())
    }

    /// Runs elimination passes until a full pass commits no new value.
    ///
    /// Each pass visits every cell in ascending index order; a cell visited
    /// later in a pass sees values committed earlier in the same pass. Given
    /// cells are never touched. Solved cells are skipped unless `force` is
    /// set, in which case they are re-evaluated and recommit their value.
    ///
    /// A grid where no cell ever reaches a single candidate simply stops with
    /// [`Grid::is_solved`] still false; that is the documented limit of
    /// naked-single elimination, not an error.
    ///
    /// # Errors
    ///
    /// `NoCandidates` as soon as any cell's candidate set is empty. The solve
    /// halts at that point; earlier commits from the interrupted pass remain
    /// in place.
    pub fn solve(&mut self, force: bool) -> Result<(), PuzzleError> {
        loop {
            let mut changed = false;

            for index in 0..self.cells.len() {
                let mut cell = self.cells[index];
                if cell.solve(self, force)? {
                    self.cells[index] = cell;
                    changed = true;
                }
            }

            if !changed {
                return Ok(());
            }
        }
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let length = self.length();
        for row in 0..length {
            let line = self.cells[row * length..(row + 1) * length]
                .iter()
                .map(Cell::value)
                .join(",");
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

impl Index<(usize, usize)> for Grid {
    type Output = Cell;

    /// Infallible coordinate access.
    ///
    /// # Panics
    ///
    /// If either coordinate is out of range; use [`Grid::cell_at`] for a
    /// fallible lookup.
    fn index(&self, (column, row): (usize, usize)) -> &Self::Output {
        match self.cell_at(column, row) {
            Ok(cell) => cell,
            Err(_) => panic!("coordinate ({column}, {row}) out of bounds"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sudoku::file::grid_from_rows;

    fn rows_of(values: &[[Value; 9]; 9]) -> Vec<Vec<Value>> {
        values.iter().map(|row| row.to_vec()).collect()
    }

    fn grid_values(grid: &Grid) -> Vec<Vec<Value>> {
        (0..grid.length())
            .map(|row| grid.row(row).unwrap().map(Cell::value).collect())
            .collect()
    }

    #[test]
    fn test_dimensions() {
        for rank in 1..=4 {
            let grid = Grid::new(rank).unwrap();
            assert_eq!(grid.rank(), rank);
            assert_eq!(grid.length(), rank * rank);
            assert_eq!(grid.count(), rank * rank * rank * rank);
        }
    }

    #[test]
    fn test_zero_rank_is_rejected() {
        assert_eq!(Grid::new(0).unwrap_err(), PuzzleError::InvalidDimension);
    }

    #[test]
    fn test_fresh_grid_is_fully_unknown() {
        let grid = Grid::new(3).unwrap();
        assert_eq!(grid.count_unknown(), grid.count());
        assert!(!grid.is_solved());
    }

    #[test]
    fn test_cell_coordinates() {
        let grid = Grid::new(4).unwrap();
        let cell = grid.cell_at(15, 3).unwrap();
        assert_eq!(cell.column(), 15);
        assert_eq!(cell.row(), 3);
    }

    #[test]
    fn test_cell_at_out_of_bounds() {
        let grid = Grid::new(2).unwrap();
        assert_eq!(
            grid.cell_at(4, 0).unwrap_err(),
            PuzzleError::IndexOutOfBounds { index: 4, length: 4 }
        );
        assert_eq!(
            grid.cell_at(0, 7).unwrap_err(),
            PuzzleError::IndexOutOfBounds { index: 7, length: 4 }
        );
    }

    #[test]
    fn test_index_operator_agrees_with_cell_at() {
        let grid = Grid::new(3).unwrap();
        assert_eq!(&grid[(4, 7)], grid.cell_at(4, 7).unwrap());
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_index_operator_panics_out_of_bounds() {
        let grid = Grid::new(2).unwrap();
        let _ = grid[(0, 9)];
    }

    #[test]
    fn test_row_iteration_order() {
        let mut grid = Grid::new(2).unwrap();
        grid.set_given(0, 1, 3).unwrap();
        grid.set_given(3, 1, 4).unwrap();

        let cells: Vec<&Cell> = grid.row(1).unwrap().collect();
        assert_eq!(cells.len(), 4);
        for (column, cell) in cells.iter().enumerate() {
            assert_eq!(cell.column(), column);
            assert_eq!(cell.row(), 1);
        }
        assert_eq!(cells[0].value(), 3);
        assert_eq!(cells[3].value(), 4);
    }

    #[test]
    fn test_column_iteration_order() {
        let mut grid = Grid::new(2).unwrap();
        grid.set_given(2, 0, 1).unwrap();
        grid.set_given(2, 3, 4).unwrap();

        let cells: Vec<&Cell> = grid.column(2).unwrap().collect();
        assert_eq!(cells.len(), 4);
        for (row, cell) in cells.iter().enumerate() {
            assert_eq!(cell.column(), 2);
            assert_eq!(cell.row(), row);
        }
        assert_eq!(cells[0].value(), 1);
        assert_eq!(cells[3].value(), 4);
    }

    #[test]
    fn test_row_and_column_out_of_bounds() {
        let grid = Grid::new(2).unwrap();
        assert!(grid.row(4).is_err());
        assert!(grid.column(4).is_err());
    }

    #[test]
    fn test_row_is_restartable() {
        let mut grid = Grid::new(2).unwrap();
        grid.set_given(1, 0, 2).unwrap();

        let first: Vec<Value> = grid.row(0).unwrap().map(Cell::value).collect();
        let second: Vec<Value> = grid.row(0).unwrap().map(Cell::value).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_set_given_marks_cell() {
        let mut grid = Grid::new(3).unwrap();
        grid.set_given(8, 8, 5).unwrap();

        let cell = grid.cell_at(8, 8).unwrap();
        assert!(cell.is_given());
        assert!(!cell.is_unknown());
        assert!(!cell.is_solved());
        assert_eq!(cell.value(), 5);
    }

    #[test]
    fn test_set_given_out_of_range() {
        let mut grid = Grid::new(3).unwrap();
        assert_eq!(
            grid.set_given(4, 7, 150).unwrap_err(),
            PuzzleError::OutOfRange {
                value: 150,
                length: 9
            }
        );
        assert!(grid.cell_at(4, 7).unwrap().is_unknown());
    }

    #[test]
    fn test_set_given_row_conflict_preserves_prior() {
        let mut grid = Grid::new(3).unwrap();
        grid.set_given(0, 0, 5).unwrap();
        grid.set_given(8, 0, 3).unwrap();

        assert_eq!(
            grid.set_given(8, 0, 5).unwrap_err(),
            PuzzleError::NotAllowed {
                column: 8,
                row: 0,
                value: 5
            }
        );
        assert_eq!(grid.cell_at(8, 0).unwrap().value(), 3);
        assert!(grid.cell_at(8, 0).unwrap().is_given());
    }

    #[test]
    fn test_set_given_column_conflict() {
        let mut grid = Grid::new(3).unwrap();
        grid.set_given(0, 0, 5).unwrap();
        assert_eq!(
            grid.set_given(0, 8, 5).unwrap_err(),
            PuzzleError::NotAllowed {
                column: 0,
                row: 8,
                value: 5
            }
        );
        assert!(grid.cell_at(0, 8).unwrap().is_unknown());
    }

    #[test]
    fn test_set_given_box_conflict() {
        let mut grid = Grid::new(3).unwrap();
        grid.set_given(1, 1, 5).unwrap();
        assert_eq!(
            grid.set_given(0, 0, 5).unwrap_err(),
            PuzzleError::NotAllowed {
                column: 0,
                row: 0,
                value: 5
            }
        );
        assert!(grid.cell_at(0, 0).unwrap().is_unknown());
    }

    #[test]
    fn test_set_given_same_value_twice() {
        let mut grid = Grid::new(3).unwrap();
        grid.set_given(4, 7, 5).unwrap();
        grid.set_given(4, 7, 5).unwrap();
        assert_eq!(grid.cell_at(4, 7).unwrap().value(), 5);
    }

    #[test]
    fn test_set_given_replaces_given() {
        let mut grid = Grid::new(3).unwrap();
        grid.set_given(4, 7, 5).unwrap();
        grid.set_given(4, 7, 6).unwrap();
        assert_eq!(grid.cell_at(4, 7).unwrap().value(), 6);
    }

    #[test]
    fn test_set_given_zero_is_rejected() {
        let mut grid = Grid::new(3).unwrap();
        grid.set_given(4, 7, 5).unwrap();
        assert!(matches!(
            grid.set_given(4, 7, 0),
            Err(PuzzleError::NotAllowed { .. })
        ));
        assert_eq!(grid.cell_at(4, 7).unwrap().value(), 5);
    }

    #[test]
    fn test_set_given_clears_solved_value() {
        let mut grid = Grid::new(3).unwrap();
        for column in 0..9 {
            if column != 4 {
                grid.set_given(column, 0, column + 1).unwrap();
            }
        }
        grid.solve(false).unwrap();
        assert!(grid.cell_at(4, 0).unwrap().is_solved());

        grid.set_given(4, 0, 5).unwrap();
        let cell = grid.cell_at(4, 0).unwrap();
        assert!(cell.is_given());
        assert!(!cell.is_solved());
        assert_eq!(cell.value(), 5);
    }

    #[test]
    fn test_reset_returns_cell_to_unknown() {
        let mut grid = Grid::new(3).unwrap();
        grid.set_given(2, 2, 4).unwrap();
        grid.reset(2, 2).unwrap();
        assert!(grid.cell_at(2, 2).unwrap().is_unknown());
    }

    #[test]
    fn test_solve_trivial_rank_one() {
        let mut grid = Grid::new(1).unwrap();
        grid.solve(false).unwrap();
        assert!(grid.is_solved());
        assert_eq!(grid.cell_at(0, 0).unwrap().value(), 1);
    }

    #[test]
    fn test_solve_empty_grid_changes_nothing() {
        let mut grid = Grid::new(3).unwrap();
        grid.solve(true).unwrap();
        assert!(!grid.is_solved());
        assert_eq!(grid.count_unknown(), grid.count());
    }

    #[test]
    fn test_solve_resolves_single_missing_value() {
        let mut grid = Grid::new(3).unwrap();
        for column in 0..9 {
            if column != 4 {
                grid.set_given(column, 0, column + 1).unwrap();
            }
        }

        grid.solve(false).unwrap();
        let cell = grid.cell_at(4, 0).unwrap();
        assert!(cell.is_solved());
        assert_eq!(cell.value(), 5);
        assert_eq!(grid.count_unknown(), grid.count() - 9);
    }

    #[test]
    fn test_solve_completes_example_four() {
        let rows: Vec<Vec<Value>> = EXAMPLE_FOUR.iter().map(|row| row.to_vec()).collect();
        let mut grid = grid_from_rows(&rows).unwrap();

        grid.solve(false).unwrap();
        assert!(grid.is_solved());
        assert_eq!(
            grid_values(&grid),
            vec![
                vec![3, 4, 2, 1],
                vec![1, 2, 3, 4],
                vec![2, 1, 4, 3],
                vec![4, 3, 1, 2],
            ]
        );
    }

    #[test]
    fn test_solve_example_nine_stalls_after_progress() {
        let mut grid = grid_from_rows(&rows_of(&EXAMPLE_NINE)).unwrap();
        let before = grid.count_unknown();

        grid.solve(false).unwrap();
        assert!(!grid.is_solved());
        assert_eq!(grid.count_unknown(), before - 7);
        assert_eq!(grid.cell_at(5, 0).unwrap().value(), 6);
        assert_eq!(grid.cell_at(5, 2).unwrap().value(), 1);
        assert_eq!(grid.cell_at(5, 8).unwrap().value(), 4);
        assert!(grid.cell_at(5, 0).unwrap().is_solved());
    }

    #[test]
    fn test_solve_is_idempotent() {
        let mut grid = grid_from_rows(&rows_of(&EXAMPLE_NINE)).unwrap();
        grid.solve(false).unwrap();
        let snapshot = grid.clone();

        grid.solve(false).unwrap();
        assert_eq!(grid, snapshot);
    }

    #[test]
    fn test_forced_resolve_recommits_identical_values() {
        let mut grid = grid_from_rows(&rows_of(&EXAMPLE_NINE)).unwrap();
        grid.solve(false).unwrap();
        let snapshot = grid.clone();

        grid.solve(true).unwrap();
        assert_eq!(grid, snapshot);
    }

    #[test]
    fn test_solve_propagates_contradiction() {
        let mut grid = Grid::new(3).unwrap();
        for column in 1..9 {
            grid.set_given(column, 0, column).unwrap();
        }
        grid.set_given(0, 5, 9).unwrap();

        assert_eq!(
            grid.solve(false).unwrap_err(),
            PuzzleError::NoCandidates { column: 0, row: 0 }
        );
    }

    #[test]
    fn test_display_renders_rows() {
        let mut grid = Grid::new(2).unwrap();
        grid.set_given(0, 0, 1).unwrap();
        grid.set_given(3, 3, 2).unwrap();
        assert_eq!(grid.to_string(), "1,0,0,0\n0,0,0,0\n0,0,0,0\n0,0,0,2\n");
    }
}
