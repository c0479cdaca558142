#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Error types for grid construction, cell assignment, elimination, and the
//! puzzle file format.

use crate::sudoku::cell::Value;
use std::io;
use thiserror::Error;

/// Errors raised by the grid and cell model.
///
/// All of these are local, recoverable conditions surfaced to the caller;
/// "no single candidate yet" during solving is an ordinary `false` result,
/// never an error.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PuzzleError {
    /// A grid was constructed with rank 0, which has no cells and would
    /// divide by zero in the box arithmetic.
    #[error("grid rank must be at least 1")]
    InvalidDimension,

    /// A row or column coordinate fell outside `[0, length)`.
    #[error("index {index} out of bounds for a grid of side {length}")]
    IndexOutOfBounds {
        /// The offending coordinate.
        index: usize,
        /// The grid side length.
        length: usize,
    },

    /// An assigned value exceeds the grid side length.
    #[error("value {value} exceeds the maximum of {length}")]
    OutOfRange {
        /// The rejected value.
        value: Value,
        /// The grid side length, which is also the largest legal value.
        length: usize,
    },

    /// An assigned given value conflicts with the current row, column, or box
    /// state. The cell keeps whatever value it held before the assignment.
    #[error("value {value} is not allowed at ({column}, {row})")]
    NotAllowed {
        /// Column of the rejected assignment.
        column: usize,
        /// Row of the rejected assignment.
        row: usize,
        /// The rejected value.
        value: Value,
    },

    /// Elimination found zero legal values for a cell: the grid has reached
    /// an unsolvable, contradictory state.
    #[error("no candidate values remain for cell ({column}, {row})")]
    NoCandidates {
        /// Column of the contradictory cell.
        column: usize,
        /// Row of the contradictory cell.
        row: usize,
    },
}

/// Errors raised while reading or validating a puzzle file.
#[derive(Debug, Error)]
pub enum FileError {
    /// The underlying reader failed.
    #[error("failed to read puzzle data: {0}")]
    Io(#[from] io::Error),

    /// The file contained no rows at all.
    #[error("puzzle file is empty")]
    Empty,

    /// A token could not be parsed as a non-negative integer.
    #[error("line {line}: invalid value '{token}'")]
    InvalidValue {
        /// One-based line number of the offending row.
        line: usize,
        /// The unparsable token.
        token: String,
    },

    /// A row held a different number of values than there are rows.
    #[error("line {line} has {found} values, expected {expected}")]
    Ragged {
        /// One-based line number of the offending row.
        line: usize,
        /// The required number of values per row.
        expected: usize,
        /// The number of values actually present.
        found: usize,
    },

    /// The number of rows is not a perfect square, so no rank fits.
    #[error("a grid of {rows} rows has no integer rank")]
    NotSquare {
        /// The number of rows found.
        rows: usize,
    },

    /// A given value was rejected by the grid's constraint check.
    #[error(transparent)]
    Puzzle(#[from] PuzzleError),
}
