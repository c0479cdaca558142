#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! A reader and writer for the comma-separated grid file format.
//!
//! The format is plain text: one line per row, `length` comma-separated
//! non-negative integers per line, `length` lines, where `length` must be a
//! perfect square. `0` denotes an unknown cell. Blank lines are skipped, and
//! whitespace around values is ignored.
//!
//! Reading derives the rank from the row count, constructs a grid, and
//! assigns every non-zero entry as a given value, so each clue is
//! constraint-checked at the moment it is placed; a file whose clues
//! contradict each other is rejected.

use crate::sudoku::cell::Value;
use crate::sudoku::error::FileError;
use crate::sudoku::grid::Grid;
use itertools::Itertools;
use std::io::{self, BufRead, Write};
use std::path::Path;

/// Builds a grid from fully materialized row data, as produced by the file
/// parser or by callers that already hold a value matrix.
///
/// # Errors
///
/// - `Empty` if `rows` holds no rows.
/// - `NotSquare` if the row count is not a perfect square.
/// - `Ragged` if any row's length differs from the row count.
/// - `Puzzle` if a non-zero entry is rejected by the grid's constraint
///   check.
pub fn grid_from_rows(rows: &[Vec<Value>]) -> Result<Grid, FileError> {
    if rows.is_empty() {
        return Err(FileError::Empty);
    }

    let length = rows.len();
    let rank = integer_sqrt(length);
    if rank * rank != length {
        return Err(FileError::NotSquare { rows: length });
    }

    for (row, values) in rows.iter().enumerate() {
        if values.len() != length {
            return Err(FileError::Ragged {
                line: row + 1,
                expected: length,
                found: values.len(),
            });
        }
    }

    let mut grid = Grid::new(rank)?;
    for (row, values) in rows.iter().enumerate() {
        for (column, &value) in values.iter().enumerate() {
            if value != 0 {
                grid.set_given(column, row, value)?;
            }
        }
    }
    Ok(grid)
}

/// Parses comma-separated grid data from a `BufRead` source.
///
/// Lines are consumed in order; each non-blank line becomes one grid row.
///
/// # Errors
///
/// `InvalidValue` for an unparsable token, `Io` if the reader fails, plus
/// everything [`grid_from_rows`] reports for the assembled rows.
pub fn parse_grid<R: BufRead>(reader: R) -> Result<Grid, FileError> {
    let mut rows: Vec<Vec<Value>> = Vec::new();

    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let values: Vec<Value> = trimmed
            .split(',')
            .map(|token| {
                let token = token.trim();
                token.parse::<Value>().map_err(|_| FileError::InvalidValue {
                    line: number + 1,
                    token: token.to_string(),
                })
            })
            .try_collect()?;

        rows.push(values);
    }

    grid_from_rows(&rows)
}

/// Parses a grid file specified by its path.
///
/// This is a convenience function that opens the file, wraps it in a
/// `BufReader`, and then calls [`parse_grid`].
///
/// # Errors
///
/// `Io` if the file cannot be opened or read; otherwise as [`parse_grid`].
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Grid, FileError> {
    let file = std::fs::File::open(path)?;
    parse_grid(io::BufReader::new(file))
}

/// Writes the grid to `writer` in the comma-separated format, rows ascending
/// and columns ascending within a row, `0` for unknown cells.
///
/// # Errors
///
/// Whatever the underlying writer reports.
pub fn write_grid<W: Write>(grid: &Grid, writer: &mut W) -> io::Result<()> {
    write!(writer, "{grid}")
}

/// Writes the grid to the given path, replacing any existing file.
///
/// # Errors
///
/// Whatever `std::fs::write` reports.
pub fn write_file<P: AsRef<Path>>(path: P, grid: &Grid) -> io::Result<()> {
    std::fs::write(path, grid.to_string())
}

fn integer_sqrt(n: usize) -> usize {
    let mut root = 0;
    while (root + 1) * (root + 1) <= n {
        root += 1;
    }
    root
}
