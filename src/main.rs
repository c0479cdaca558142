//! # `sudoku_solver`
//!
//! `sudoku_solver` is a command-line solver for generalized Sudoku puzzles in
//! a comma-separated grid format. Puzzles of any rank are supported: a rank-R
//! puzzle has side length R², tiled into R×R boxes.
//!
//! Solving is pure constraint elimination: every still-unknown cell's
//! candidate set is recomputed against its row, column, and box, and a value
//! is committed only when exactly one candidate remains (a naked single).
//! There is no backtracking and no search, so puzzles that require guessing
//! terminate with unknown cells remaining and the verdict `INCOMPLETE`.
//!
//! ## Usage
//!
//! ```sh
//! # Solve a single puzzle file
//! sudoku_solver puzzle.csv
//!
//! # Same, with an explicit subcommand and an output file
//! sudoku_solver solve --path puzzle.csv --output solution.csv
//!
//! # Solve every .csv / .sudoku file under a directory
//! sudoku_solver dir --path puzzles/
//!
//! # Generate shell completions
//! sudoku_solver completions bash
//! ```
//!
//! ### Common Options
//!
//! -   `-d, --debug`: Print the parsed grid and its dimensions (default: `false`).
//! -   `-s, --stats`: Print a statistics table after solving (default: `true`).
//! -   `-f, --force`: Re-evaluate cells that already hold a solved value
//!     (default: `false`).
//!
//! This file contains the main entry point and dispatches to the handlers in
//! the `command_line` module.

use crate::command_line::cli::{Cli, Commands, solve_and_report, solve_dir};
use clap::{CommandFactory, Parser};

mod command_line;
mod sudoku;

/// Global allocator using `tikv-jemallocator` for potentially better
/// performance and memory usage tracking.
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

/// Main entry point of the sudoku solver application.
///
/// Parses command-line arguments, dispatches to the appropriate command
/// handler, and manages the overall execution flow.
fn main() {
    let cli = Cli::parse();

    // Handle the case where a path is provided globally without a subcommand.
    if let Some(path) = cli.path.clone() {
        if cli.command.is_none() {
            if let Err(e) = solve_and_report(&path, None, &cli.common) {
                eprintln!("{e}");
                std::process::exit(1);
            }
            return;
        }
    }

    match cli.command {
        Some(Commands::Solve {
            path,
            output,
            common,
        }) => {
            if let Err(e) = solve_and_report(&path, output.as_ref(), &common) {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }

        Some(Commands::Dir { path, common }) => {
            if let Err(e) = solve_dir(&path, &common) {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }

        Some(Commands::Completions { shell }) => {
            let mut command = Cli::command();
            clap_complete::generate(shell, &mut command, "sudoku_solver", &mut std::io::stdout());
        }

        None => {
            // This case is reached if no subcommand was provided and
            // `cli.path` was also None.
            if cli.path.is_none() {
                eprintln!("No command provided. Use --help for more information.");
                std::process::exit(1);
            }
        }
    }
}
