#![allow(dead_code, clippy::cast_precision_loss)]

use crate::sudoku::error::PuzzleError;
use crate::sudoku::file;
use crate::sudoku::grid::Grid;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tikv_jemalloc_ctl::{epoch, stats};

/// Defines the command-line interface for the sudoku solver application.
///
/// Uses `clap` for parsing arguments.
#[derive(Parser, Debug)]
#[command(
    name = "sudoku_solver",
    version,
    about = "A naked-single Sudoku eliminator"
)]
pub(crate) struct Cli {
    /// An optional global path argument. If provided without a subcommand,
    /// it's treated as the path to a puzzle file to solve.
    #[arg(global = true)]
    pub path: Option<PathBuf>,

    /// Specifies the subcommand to execute (e.g. `solve`, `dir`).
    #[clap(subcommand)]
    pub command: Option<Commands>,

    /// Common options applicable to all commands.
    #[command(flatten)]
    pub common: CommonOptions,
}

/// Enumerates the available subcommands for the sudoku solver.
#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Solve a puzzle file in the comma-separated grid format.
    Solve {
        /// Path to the puzzle file.
        #[arg(long)]
        path: PathBuf,

        /// If set, the resulting grid is also written to this path in the
        /// same comma-separated format.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve every puzzle file in a directory tree.
    Dir {
        /// Path to the directory containing puzzle files.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Defines common command-line options shared across different subcommands.
#[derive(Args, Debug, Default, Clone)]
pub(crate) struct CommonOptions {
    /// Enable debug output, printing the parsed grid and its dimensions
    /// before solving.
    #[arg(short, long, default_value_t = false)]
    pub(crate) debug: bool,

    /// Enable printing of puzzle and solve statistics.
    #[arg(short, long, default_value_t = true)]
    pub(crate) stats: bool,

    /// Re-evaluate cells that already hold a solved value.
    #[arg(short, long, default_value_t = false)]
    pub(crate) force: bool,
}

/// Solves a directory of puzzle files.
///
/// Walks the directory tree and solves every `.csv` or `.sudoku` file in it,
/// reporting each result in turn.
///
/// # Arguments
/// * `path` - The path to the directory containing puzzle files.
/// * `common` - Common options for the solver.
pub(crate) fn solve_dir(path: &PathBuf, common: &CommonOptions) -> Result<(), String> {
    if !path.is_dir() {
        eprintln!("Provided path is not a directory: {}", path.display());
        std::process::exit(1);
    }

    for entry in walkdir::WalkDir::new(path)
        .into_iter()
        .filter_map(Result::ok)
    {
        let file_path = entry.path().to_path_buf();
        if !file_path.is_file() {
            continue;
        }

        if file_path
            .extension()
            .is_none_or(|ext| ext != "csv" && ext != "sudoku")
        {
            eprintln!("Skipping non-puzzle file: {}", file_path.display());
            continue;
        }

        solve_and_report(&file_path, None, common)?;
    }

    Ok(())
}

/// Parses a puzzle file, solves it, and reports the result.
///
/// Prints the resulting grid, a statistics table when enabled, and a final
/// verdict line: `SOLVED` when no unknown cells remain, `INCOMPLETE` when
/// elimination stalled, or `CONTRADICTION` when a cell ran out of candidate
/// values.
///
/// # Arguments
/// * `path` - The puzzle file to solve.
/// * `output` - Optional path the resulting grid is written to.
/// * `common` - Common options (debug, stats, force).
///
/// # Errors
/// If the file does not exist, cannot be parsed, or the output cannot be
/// written.
pub(crate) fn solve_and_report(
    path: &PathBuf,
    output: Option<&PathBuf>,
    common: &CommonOptions,
) -> Result<(), String> {
    if !path.exists() {
        return Err(format!("Puzzle file does not exist: {}", path.display()));
    }

    if !path.is_file() {
        return Err(format!("Provided path is not a file: {}", path.display()));
    }

    println!("Solving: {}", path.display());

    let time = Instant::now();
    let mut grid = match file::parse_file(path) {
        Ok(grid) => grid,
        Err(e) => return Err(format!("Error parsing puzzle file: {e}")),
    };
    let parse_time = time.elapsed();

    if common.debug {
        println!("Parsed puzzle:\n{grid}");
        println!("Rank: {}", grid.rank());
        println!("Side length: {}", grid.length());
        println!("Cells: {}", grid.count());
    }

    let unknown_before = grid.count_unknown();
    let givens = given_count(&grid);

    epoch::advance().unwrap();

    let time = Instant::now();
    let outcome = grid.solve(common.force);
    let solve_time = time.elapsed();

    epoch::advance().unwrap();

    let allocated_bytes = stats::allocated::mib().unwrap().read().unwrap();
    let resident_bytes = stats::resident::mib().unwrap().read().unwrap();
    let allocated_mib = allocated_bytes as f64 / (1024.0 * 1024.0);
    let resident_mib = resident_bytes as f64 / (1024.0 * 1024.0);

    let verdict = match outcome {
        Ok(()) if grid.is_solved() => "SOLVED",
        Ok(()) => "INCOMPLETE",
        Err(PuzzleError::NoCandidates { column, row }) => {
            eprintln!("Contradiction: no values remain for cell ({column}, {row})");
            "CONTRADICTION"
        }
        Err(e) => return Err(format!("Error solving puzzle: {e}")),
    };

    if common.stats {
        print_stats(
            parse_time,
            solve_time,
            &grid,
            givens,
            unknown_before,
            allocated_mib,
            resident_mib,
        );
    }

    println!("\n{verdict}");
    println!("{grid}");

    if let Some(out) = output {
        if let Err(e) = file::write_file(out, &grid) {
            return Err(format!("Unable to write {}: {e}", out.display()));
        }
        println!("Grid written to: {}", out.display());
    }

    Ok(())
}

fn given_count(grid: &Grid) -> usize {
    (0..grid.length())
        .flat_map(|row| grid.row(row).unwrap())
        .filter(|cell| cell.is_given())
        .count()
}

/// Helper function to print a single statistic line in a formatted table row.
///
/// # Arguments
/// * `label` - The description of the statistic.
/// * `value` - The value of the statistic, implementing `std::fmt::Display`.
pub(crate) fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("|  {label:<28} {value:>18}  |");
}

/// Prints a summary of puzzle and solve statistics.
///
/// # Arguments
/// * `parse_time` - Duration spent parsing the input.
/// * `solve_time` - Duration spent in the elimination loop.
/// * `grid` - The grid after solving.
/// * `givens` - Number of given cells.
/// * `unknown_before` - Number of unknown cells before solving.
/// * `allocated` - Allocated memory in MiB.
/// * `resident` - Resident memory in MiB.
pub(crate) fn print_stats(
    parse_time: Duration,
    solve_time: Duration,
    grid: &Grid,
    givens: usize,
    unknown_before: usize,
    allocated: f64,
    resident: f64,
) {
    println!("\n=======================[ Puzzle Statistics ]=========================");
    stat_line("Parse time (s)", format!("{:.3}", parse_time.as_secs_f64()));
    stat_line("Rank", grid.rank());
    stat_line("Side length", grid.length());
    stat_line("Cells", grid.count());
    stat_line("Given values", givens);
    stat_line("Unknown (initial)", unknown_before);

    println!("========================[ Solve Statistics ]=========================");
    stat_line("Cells solved", unknown_before - grid.count_unknown());
    stat_line("Unknown remaining", grid.count_unknown());
    stat_line("Memory usage (MiB)", format!("{allocated:.2}"));
    stat_line("Resident memory (MiB)", format!("{resident:.2}"));
    stat_line("CPU time (s)", format!("{:.3}", solve_time.as_secs_f64()));
    println!("=====================================================================");
}
