//! # GridSolver
//!
//! `GridSolver` is a command-line front end for the breadth-first
//! Sudoku-style grid solver. It plays the role of the original grid
//! editor: it collects an initial board, hands it to the search engine,
//! and renders either the completed board or an explicit "unsolvable"
//! report — never a blank or partial result.
//!
//! ## Usage
//!
//! ```sh
//! # Solve a puzzle file (one row per line, `.`/`_`/`0` for blanks)
//! grid-solver puzzles/easy9.grid
//!
//! # The same, spelled out
//! grid-solver file --path puzzles/easy9.grid
//!
//! # Solve a board given inline
//! grid-solver text --input "1 2 .\n. . .\n. . ."
//!
//! # Harden the search: deduplicate repeated states, cap expansions
//! grid-solver file --path puzzles/easy9.grid --dedup --max-expansions 1000000
//!
//! # Shell completions
//! grid-solver completions bash
//! ```
//!
//! After each solve the driver prints a statistics table (expansion and
//! pruning rates, peak frontier size, jemalloc memory figures, CPU time)
//! and verifies that the returned board is a goal state agreeing with
//! every given cell.

use clap::{Args, CommandFactory, Parser, Subcommand};
use grid_solver::search::engine::{Bfs, SearchStats, SolveError};
use grid_solver::search::frontier::{DedupFrontier, FifoFrontier, Frontier};
use grid_solver::search::grid::Grid;
use grid_solver::search::parse::{parse_grid, parse_grid_file};
use grid_solver::search::rules;
use std::io::Cursor;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tikv_jemalloc_ctl::{epoch, stats};

/// Global allocator using `tikv-jemallocator`. A frontier search is
/// memory-bound, so the allocator's usage counters are the headline
/// diagnostic in the stats report.
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

/// Defines the command-line interface for the grid solver.
///
/// Uses `clap` for parsing arguments.
#[derive(Parser, Debug)]
#[command(
    name = "GridSolver",
    version,
    about = "A breadth-first Sudoku-style grid solver"
)]
struct Cli {
    /// An optional global path argument. If provided without a
    /// subcommand, it's treated as the path to a puzzle file to solve.
    #[arg(global = true)]
    path: Option<PathBuf>,

    /// Specifies the subcommand to execute (e.g. `file`, `text`).
    #[clap(subcommand)]
    command: Option<Commands>,

    /// Common options applicable to all commands.
    #[command(flatten)]
    common: CommonOptions,
}

/// Enumerates the available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Solve a puzzle file. One board row per line; cells are
    /// whitespace-separated with `0`, `.` or `_` for blanks and `#` for
    /// comment lines.
    File {
        /// Path to the puzzle file.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve a board provided as inline text, in the same format as a
    /// puzzle file (e.g. "1 2 .\n. . .\n. . .").
    Text {
        /// The board text.
        #[arg(short, long)]
        input: String,

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

/// Defines common command-line options shared across subcommands.
#[derive(Args, Debug, Default, Clone)]
struct CommonOptions {
    /// Enable debug output, printing the parsed board and raw results.
    #[arg(short, long, default_value_t = false)]
    debug: bool,

    /// Re-check the returned board: it must be completely filled,
    /// conflict-free, and agree with every given cell.
    #[arg(short, long, default_value_t = true)]
    verify: bool,

    /// Print the statistics table after solving.
    #[arg(short, long, default_value_t = true)]
    stats: bool,

    /// Print the solved board.
    #[arg(short, long, default_value_t = true)]
    print_solution: bool,

    /// Drop repeated board states from the frontier instead of queueing
    /// them again.
    #[arg(long, default_value_t = false)]
    dedup: bool,

    /// Give up after this many node expansions. Unset means the search
    /// runs unbounded, exactly like the original algorithm.
    #[arg(long)]
    max_expansions: Option<usize>,
}

fn main() {
    let cli = Cli::parse();

    // A bare path without a subcommand solves that file.
    if let Some(path) = cli.path.clone() {
        if cli.command.is_none() {
            if let Err(e) = solve_file(&path, &cli.common) {
                eprintln!("{e}");
                std::process::exit(1);
            }
            return;
        }
    }

    let result = match cli.command {
        Some(Commands::File { path, common }) => solve_file(&path, &common),
        Some(Commands::Text { input, common }) => solve_text(&input, &common),
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "grid-solver", &mut std::io::stdout());
            Ok(())
        }
        None => {
            eprintln!("No command provided. Use --help for more information.");
            std::process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

/// Solve a puzzle file.
///
/// # Errors
///
/// If the file does not exist or does not parse as a valid grid.
fn solve_file(path: &PathBuf, common: &CommonOptions) -> Result<(), String> {
    if !path.is_file() {
        return Err(format!("Puzzle file does not exist: {}", path.display()));
    }

    let time = Instant::now();
    let grid =
        parse_grid_file(path).map_err(|e| format!("Error parsing {}: {e}", path.display()))?;
    let parse_time = time.elapsed();

    println!("Solving: {}", path.display());
    solve_and_report(&grid, common, parse_time);
    Ok(())
}

/// Solve a board given as inline text.
///
/// # Errors
///
/// If the text does not parse as a valid grid.
fn solve_text(input: &str, common: &CommonOptions) -> Result<(), String> {
    let time = Instant::now();
    // Shells pass `\n` through literally, so unescape it before parsing.
    let unescaped = input.replace("\\n", "\n");
    let grid =
        parse_grid(Cursor::new(unescaped)).map_err(|e| format!("Error parsing input: {e}"))?;
    let parse_time = time.elapsed();

    solve_and_report(&grid, common, parse_time);
    Ok(())
}

/// Runs the engine with the frontier and budget selected by `common`.
fn run_solver(
    grid: &Grid,
    common: &CommonOptions,
) -> (Result<Grid, SolveError>, Duration, SearchStats) {
    if common.dedup {
        run_with::<DedupFrontier>(grid, common)
    } else {
        run_with::<FifoFrontier>(grid, common)
    }
}

/// Runs the engine over a specific frontier implementation.
fn run_with<F: Frontier>(
    grid: &Grid,
    common: &CommonOptions,
) -> (Result<Grid, SolveError>, Duration, SearchStats) {
    epoch::advance().unwrap();

    let time = Instant::now();

    let mut engine: Bfs<F> = match common.max_expansions {
        Some(budget) => Bfs::with_budget(budget),
        None => Bfs::new(),
    };
    let result = engine.solve(grid);

    let elapsed = time.elapsed();

    if common.debug {
        println!("Result: {result:?}");
        println!("Time: {elapsed:?}");
    }

    (result, elapsed, *engine.stats())
}

/// Checks a returned board against the initial one: it must be a goal
/// state and agree with every given cell. Failures panic; a solver that
/// invents or moves givens is broken, not unlucky.
fn verify_solution(initial: &Grid, result: Result<&Grid, &SolveError>) {
    match result {
        Ok(solved) => {
            let mut ok = rules::is_goal(solved);
            for row in 0..initial.size() {
                for col in 0..initial.size() {
                    let given = initial.value(row, col);
                    if given != 0 && solved.value(row, col) != given {
                        ok = false;
                    }
                }
            }
            println!("Verified: {ok:?}");
            assert!(ok, "Solution failed verification!");
        }
        Err(_) => println!("No solution to verify"),
    }
}

/// Solves a parsed grid and reports the outcome, statistics and
/// verification, in that order.
fn solve_and_report(grid: &Grid, common: &CommonOptions, parse_time: Duration) {
    if common.debug {
        println!("Parsed board:\n{grid}");
        println!("Size: {}", grid.size());
        println!("Givens: {}", grid.filled_count());
    }

    let (result, elapsed, search_stats) = run_solver(grid, common);

    epoch::advance().unwrap();

    let allocated_bytes = stats::allocated::mib().unwrap().read().unwrap();
    let resident_bytes = stats::resident::mib().unwrap().read().unwrap();

    let allocated_mib = allocated_bytes as f64 / (1024.0 * 1024.0);
    let resident_mib = resident_bytes as f64 / (1024.0 * 1024.0);

    if common.verify {
        verify_solution(grid, result.as_ref());
    }

    if common.stats {
        print_stats(
            parse_time,
            elapsed,
            grid,
            &search_stats,
            allocated_mib,
            resident_mib,
        );
    }

    match result {
        Ok(solved) => {
            if common.print_solution {
                println!("Solution:\n{solved}");
            }
            println!("\nSOLVED");
        }
        Err(SolveError::NoSolution) => println!("\nUNSOLVABLE"),
        Err(SolveError::BudgetExhausted { expanded }) => {
            println!("\nBUDGET EXHAUSTED after {expanded} expansions");
        }
    }
}

/// Helper function to print a single statistic line in a formatted table
/// row.
fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("|  {label:<28} {value:>18}  |");
}

/// Helper function to print a statistic line that includes a rate
/// (value/second).
fn stat_line_with_rate(label: &str, value: usize, elapsed: f64) {
    let rate = if elapsed > 0.0 {
        value as f64 / elapsed
    } else {
        0.0
    };
    println!("|  {label:<20} {value:>12} ({rate:>9.0}/sec)  |");
}

/// Prints a summary of problem and search statistics.
#[allow(clippy::cast_precision_loss)]
fn print_stats(
    parse_time: Duration,
    elapsed: Duration,
    grid: &Grid,
    s: &SearchStats,
    allocated: f64,
    resident: f64,
) {
    let elapsed_secs = elapsed.as_secs_f64();
    let cells = grid.size() * grid.size();

    println!("\n=======================[ Problem Statistics ]========================");
    stat_line("Parse time (s)", format!("{:.3}", parse_time.as_secs_f64()));
    stat_line("Board size", format!("{0}x{0}", grid.size()));
    stat_line("Givens", grid.filled_count());
    stat_line("Empty cells", cells - grid.filled_count());

    println!("========================[ Search Statistics ]========================");
    stat_line_with_rate("Expanded", s.expanded, elapsed_secs);
    stat_line_with_rate("Generated", s.generated, elapsed_secs);
    stat_line_with_rate("Pruned", s.pruned, elapsed_secs);
    stat_line("Peak frontier", s.peak_frontier);
    match s.solution_depth {
        Some(depth) => stat_line("Solution depth", depth),
        None => stat_line("Solution depth", "-"),
    }
    stat_line("Memory usage (MiB)", format!("{allocated:.2}"));
    stat_line("Resident memory (MiB)", format!("{resident:.2}"));
    stat_line("CPU time (s)", format!("{elapsed_secs:.3}"));
    println!("=====================================================================");
}
