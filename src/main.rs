use std::path::PathBuf;
use std::{fs, process};

use clap::Parser;
use fuchsine::{Board, SearchStrategy, SolverConfig};

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let cli = Cli::parse();

    let text = fs::read_to_string(&cli.puzzle)
        .map_err(|err| format!("cannot read {}: {err}", cli.puzzle.display()))?;
    let board: Board = text.parse()
        .map_err(|reasons| format!("bad puzzle {}: {reasons:?}", cli.puzzle.display()))?;

    println!("{board}");

    let strategy = match cli.naive {
        true => SearchStrategy::Naive { seed: cli.seed },
        false => SearchStrategy::Propagating,
    };

    let (outcome, report) = board.solve_with(SolverConfig { strategy });
    match outcome {
        Ok(solved) => println!("{solved}"),
        Err(_) => println!("No solution."),
    }
    println!("{} steps in {:?}", report.steps, report.elapsed);

    Ok(())
}

#[derive(Parser)]
#[command(name = "fuchsine", version, about = "Numberlink and Flow Free solver")]
struct Cli {
    /// Puzzle file: one row per line, '.' or '_' for open cells, any other character
    /// at the two endpoints of its color.
    puzzle: PathBuf,

    /// Use the unpruned randomized search instead of the propagating one.
    #[arg(long)]
    naive: bool,

    /// Seed for the randomized search.
    #[arg(long, default_value_t = 0, requires = "naive")]
    seed: u64,
}
