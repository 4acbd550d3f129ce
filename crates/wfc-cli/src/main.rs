//! Command-line driver for the overlapping WFC core.
//!
//! Reads one or more plain-text exemplar grids (one tile character per
//! column, one row per line), builds a catalog and adjacency rules from
//! them, runs the solver, and prints the resulting grid. Loading and
//! sanitizing training grids is this binary's job, not the core's — see
//! `wfc_core`'s crate docs.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use wfc_core::{solve, AdjacencyRules, Catalog, Grid, SolveConfig, TileAdjacency, WfcError};

#[derive(Parser, Debug)]
#[command(name = "wfc", about = "Overlapping Wave Function Collapse tile generator")]
struct Args {
    /// One or more plain-text exemplar files (one tile char per column).
    #[arg(required = true)]
    training: Vec<PathBuf>,

    /// Overlapping window size (N in N×N).
    #[arg(long, default_value_t = 3)]
    pattern_size: usize,

    /// Output width in cells.
    #[arg(long, default_value_t = 32)]
    width: usize,

    /// Output height in cells.
    #[arg(long, default_value_t = 32)]
    height: usize,

    /// RNG seed for reproducible output.
    #[arg(long)]
    seed: Option<u64>,

    /// Retry cap for contradictions.
    #[arg(long, default_value_t = 1000)]
    max_attempts: u32,

    /// Disable the center-tile adjacency filter (border overlap only).
    #[arg(long)]
    no_center_filter: bool,

    /// Write the result here instead of printing to stdout.
    #[arg(long)]
    output: Option<PathBuf>,
}

fn load_exemplar(path: &PathBuf) -> Result<Grid<char>, String> {
    let text = fs::read_to_string(path).map_err(|e| format!("{}: {e}", path.display()))?;
    let rows: Vec<Vec<char>> = text.lines().map(|line| line.chars().collect()).collect();

    if rows.is_empty() {
        return Ok(Grid::new(0, 0, Vec::new()));
    }

    let width = rows[0].len();
    if rows.iter().any(|row| row.len() != width) {
        return Err(format!("{}: all rows must have equal width", path.display()));
    }

    let height = rows.len();
    let cells: Vec<char> = rows.into_iter().flatten().collect();
    Ok(Grid::new(width, height, cells))
}

fn run(args: Args) -> Result<(), String> {
    let exemplars: Vec<Grid<char>> = args
        .training
        .iter()
        .map(load_exemplar)
        .collect::<Result<_, _>>()?;

    let catalog = Catalog::build(&exemplars, args.pattern_size).map_err(describe_wfc_error)?;
    eprintln!(
        "loaded {} exemplar(s), catalog has {} distinct {}x{} patterns",
        exemplars.len(),
        catalog.len(),
        args.pattern_size,
        args.pattern_size,
    );

    let tile_adjacency = TileAdjacency::build(&exemplars);
    let rules = AdjacencyRules::compile(&catalog, &tile_adjacency, !args.no_center_filter);

    let config = SolveConfig {
        pattern_size: args.pattern_size,
        output_width: args.width,
        output_height: args.height,
        seed: args.seed,
        max_attempts: args.max_attempts,
        use_center_tile_filter: !args.no_center_filter,
    };

    let grid = solve(&catalog, &rules, &config).map_err(describe_wfc_error)?;

    let mut rendered = String::with_capacity(grid.width * grid.height + grid.height);
    for row in grid.rows() {
        rendered.extend(row.iter());
        rendered.push('\n');
    }

    match args.output {
        Some(path) => fs::write(&path, &rendered).map_err(|e| format!("{}: {e}", path.display()))?,
        None => print!("{rendered}"),
    }

    Ok(())
}

fn describe_wfc_error(err: WfcError) -> String {
    err.to_string()
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}
