//! Thin CLI that builds a baseline savegame and writes it with `ttysave-core`.
//!
//! Mirrors the argument surface of the cartographic conversion utility this
//! workspace's codec was pulled out of, without reimplementing the
//! OpenStreetMap ingestion that utility did on top of the codec: it parses
//! the same flags, lays down the same baseline terrain (flat grass, unowned,
//! `max_initial_loan = 50000`), and writes the result.

use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use ttysave_core::{Savegame, Tile};

/// Baseline tile: flat grass, unowned. The original source's conversion
/// utility draws features onto exactly this terrain before anything else.
const BASELINE_HEIGHT: u8 = 1;
const BASELINE_OWNER: u8 = 0x10;
const BASELINE_TYPE: u8 = 0x03;
const BASELINE_MAX_INITIAL_LOAN: u16 = 50_000;

#[derive(Parser, Debug)]
#[command(name = "ttysave-convert", about = "Build a baseline savegame for a bounding box", version)]
struct Cli {
    /// Bounding-box half-width in degrees around LATITUDE, LONGITUDE
    #[arg(long, default_value_t = 0.1)]
    size: f64,

    /// Comma-separated town names to seed (reserved for the map-drawing
    /// pass this binary does not implement)
    #[arg(long)]
    towns: Option<String>,

    /// Comma-separated road tile references (reserved for the map-drawing
    /// pass this binary does not implement)
    #[arg(long)]
    roads: Option<String>,

    /// Input file (unused by the baseline-only conversion, kept for
    /// argument-surface compatibility)
    infile: PathBuf,

    /// Savegame to write
    outfile: PathBuf,

    /// Center latitude, in degrees
    latitude: f64,

    /// Center longitude, in degrees
    longitude: f64,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if !(-90.0..=90.0).contains(&cli.latitude) {
        eprintln!("error: latitude {} out of range [-90, 90]", cli.latitude);
        return ExitCode::FAILURE;
    }
    if !(-180.0..=180.0).contains(&cli.longitude) {
        eprintln!("error: longitude {} out of range [-180, 180]", cli.longitude);
        return ExitCode::FAILURE;
    }
    if cli.size <= 0.0 {
        eprintln!("error: --size must be positive, got {}", cli.size);
        return ExitCode::FAILURE;
    }

    let town_names: Vec<&str> = cli.towns.as_deref().map_or_else(Vec::new, |s| s.split(',').collect());
    if !town_names.is_empty() {
        eprintln!("note: --towns is accepted but map drawing is out of scope for this build");
    }
    if cli.roads.is_some() {
        eprintln!("note: --roads is accepted but map drawing is out of scope for this build");
    }

    let savegame = baseline_savegame(&cli.infile);

    let mut out = match File::create(&cli.outfile) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("error: could not create {}: {e}", cli.outfile.display());
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = savegame.save(&mut out) {
        eprintln!("error: could not write {}: {e}", cli.outfile.display());
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn baseline_savegame(infile: &PathBuf) -> Savegame {
    let title = infile.file_stem().and_then(|s| s.to_str()).unwrap_or("converted").to_string();

    Savegame {
        title,
        max_initial_loan: BASELINE_MAX_INITIAL_LOAN,
        tiles: vec![
            Tile { class: 0, height: BASELINE_HEIGHT, owner: BASELINE_OWNER, tile_type: BASELINE_TYPE };
            ttysave_core::layout::NUMBER_OF_TILES
        ],
        ..Savegame::default()
    }
}
