//! dungen: generate seeded room-and-corridor dungeons
//!
//! Main entry point for the command-line driver.

mod logging;

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{info, warn};

use dungen_core::dungeon::{Dungeon, DungeonRequest, RoomType, generate_dungeon};
use dungen_core::{GenRng, GeneratorConfig};

/// How generated dungeons are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Tile-code text dump
    Text,
    /// Full result as JSON
    Json,
}

/// Seeded dungeon generator
#[derive(Parser, Debug)]
#[command(name = "dungen")]
#[command(author, version, about = "Generate room-and-corridor dungeons", long_about = None)]
struct Args {
    /// Number of regular rooms
    #[arg(short = 'r', long = "rooms", default_value_t = 8)]
    rooms: usize,

    /// Also place an exit tile
    #[arg(long = "exit")]
    exit: bool,

    /// Special rooms to add (secret, radiation, key-locked, collapsed)
    #[arg(short = 's', long = "special", value_delimiter = ',')]
    special: Vec<RoomType>,

    /// RNG seed (random when omitted)
    #[arg(long = "seed")]
    seed: Option<u64>,

    /// Number of dungeons to generate from the same RNG
    #[arg(short = 'n', long = "count", default_value_t = 1)]
    count: usize,

    /// Append output to this file instead of stdout
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Output format
    #[arg(long = "format", value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Generator configuration as JSON (missing fields use defaults)
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Increase log verbosity (repeatable)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::setup_logging(args.verbose).context("failed to install logger")?;

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => GeneratorConfig::default(),
    };

    let mut rng = match args.seed {
        Some(seed) => GenRng::new(seed),
        None => GenRng::from_entropy(),
    };
    info!("using seed {}", rng.seed());

    let request = DungeonRequest {
        room_count: args.rooms,
        with_exit: args.exit,
        special_rooms: args.special.clone(),
    };

    let mut out = open_output(args.output.as_deref())?;
    for i in 0..args.count {
        let seed = rng.seed();
        let dungeon = generate_dungeon(&request, &config, &mut rng)
            .with_context(|| format!("dungeon {} of {} (seed {seed})", i + 1, args.count))?;
        for warning in dungeon.warnings() {
            warn!("dungeon {}: {}", i + 1, warning);
        }
        write_dungeon(&mut out, &dungeon, args.format)?;
    }
    out.flush().context("failed to flush output")?;

    Ok(())
}

/// Read a JSON generator configuration
fn load_config(path: &Path) -> Result<GeneratorConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config: GeneratorConfig = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    Ok(config)
}

fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            Ok(Box::new(io::BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}

fn write_dungeon(out: &mut dyn Write, dungeon: &Dungeon, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => write!(out, "{dungeon}")?,
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, dungeon).context("failed to encode dungeon")?;
            writeln!(out)?;
        }
    }
    Ok(())
}
