use chess_style::config::Config;
use chess_style::table::{self, PlayerInput};
use chess_style::{clean, log};

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process;

/// Build per-player game tables from PGN archives.
#[derive(Parser)]
#[command(name = "chess-style")]
#[command(about = "Extract and clean per-player game tables from PGN archives")]
#[command(version)]
struct Args {
    /// JSON configuration file (defaults are used when omitted)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write one metadata row per game
    Metadata {
        /// Player and PGN path or glob, as NAME=PATH (repeatable)
        #[arg(short, long = "input", value_name = "NAME=PATH", required = true)]
        inputs: Vec<PlayerInput>,

        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },

    /// Write one early-game feature row per game
    Features {
        /// Player and PGN path or glob, as NAME=PATH (repeatable)
        #[arg(short, long = "input", value_name = "NAME=PATH", required = true)]
        inputs: Vec<PlayerInput>,

        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,

        /// Plies examined per game (overrides the configuration)
        #[arg(long, value_name = "N")]
        max_plies: Option<u32>,
    },

    /// Filter a metadata table down to serious, unique games
    Clean {
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },
}

fn load_config(path: Option<&Path>) -> chess_style::Result<Config> {
    match path {
        Some(path) => Config::load(path),
        None => Ok(Config::default()),
    }
}

fn run(args: Args) -> chess_style::Result<()> {
    let mut config = load_config(args.config.as_deref())?;

    match args.command {
        Command::Metadata { inputs, output } => {
            let rows = table::build_metadata_table(&inputs, &config)?;
            table::write_csv(&output, &rows)?;
            println!("Saved {} ({} games)", output.display(), rows.len());
        }
        Command::Features {
            inputs,
            output,
            max_plies,
        } => {
            if let Some(max_plies) = max_plies {
                config.max_plies = max_plies;
            }
            let rows = table::build_feature_table(&inputs, &config)?;
            table::write_csv(&output, &rows)?;
            println!("Saved {} ({} games)", output.display(), rows.len());
        }
        Command::Clean { input, output } => {
            let rows = table::read_metadata_csv(&input)?;
            let cleaned = clean(rows, &config.cleaning);
            table::write_csv(&output, &cleaned.rows)?;
            println!("Initial size: {}", cleaned.stats.input);
            println!("Final size: {}", cleaned.rows.len());
            println!("Saved: {}", output.display());
        }
    }

    Ok(())
}

fn main() {
    let args = Args::parse();
    if let Err(err) = run(args) {
        log::error(err.to_string());
        process::exit(1);
    }
}
