//! fwl - load fixed-width data files into DuckDB tables

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use tracing::Level;

use fixed_width_loader::LoaderConfig;
use fixed_width_loader::cli::commands::{CountArgs, LoadArgs, handle_count, handle_load};

/// Config file picked up from the working directory when `--config` is not given
const DEFAULT_CONFIG_FILE: &str = "fwl.toml";

#[derive(Parser)]
#[command(name = "fwl", version, about = "Load fixed-width data files into database tables")]
struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Database file path
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    /// Directory holding <table>.csv specification files
    #[arg(long, global = true)]
    spec_dir: Option<PathBuf>,

    /// Increase log verbosity
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load data files (default: every file in the data directory)
    Load {
        /// Data files to load
        files: Vec<PathBuf>,

        /// Directory scanned for data files
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Glob pattern for data files inside the data directory
        #[arg(long)]
        pattern: Option<String>,

        /// Print reports as JSON
        #[arg(long)]
        json: bool,
    },
    /// Count the rows stored in a table
    Count {
        /// Table name
        table: String,
    },
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => Level::WARN,
        (false, 0) => Level::INFO,
        (false, 1) => Level::DEBUG,
        (false, _) => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> anyhow::Result<LoaderConfig> {
    let mut config = match &cli.config {
        Some(path) => LoaderConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
            LoaderConfig::from_file(DEFAULT_CONFIG_FILE)
                .with_context(|| format!("loading config {}", DEFAULT_CONFIG_FILE))?
        }
        None => LoaderConfig::default(),
    };

    if let Some(database) = &cli.database {
        config = config.with_database(database.clone());
    }
    if let Some(spec_dir) = &cli.spec_dir {
        config = config.with_spec_dir(spec_dir.clone());
    }
    Ok(config)
}

fn run(cli: Cli) -> anyhow::Result<bool> {
    let mut config = load_config(&cli)?;

    match cli.command {
        Command::Load {
            files,
            data_dir,
            pattern,
            json,
        } => {
            if let Some(data_dir) = data_dir {
                config = config.with_data_dir(data_dir);
            }
            if let Some(pattern) = pattern {
                config = config.with_pattern(pattern);
            }

            let result = handle_load(&LoadArgs {
                config,
                files,
                json,
            })
            .context("load failed")?;
            Ok(result.failed == 0)
        }
        Command::Count { table } => {
            handle_count(&CountArgs { config, table }).context("count failed")?;
            Ok(true)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(2),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            ExitCode::FAILURE
        }
    }
}
