use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use ncprocessor::commands::{init_config, process_files, ProcessOptions};

/// ncprocessor - insert G0 rapid moves into NC files
#[derive(Parser)]
#[command(name = "ncprocessor")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process NC files, writing <name>_processed.<ext> next to each
    Process {
        /// Input files
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Minimum X drop that triggers a G0 prefix
        #[arg(short, long)]
        threshold: Option<f64>,

        /// Suffix inserted before the output file's extension
        #[arg(short, long)]
        suffix: Option<String>,

        /// Config file (defaults to ./ncprocessor.toml if present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Process files without the expected extension without asking
        #[arg(short, long)]
        yes: bool,

        /// Report modifications without writing output files
        #[arg(long)]
        dry_run: bool,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a default ncprocessor.toml
    Init {
        /// Directory for the config file (defaults to current directory)
        #[arg(short, long)]
        path: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    // Set up logging
    let level = if cli.verbose { LevelFilter::DEBUG } else { LevelFilter::INFO };
    FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(command: Commands) -> anyhow::Result<()> {
    let current_dir = std::env::current_dir().context("Failed to determine current directory")?;

    match command {
        Commands::Process {
            files,
            threshold,
            suffix,
            config,
            yes,
            dry_run,
            json,
        } => {
            let options = ProcessOptions {
                files,
                config_file: config,
                threshold,
                suffix,
                yes,
                dry_run,
                json,
            };
            process_files(&current_dir, options)?;
        }

        Commands::Init { path } => {
            let project_root = path.unwrap_or(current_dir);
            init_config(&project_root)?;
        }
    }

    Ok(())
}
