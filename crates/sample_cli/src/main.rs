//! `sample` - host tooling for the MultiPlatformSample shim

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod config;
mod manifest;

use config::{load_config, write_default_config, LibraryInfo};
use manifest::render_manifest;

#[derive(Parser)]
#[command(name = "sample", version, about = "MultiPlatformSample host tooling")]
struct Cli {
    /// Path to sample.toml (or a directory containing it)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default sample.toml
    Init {
        /// Directory to write into
        #[arg(default_value = ".")]
        dir: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Generate AndroidManifest.xml registering the native activity
    Manifest {
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Show the native library name, file name, and manifest meta-data
    Info,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Init { dir, force } => {
            write_default_config(&dir, force)?;
            tracing::info!("Wrote {}", dir.join("sample.toml").display());
        }
        Commands::Manifest { out } => {
            let config = load_config(cli.config.as_deref())?;
            let xml = render_manifest(&config)?;
            match out {
                Some(path) => {
                    fs::write(&path, xml)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    tracing::info!("Wrote {}", path.display());
                }
                None => print!("{}", xml),
            }
        }
        Commands::Info => {
            let config = load_config(cli.config.as_deref())?;
            print!("{}", LibraryInfo::from_config(&config)?.to_toml()?);
        }
    }

    Ok(())
}
