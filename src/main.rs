// src/main.rs

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use htr_trc_ingest::analysis_bridge::run_analysis;
use htr_trc_ingest::config::IngestConfig;
use htr_trc_ingest::constants::{MARKERS_CSV_FILE_NAME, SEGMENTS_CSV_FILE_NAME};
use htr_trc_ingest::export::{write_marker_set_csv, write_segments_csv};
use htr_trc_ingest::session::{load_session, load_sessions_parallel, LoadedSession};
use htr_trc_ingest::ModelId;

/// Reads NOKOV HTR/TRC motion-capture trials into labeled marker and segment series
#[derive(Parser, Debug)]
#[command(name = "htr_trc_ingest")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Settings file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Force a marker model instead of detecting it (cgm23, elenhayes)
    #[arg(short, long, global = true, value_parser = parse_model)]
    model: Option<ModelId>,

    /// Also read HTR translation columns (Tx, Ty, Tz)
    #[arg(long, global = true)]
    translation: bool,

    /// Do not read HTR rotation columns (Rx, Ry, Rz)
    #[arg(long, global = true)]
    no_rotation: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse one trial directory and print what was found
    Inspect {
        /// Trial directory holding one .htr and one .trc file
        dir: PathBuf,

        /// Write markers.csv and segments.csv (sign-corrected) to this directory
        #[arg(short, long)]
        export: Option<PathBuf>,
    },

    /// Parse two trial directories in parallel
    Compare { first: PathBuf, second: PathBuf },

    /// Parse a trial and hand it to the external analysis process
    Analyze {
        dir: PathBuf,

        /// Interpreter running the analysis script
        #[arg(long)]
        python: Option<String>,

        /// Analysis script path
        #[arg(long)]
        script: Option<PathBuf>,
    },
}

fn parse_model(name: &str) -> Result<ModelId, String> {
    ModelId::from_name(name).ok_or_else(|| {
        let known: Vec<&str> = ModelId::ALL.iter().map(|id| id.name()).collect();
        format!("unknown model '{}', expected one of: {}", name, known.join(", "))
    })
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    info!("htr_trc_ingest {}", htr_trc_ingest::crate_version());

    let mut config = IngestConfig::load_or_default(cli.config.as_deref()).context("loading settings")?;
    if cli.translation {
        config.htr.translation = true;
    }
    if cli.no_rotation {
        config.htr.rotation = false;
    }

    match cli.command {
        Commands::Inspect { dir, export } => run_inspect(&dir, export.as_deref(), &config, cli.model),
        Commands::Compare { first, second } => run_compare(&first, &second, &config, cli.model),
        Commands::Analyze { dir, python, script } => {
            if let Some(python) = python {
                config.analysis.python = python;
            }
            if let Some(script) = script {
                config.analysis.script = script;
            }
            run_analyze(&dir, &config, cli.model)
        }
    }
}

fn run_inspect(dir: &Path, export: Option<&Path>, config: &IngestConfig, model: Option<ModelId>) -> anyhow::Result<()> {
    let session = load_session(dir, config, model).with_context(|| format!("loading {}", dir.display()))?;
    println!("{}", session.summary());

    if let Some(out_dir) = export {
        export_session(&session, out_dir)?;
    }
    Ok(())
}

fn export_session(session: &LoadedSession, out_dir: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(out_dir).with_context(|| format!("creating {}", out_dir.display()))?;

    let markers_path = out_dir.join(MARKERS_CSV_FILE_NAME);
    write_marker_set_csv(&markers_path, &session.markers).with_context(|| format!("writing {}", markers_path.display()))?;

    let segments_path = out_dir.join(SEGMENTS_CSV_FILE_NAME);
    write_segments_csv(&segments_path, &session.corrected_segments())
        .with_context(|| format!("writing {}", segments_path.display()))?;

    println!("Exported {} and {}", markers_path.display(), segments_path.display());
    Ok(())
}

fn run_compare(first: &Path, second: &Path, config: &IngestConfig, model: Option<ModelId>) -> anyhow::Result<()> {
    let (first_result, second_result) = load_sessions_parallel(first, second, config, model);

    let mut failures = 0;
    for (dir, result) in [(first, first_result), (second, second_result)] {
        match result {
            Ok(session) => println!("{}\n", session.summary()),
            Err(e) => {
                error!("Could not load {}: {}", dir.display(), e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        bail!("{} of 2 trials could not be loaded", failures);
    }
    Ok(())
}

fn run_analyze(dir: &Path, config: &IngestConfig, model: Option<ModelId>) -> anyhow::Result<()> {
    let session = load_session(dir, config, model).with_context(|| format!("loading {}", dir.display()))?;
    if !session.markers.has_usable_markers() {
        warn!("No usable markers in {}, the analysis may fail", dir.display());
    }

    let result = run_analysis(&config.analysis, &session.analysis_request()).context("running analysis")?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

// src/main.rs
