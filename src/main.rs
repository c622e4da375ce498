//! # Etiqueta CLI
//!
//! Command-line interface for sticker label generation.
//!
//! ## Usage
//!
//! ```bash
//! # Generate label PNGs from a CSV dataset
//! etiqueta generate parts.csv
//!
//! # Include a logo and write to a specific directory
//! etiqueta generate parts.csv --logo logo.png --out-dir stickers
//!
//! # Use an alternative layout
//! etiqueta generate parts.csv --config layout.json
//!
//! # Show how the dataset's columns resolve
//! etiqueta inspect parts.csv
//!
//! # Print the default layout configuration
//! etiqueta config > layout.json
//! ```

use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use tracing::warn;

use etiqueta::label::{Composer, QrEncoder};
use etiqueta::render::{self, LabelRenderer, QrRaster, SpleenMetrics};
use etiqueta::schema::{self, AliasTable};
use etiqueta::source::{CsvTable, TableSource};
use etiqueta::{EtiquetaError, LayoutConfig};

/// Etiqueta - sticker label generator
#[derive(Parser, Debug)]
#[command(name = "etiqueta")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate label PNGs from a CSV dataset
    Generate {
        /// CSV file with part data (first row is the header)
        input: PathBuf,

        /// Output directory for the generated PNGs
        #[arg(long, default_value = "labels")]
        out_dir: PathBuf,

        /// Logo image for the identity row (PNG/JPEG)
        #[arg(long)]
        logo: Option<PathBuf>,

        /// Layout configuration JSON (defaults to the 10x15cm sticker)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Skip QR encoding and render the placeholder cell
        #[arg(long)]
        no_qr: bool,
    },

    /// Show how a dataset's columns resolve to label fields
    Inspect {
        /// CSV file to inspect
        input: PathBuf,

        /// Emit machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the default layout configuration as JSON
    Config,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), EtiquetaError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            input,
            out_dir,
            logo,
            config,
            no_qr,
        } => generate(input, out_dir, logo, config, no_qr),
        Commands::Inspect { input, json } => inspect(input, json),
        Commands::Config => {
            println!("{}", config_json(&LayoutConfig::default())?);
            Ok(())
        }
    }
}

fn generate(
    input: PathBuf,
    out_dir: PathBuf,
    logo: Option<PathBuf>,
    config_path: Option<PathBuf>,
    no_qr: bool,
) -> Result<(), EtiquetaError> {
    let config = match config_path {
        Some(path) => {
            let text = fs::read_to_string(&path)?;
            serde_json::from_str(&text).map_err(|e| {
                EtiquetaError::Layout(format!("bad config file {}: {e}", path.display()))
            })?
        }
        None => LayoutConfig::default(),
    };

    let table = CsvTable::from_path(&input)?;
    println!("Read {} rows from {}", table.row_count(), input.display());

    let renderer = LabelRenderer::new(config.clone());
    let mut composer = Composer::new(config, SpleenMetrics)?;

    // A broken logo degrades to an empty cell rather than aborting the run
    if let Some(path) = logo {
        match render::load_logo(&path).and_then(|handle| composer.set_logo(handle)) {
            Ok(()) => println!("Using logo {}", path.display()),
            Err(e) => warn!(logo = %path.display(), error = %e, "continuing without logo"),
        }
    }

    let qr = QrRaster::default();
    let qr_encoder: Option<&dyn QrEncoder> = if no_qr { None } else { Some(&qr) };
    let records = composer.compose_dataset(&table, qr_encoder)?;

    fs::create_dir_all(&out_dir)?;
    for record in &records {
        let png = renderer.render_png(record)?;
        let path = out_dir.join(format!("label_{:04}.png", record.index + 1));
        fs::write(&path, png)?;
    }

    println!("Generated {} labels in {}", records.len(), out_dir.display());
    Ok(())
}

fn inspect(input: PathBuf, json: bool) -> Result<(), EtiquetaError> {
    let table = CsvTable::from_path(&input)?;
    let schema = schema::resolve(table.column_names(), &AliasTable::builtin());

    if json {
        let text = serde_json::to_string_pretty(&schema)
            .map_err(|e| EtiquetaError::Table(e.to_string()))?;
        println!("{text}");
        return Ok(());
    }

    println!("Columns: {}", table.column_names().join(", "));
    println!("Resolved fields:");
    for (field, column) in schema.bindings() {
        println!("  {field:<18} <- {column}");
    }
    let missing = schema.missing_mandatory();
    if missing.is_empty() {
        println!("All mandatory fields resolved.");
    } else {
        for field in missing {
            println!("  {field:<18} MISSING (mandatory)");
        }
    }
    Ok(())
}

fn config_json(config: &LayoutConfig) -> Result<String, EtiquetaError> {
    serde_json::to_string_pretty(config).map_err(|e| EtiquetaError::Layout(e.to_string()))
}
