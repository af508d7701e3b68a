//! Command-line interface for symptom-solver.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **diagnose**: Rank diseases from checked symptoms or a description
//! - **catalog**: List, show, search or export the disease catalog
//! - **serve**: Start the interactive web interface
//!
//! ## Usage
//!
//! ```text
//! # Rank diseases from observed symptoms
//! symptom-solver diagnose -s "Orange pustules" -s "Yellow leaves"
//!
//! # Describe what you see instead
//! symptom-solver diagnose -d "brown spots and wilting leaves"
//!
//! # JSON output for scripting
//! symptom-solver diagnose -s "Brown spots" --format json
//!
//! # Start web UI
//! symptom-solver serve --port 8080 --open
//! ```

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::catalog::store::DiseaseCatalog;

pub mod catalog;
pub mod diagnose;

#[derive(Parser)]
#[command(name = "symptom-solver")]
#[command(author = "Smart Crop Team")]
#[command(version)]
#[command(about = "Rank likely crop diseases from observed symptoms")]
#[command(
    long_about = "symptom-solver matches the symptoms you observe on a crop against a catalog of known diseases.\n\nEach candidate is scored by the share of your symptoms it explains, and results are ranked highest first."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rank diseases by how well they explain the observed symptoms
    Diagnose(diagnose::DiagnoseArgs),

    /// Inspect the disease catalog
    Catalog(catalog::CatalogArgs),

    /// Start the web server
    Serve(ServeArgs),
}

#[derive(clap::Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, default_value = "8080")]
    pub port: u16,

    /// Address to bind to
    #[arg(short, long, default_value = "127.0.0.1")]
    pub address: String,

    /// Path to custom catalog file
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Open browser automatically
    #[arg(long)]
    pub open: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Load a custom catalog if one was given, else the embedded one
///
/// # Errors
///
/// Returns an error if the catalog file cannot be read or parsed.
pub fn load_catalog(path: Option<&Path>) -> anyhow::Result<DiseaseCatalog> {
    let catalog = match path {
        Some(path) => DiseaseCatalog::load_from_file(path)?,
        None => DiseaseCatalog::load_embedded()?,
    };
    tracing::debug!("Loaded catalog with {} diseases", catalog.len());
    Ok(catalog)
}
