use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::cli::{load_catalog, OutputFormat};
use crate::core::disease::DiseaseRecord;
use crate::core::types::DiseaseId;
use crate::utils::validation::validate_query;

#[derive(Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: CatalogCommands,
}

#[derive(Subcommand)]
pub enum CatalogCommands {
    /// List all diseases in the catalog
    List {
        /// Path to custom catalog file
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Filter by host plant (e.g., "tomato")
        #[arg(long)]
        plant: Option<String>,
    },

    /// Show details of a specific disease
    Show {
        /// Disease ID
        #[arg(required = true)]
        id: String,

        /// Path to custom catalog file
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// List every symptom known to the catalog
    Symptoms {
        /// Path to custom catalog file
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Search diseases by name, scientific name or host plant
    Search {
        /// Search text
        #[arg(required = true)]
        query: String,

        /// Path to custom catalog file
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Show catalog statistics
    Stats {
        /// Path to custom catalog file
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Export the catalog to a file
    Export {
        /// Output file path
        #[arg(required = true)]
        output: PathBuf,

        /// Path to custom catalog file to export (defaults to embedded)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
}

/// Execute catalog subcommand
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded, a disease is not
/// found, or the export file cannot be written.
pub fn run(args: CatalogArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    match args.command {
        CatalogCommands::List { catalog, plant } => {
            run_list(catalog, plant.as_deref(), format, verbose)
        }
        CatalogCommands::Show { id, catalog } => run_show(&id, catalog, format),
        CatalogCommands::Symptoms { catalog } => run_symptoms(catalog, format),
        CatalogCommands::Search { query, catalog } => run_search(&query, catalog, format),
        CatalogCommands::Stats { catalog } => run_stats(catalog, format),
        CatalogCommands::Export { output, catalog } => run_export(output, catalog),
    }
}

fn run_list(
    catalog_path: Option<PathBuf>,
    plant_filter: Option<&str>,
    format: OutputFormat,
    verbose: bool,
) -> anyhow::Result<()> {
    let catalog = load_catalog(catalog_path.as_deref())?;

    if verbose {
        eprintln!("Loaded catalog with {} diseases", catalog.len());
    }

    let filtered: Vec<&DiseaseRecord> = match plant_filter {
        Some(plant) => catalog.by_plant(plant),
        None => catalog.iter().collect(),
    };

    print_disease_table(&filtered, format, "Disease Catalog")
}

fn run_search(
    query: &str,
    catalog_path: Option<PathBuf>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let catalog = load_catalog(catalog_path.as_deref())?;
    let query = validate_query(query)?;
    let found = catalog.search(query)?;

    if found.is_empty() && matches!(format, OutputFormat::Text) {
        eprintln!("No diseases match '{query}'");
        return Ok(());
    }

    print_disease_table(&found, format, "Search Results")
}

fn print_disease_table(
    diseases: &[&DiseaseRecord],
    format: OutputFormat,
    title: &str,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            let id_width = diseases
                .iter()
                .map(|d| d.id.as_str().len())
                .max()
                .unwrap_or(2)
                .max(2);
            let name_width = diseases
                .iter()
                .map(|d| d.name.chars().count().min(30))
                .max()
                .unwrap_or(4)
                .max(4);
            let severity_width = "Moderate to High".len();

            let total_width = id_width + name_width + severity_width + 9 + 3;

            println!("{title} ({} diseases)\n", diseases.len());
            println!(
                "{:<id_w$} {:<name_w$} {:<sev_w$} {:>9}",
                "ID",
                "Name",
                "Severity",
                "Symptoms",
                id_w = id_width,
                name_w = name_width,
                sev_w = severity_width,
            );
            println!("{}", "-".repeat(total_width));

            for d in diseases {
                let severity = d
                    .severity
                    .map_or_else(|| "-".to_string(), |s| s.to_string());
                println!(
                    "{:<id_w$} {:<name_w$} {:<sev_w$} {:>9}",
                    d.id.as_str(),
                    truncate(&d.name, name_width),
                    severity,
                    d.symptoms.len(),
                    id_w = id_width,
                    name_w = name_width,
                    sev_w = severity_width,
                );
                if !d.plants.is_empty() {
                    println!("  └─ Plants: {}", d.plants.join(", "));
                }
            }
        }
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = diseases
                .iter()
                .map(|d| {
                    serde_json::json!({
                        "id": d.id.as_str(),
                        "name": d.name,
                        "scientific_name": d.scientific_name,
                        "severity": d.severity.map(|s| s.to_string()),
                        "plants": d.plants,
                        "symptom_count": d.symptoms.len(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("id\tname\tscientific_name\tseverity\tplants\tsymptom_count");
            for d in diseases {
                println!(
                    "{}\t{}\t{}\t{}\t{}\t{}",
                    d.id,
                    d.name,
                    d.scientific_name.as_deref().unwrap_or(""),
                    d.severity.map(|s| s.to_string()).unwrap_or_default(),
                    d.plants.join(";"),
                    d.symptoms.len(),
                );
            }
        }
    }

    Ok(())
}

fn run_show(id: &str, catalog_path: Option<PathBuf>, format: OutputFormat) -> anyhow::Result<()> {
    let catalog = load_catalog(catalog_path.as_deref())?;

    let disease = catalog
        .get(&DiseaseId::new(id))
        .ok_or_else(|| anyhow::anyhow!("Disease '{}' not found", id))?;

    match format {
        OutputFormat::Text => {
            println!("Disease: {}\n", disease.name);
            println!("ID:       {}", disease.id);
            if let Some(latin) = &disease.scientific_name {
                println!("Latin:    {latin}");
            }
            if let Some(severity) = disease.severity {
                println!("Severity: {severity}");
            }
            if !disease.plants.is_empty() {
                println!("Plants:   {}", disease.plants.join(", "));
            }

            if !disease.summary.is_empty() {
                println!("\n{}", disease.summary);
            }

            println!("\nSymptoms:");
            for symptom in &disease.symptoms {
                println!("  - {symptom}");
            }

            if !disease.advice.is_empty() {
                println!("\nRecommendations:");
                for advice in &disease.advice {
                    println!("  - {advice}");
                }
            }

            if !disease.prevention.is_empty() {
                println!("\nPrevention:");
                for step in &disease.prevention {
                    println!("  - {step}");
                }
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(disease)?);
        }
        OutputFormat::Tsv => {
            println!("symptom");
            for symptom in &disease.symptoms {
                println!("{symptom}");
            }
        }
    }

    Ok(())
}

fn run_symptoms(catalog_path: Option<PathBuf>, format: OutputFormat) -> anyhow::Result<()> {
    let catalog = load_catalog(catalog_path.as_deref())?;
    let symptoms = catalog.symptom_union();

    match format {
        OutputFormat::Text => {
            println!("Known symptoms ({})\n", symptoms.len());
            for symptom in &symptoms {
                let count = catalog.diseases_with_symptom(symptom).len();
                println!("  {symptom} ({count})");
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&symptoms)?);
        }
        OutputFormat::Tsv => {
            println!("symptom\tdisease_count");
            for symptom in &symptoms {
                println!("{symptom}\t{}", catalog.diseases_with_symptom(symptom).len());
            }
        }
    }

    Ok(())
}

fn run_stats(catalog_path: Option<PathBuf>, format: OutputFormat) -> anyhow::Result<()> {
    let catalog = load_catalog(catalog_path.as_deref())?;
    let stats = catalog.statistics();

    match format {
        OutputFormat::Text => {
            println!("Diseases: {}", stats.total_diseases);
            println!("Symptoms: {}", stats.total_symptoms);
            println!("\nSeverity:");
            for (label, count) in &stats.severity_distribution {
                println!("  {label:<18} {count:>3}");
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        OutputFormat::Tsv => {
            println!("severity\tcount");
            for (label, count) in &stats.severity_distribution {
                println!("{label}\t{count}");
            }
        }
    }

    Ok(())
}

fn run_export(output: PathBuf, catalog_path: Option<PathBuf>) -> anyhow::Result<()> {
    let catalog = load_catalog(catalog_path.as_deref())?;

    let json = catalog.to_json()?;
    std::fs::write(&output, json)?;

    println!(
        "Exported {} diseases to {}",
        catalog.len(),
        output.display()
    );

    Ok(())
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}
