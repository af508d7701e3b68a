use std::path::PathBuf;

use clap::Args;

use crate::catalog::store::DiseaseCatalog;
use crate::cli::{load_catalog, OutputFormat};
use crate::core::selection::Observation;
use crate::matching::{MatchError, MatchResult, SymptomMatcher};
use crate::utils::validation::resolve_observation;

#[derive(Args)]
#[command(group(
    clap::ArgGroup::new("input")
        .required(true)
        .args(["symptoms", "description"]),
))]
pub struct DiagnoseArgs {
    /// Observed symptom, exactly as listed by `catalog symptoms`
    /// (repeat for several)
    #[arg(short = 's', long = "symptom")]
    pub symptoms: Vec<String>,

    /// Free-text description of what you see
    #[arg(short, long)]
    pub description: Option<String>,

    /// Number of matches to show (at least 1)
    #[arg(
        short = 'n',
        long,
        default_value = "5",
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub max_matches: usize,

    /// Path to custom catalog file
    #[arg(long)]
    pub catalog: Option<PathBuf>,
}

/// Execute diagnose subcommand
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded, the input is invalid,
/// or nothing was selected. Finding no match is not an error.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: DiagnoseArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let catalog = load_catalog(args.catalog.as_deref())?;

    if verbose {
        eprintln!("Loaded catalog with {} diseases", catalog.len());
    }

    let symptoms = (!args.symptoms.is_empty()).then_some(args.symptoms.as_slice());
    let observation = resolve_observation(symptoms, args.description.as_deref(), &catalog)?;

    if verbose {
        if let Observation::Checked(selection) = &observation {
            let picked: Vec<&str> = selection.iter().collect();
            eprintln!("Selected symptoms: {}", picked.join(", "));
            for unknown in selection.iter().filter(|s| !catalog.knows_symptom(s)) {
                eprintln!("Warning: '{unknown}' is not a symptom in the catalog");
            }
        }
    }

    let engine = SymptomMatcher::new(&catalog);
    let matches = match engine.diagnose_top(&observation, args.max_matches) {
        Ok(matches) => matches,
        Err(MatchError::NoMatch) => {
            eprintln!("{}", MatchError::NoMatch);
            return Ok(());
        }
        Err(e @ MatchError::NoSelection) => return Err(e.into()),
    };

    match format {
        OutputFormat::Text => print_text_results(&matches, &catalog, verbose),
        OutputFormat::Json => print_json_results(&matches, &observation)?,
        OutputFormat::Tsv => print_tsv_results(&matches),
    }

    Ok(())
}

fn print_text_results(matches: &[MatchResult], catalog: &DiseaseCatalog, verbose: bool) {
    for (i, result) in matches.iter().enumerate() {
        if i > 0 {
            println!("\n{}", "─".repeat(60));
        }

        println!(
            "\n#{} {} ({}% match, {})",
            i + 1,
            result.disease_name,
            result.match_percent,
            result.confidence()
        );
        println!("   ID: {}", result.disease_id);
        println!("   Matched: {}", result.matched_symptoms.join(", "));
        if !result.unmatched_symptoms.is_empty() {
            println!("   Other symptoms: {}", result.unmatched_symptoms.join(", "));
        }

        if verbose {
            if let Some(disease) = catalog.get(&result.disease_id) {
                if !disease.summary.is_empty() {
                    println!("\n   {}", disease.summary);
                }
                if !disease.advice.is_empty() {
                    println!("\n   Recommendations:");
                    for advice in &disease.advice {
                        println!("     - {advice}");
                    }
                }
            }
        }
    }
}

fn print_json_results(matches: &[MatchResult], observation: &Observation) -> anyhow::Result<()> {
    let results: Vec<serde_json::Value> = matches
        .iter()
        .map(|m| {
            serde_json::json!({
                "disease_id": m.disease_id.as_str(),
                "disease_name": m.disease_name,
                "match_percent": m.match_percent,
                "match_count": m.match_count,
                "total_symptoms": m.total_symptoms,
                "confidence": m.confidence(),
                "matched_symptoms": m.matched_symptoms,
                "unmatched_symptoms": m.unmatched_symptoms,
            })
        })
        .collect();

    let output = match observation {
        Observation::Checked(selection) => serde_json::json!({
            "selected": selection,
            "results": results,
        }),
        Observation::Described(text) => serde_json::json!({
            "description": text,
            "results": results,
        }),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_results(matches: &[MatchResult]) {
    println!("rank\tdisease_id\tdisease_name\tmatch_percent\tconfidence\tmatched_symptoms\tunmatched_symptoms");
    for (i, m) in matches.iter().enumerate() {
        println!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            i + 1,
            m.disease_id,
            m.disease_name,
            m.match_percent,
            m.confidence(),
            m.matched_symptoms.join(";"),
            m.unmatched_symptoms.join(";"),
        );
    }
}
