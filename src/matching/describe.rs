//! Free-text symptom descriptions.
//!
//! Users who do not want to tick boxes can describe what they see
//! ("leaves have brown spots and are yellowing"). A disease symptom is
//! mentioned when one of its significant words shows up in the description,
//! and each disease is scored by the share of *its own* symptoms mentioned.
//! Common words like "leaves" touch many symptoms, so scoring against the
//! disease's list keeps a focused description from being diluted.

use crate::catalog::store::DiseaseCatalog;
use crate::core::disease::DiseaseRecord;
use crate::matching::engine::{rank, MatchError, MatchResult};
use crate::matching::scoring::match_percent;

/// Words shorter than this ("on", "and", "the") never trigger a match
pub const MIN_KEYWORD_LEN: usize = 4;

/// Rank diseases against a free-text description.
///
/// A symptom is mentioned when any of its whitespace-separated words, at
/// least [`MIN_KEYWORD_LEN`] characters long, occurs as a case-insensitive
/// substring of the description. `match_percent` is the mentioned share of
/// the disease's symptom list. Ties keep catalog order.
///
/// # Errors
///
/// [`MatchError::NoSelection`] for a blank description,
/// [`MatchError::NoMatch`] when no symptom is mentioned.
pub fn match_description(
    description: &str,
    catalog: &DiseaseCatalog,
) -> Result<Vec<MatchResult>, MatchError> {
    let text = description.trim().to_lowercase();
    if text.is_empty() {
        return Err(MatchError::NoSelection);
    }

    let results: Vec<MatchResult> = catalog
        .iter()
        .filter_map(|disease| score_description(disease, &text))
        .collect();

    tracing::debug!(
        "Description mentions symptoms of {} of {} diseases",
        results.len(),
        catalog.len()
    );

    rank(results)
}

/// Score one disease against lower-cased text; `None` when nothing is mentioned
fn score_description(disease: &DiseaseRecord, text: &str) -> Option<MatchResult> {
    let (matched_symptoms, unmatched_symptoms): (Vec<String>, Vec<String>) = disease
        .symptoms
        .iter()
        .cloned()
        .partition(|symptom| mentions(text, symptom));

    if matched_symptoms.is_empty() {
        return None;
    }

    let total = disease.symptoms.len();
    Some(MatchResult {
        disease_id: disease.id.clone(),
        disease_name: disease.name.clone(),
        match_percent: match_percent(matched_symptoms.len(), total),
        match_count: matched_symptoms.len(),
        total_symptoms: total,
        matched_symptoms,
        unmatched_symptoms,
    })
}

fn mentions(text: &str, symptom: &str) -> bool {
    symptom
        .to_lowercase()
        .split_whitespace()
        .any(|word| word.chars().count() >= MIN_KEYWORD_LEN && text.contains(word))
}
