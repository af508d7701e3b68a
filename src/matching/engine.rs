use serde::Serialize;
use thiserror::Error;

use crate::catalog::index::CandidateFinder;
use crate::catalog::store::DiseaseCatalog;
use crate::core::disease::DiseaseRecord;
use crate::core::selection::{Observation, SymptomSelection};
use crate::core::types::{Confidence, DiseaseId};
use crate::matching::describe::match_description;
use crate::matching::scoring::match_percent;

/// The two outcomes that produce no ranked list
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchError {
    /// Nothing was selected; the caller should prompt for at least one symptom
    #[error("Please select at least one symptom to diagnose")]
    NoSelection,

    /// No disease shares a symptom with the selection
    #[error("No matching diseases found. Please consult an expert.")]
    NoMatch,
}

/// How well one disease explains a symptom selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    pub disease_id: DiseaseId,

    pub disease_name: String,

    /// Share of the selection explained by this disease, 0-100
    pub match_percent: u8,

    /// How many of this disease's symptoms matched
    pub match_count: usize,

    /// Size of this disease's symptom list
    pub total_symptoms: usize,

    /// Matched symptoms: selection order for checked input, catalog order
    /// for a description
    pub matched_symptoms: Vec<String>,

    /// This disease's remaining symptoms, in catalog order
    pub unmatched_symptoms: Vec<String>,
}

impl MatchResult {
    /// Score one disease against a selection.
    ///
    /// Returns `None` when the two share no symptom.
    pub fn score(disease: &DiseaseRecord, selection: &SymptomSelection) -> Option<Self> {
        let matched_symptoms: Vec<String> = selection
            .iter()
            .filter(|s| disease.has_symptom(s))
            .map(str::to_string)
            .collect();

        if matched_symptoms.is_empty() {
            return None;
        }

        let unmatched_symptoms: Vec<String> = disease
            .symptoms
            .iter()
            .filter(|s| !selection.contains(s))
            .cloned()
            .collect();

        Some(Self {
            disease_id: disease.id.clone(),
            disease_name: disease.name.clone(),
            match_percent: match_percent(matched_symptoms.len(), selection.len()),
            match_count: matched_symptoms.len(),
            total_symptoms: disease.symptoms.len(),
            matched_symptoms,
            unmatched_symptoms,
        })
    }

    #[must_use]
    pub fn confidence(&self) -> Confidence {
        Confidence::from_percent(self.match_percent)
    }
}

/// Rank every disease in the catalog against a selection.
///
/// Diseases with no overlap are dropped. The rest are sorted by
/// `match_percent`, highest first; ties keep catalog order.
///
/// # Errors
///
/// [`MatchError::NoSelection`] for an empty selection,
/// [`MatchError::NoMatch`] when nothing overlaps.
pub fn match_symptoms(
    selection: &SymptomSelection,
    catalog: &DiseaseCatalog,
) -> Result<Vec<MatchResult>, MatchError> {
    if selection.is_empty() {
        return Err(MatchError::NoSelection);
    }

    let results: Vec<MatchResult> = catalog
        .iter()
        .filter_map(|disease| MatchResult::score(disease, selection))
        .collect();

    rank(results)
}

/// Stable sort by percentage, descending; an empty list is a miss
pub(crate) fn rank(mut results: Vec<MatchResult>) -> Result<Vec<MatchResult>, MatchError> {
    if results.is_empty() {
        return Err(MatchError::NoMatch);
    }
    results.sort_by(|a, b| b.match_percent.cmp(&a.match_percent));
    Ok(results)
}

/// Matching engine bound to one catalog.
///
/// Uses the catalog's symptom index to skip diseases that cannot overlap.
/// Results are identical to [`match_symptoms`].
pub struct SymptomMatcher<'a> {
    catalog: &'a DiseaseCatalog,
}

impl<'a> SymptomMatcher<'a> {
    pub fn new(catalog: &'a DiseaseCatalog) -> Self {
        Self { catalog }
    }

    /// Find the diseases that best explain the selection
    ///
    /// # Errors
    ///
    /// See [`match_symptoms`].
    pub fn find_matches(
        &self,
        selection: &SymptomSelection,
    ) -> Result<Vec<MatchResult>, MatchError> {
        if selection.is_empty() {
            return Err(MatchError::NoSelection);
        }

        let finder = CandidateFinder::new(self.catalog);
        let candidates = finder.find_candidates(selection);

        tracing::debug!(
            "{} of {} diseases overlap a selection of {} symptoms",
            candidates.len(),
            self.catalog.len(),
            selection.len()
        );

        // Candidates come back in catalog order, so the stable sort in rank()
        // still breaks ties by catalog position.
        let results: Vec<MatchResult> = candidates
            .into_iter()
            .filter_map(|(idx, _)| MatchResult::score(&self.catalog.diseases[idx], selection))
            .collect();

        rank(results)
    }

    /// Find at most `limit` matches
    ///
    /// # Errors
    ///
    /// See [`match_symptoms`].
    pub fn find_top_matches(
        &self,
        selection: &SymptomSelection,
        limit: usize,
    ) -> Result<Vec<MatchResult>, MatchError> {
        let mut results = self.find_matches(selection)?;
        results.truncate(limit);
        Ok(results)
    }

    /// Rank diseases for either kind of observation
    ///
    /// # Errors
    ///
    /// See [`match_symptoms`] and [`match_description`].
    pub fn diagnose(&self, observation: &Observation) -> Result<Vec<MatchResult>, MatchError> {
        match observation {
            Observation::Checked(selection) => self.find_matches(selection),
            Observation::Described(text) => match_description(text, self.catalog),
        }
    }

    /// [`Self::diagnose`], keeping at most `limit` results
    ///
    /// # Errors
    ///
    /// See [`Self::diagnose`].
    pub fn diagnose_top(
        &self,
        observation: &Observation,
        limit: usize,
    ) -> Result<Vec<MatchResult>, MatchError> {
        let mut results = self.diagnose(observation)?;
        results.truncate(limit);
        Ok(results)
    }
}
