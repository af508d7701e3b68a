//! Centralized validation for user-supplied symptom input.

use crate::catalog::store::DiseaseCatalog;
use crate::core::selection::{Observation, SymptomSelection};

/// Maximum number of symptoms in a single selection (DOS protection)
pub const MAX_SELECTED_SYMPTOMS: usize = 64;

/// Maximum length of one symptom label, in bytes
pub const MAX_SYMPTOM_LENGTH: usize = 256;

/// Maximum length of a free-text description, in bytes
pub const MAX_DESCRIPTION_LENGTH: usize = 4096;

/// Maximum length of a catalog search query, in bytes
pub const MAX_QUERY_LENGTH: usize = 256;

/// Input validation error types
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Too many symptoms selected: maximum is {MAX_SELECTED_SYMPTOMS}")]
    TooManySymptoms,
    #[error("Symptom label too long: exceeds {MAX_SYMPTOM_LENGTH} bytes")]
    SymptomTooLong,
    #[error("Description too long: exceeds {MAX_DESCRIPTION_LENGTH} bytes")]
    DescriptionTooLong,
    #[error("Search query too long: exceeds {MAX_QUERY_LENGTH} bytes")]
    QueryTooLong,
    #[error("Input contains control characters")]
    ControlCharacters,
    #[error("Provide either symptoms or a description, not both")]
    AmbiguousInput,
}

fn has_control_chars(s: &str) -> bool {
    s.chars().any(char::is_control)
}

/// Build a selection from raw labels.
///
/// Labels are trimmed and blank ones dropped; duplicates collapse. The
/// result may be empty, which the matcher reports as "no selection".
///
/// # Errors
///
/// Returns a `ValidationError` if there are too many labels, a label is too
/// long, or a label contains control characters.
pub fn validate_symptoms<I, S>(labels: I) -> Result<SymptomSelection, ValidationError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut selection = SymptomSelection::new();

    for label in labels {
        let label = label.as_ref().trim();
        if label.is_empty() {
            continue;
        }
        if label.len() > MAX_SYMPTOM_LENGTH {
            return Err(ValidationError::SymptomTooLong);
        }
        if has_control_chars(label) {
            return Err(ValidationError::ControlCharacters);
        }
        selection.insert(label);
        if selection.len() > MAX_SELECTED_SYMPTOMS {
            return Err(ValidationError::TooManySymptoms);
        }
    }

    Ok(selection)
}

/// Check a free-text description.
///
/// Newlines and tabs are allowed; other control characters are not.
///
/// # Errors
///
/// Returns a `ValidationError` if the description is too long or contains
/// control characters.
pub fn validate_description(description: &str) -> Result<&str, ValidationError> {
    if description.len() > MAX_DESCRIPTION_LENGTH {
        return Err(ValidationError::DescriptionTooLong);
    }
    if description
        .chars()
        .any(|c| c.is_control() && !matches!(c, '\n' | '\r' | '\t'))
    {
        return Err(ValidationError::ControlCharacters);
    }
    Ok(description.trim())
}

/// Check a catalog search query.
///
/// # Errors
///
/// Returns a `ValidationError` if the query is too long or contains control
/// characters.
pub fn validate_query(query: &str) -> Result<&str, ValidationError> {
    if query.len() > MAX_QUERY_LENGTH {
        return Err(ValidationError::QueryTooLong);
    }
    if has_control_chars(query) {
        return Err(ValidationError::ControlCharacters);
    }
    Ok(query.trim())
}

/// Turn either checked labels or a description into an observation.
///
/// Supplying neither yields an empty selection, which the matcher reports
/// as "no selection".
///
/// # Errors
///
/// Returns `ValidationError::AmbiguousInput` if both are supplied, or any
/// error from [`validate_symptoms`] / [`validate_description`].
pub fn resolve_observation(
    symptoms: Option<&[String]>,
    description: Option<&str>,
    catalog: &DiseaseCatalog,
) -> Result<Observation, ValidationError> {
    match (symptoms, description) {
        (Some(_), Some(_)) => Err(ValidationError::AmbiguousInput),
        (Some(labels), None) => {
            let selection = validate_symptoms(labels)?;
            for label in selection.iter().filter(|s| !catalog.knows_symptom(s)) {
                tracing::debug!("Ignoring unknown symptom '{}'", label);
            }
            Ok(Observation::Checked(selection))
        }
        (None, Some(text)) => Ok(Observation::Described(
            validate_description(text)?.to_string(),
        )),
        (None, None) => Ok(Observation::Checked(SymptomSelection::new())),
    }
}
