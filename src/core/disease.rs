use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::core::types::{DiseaseId, Severity};

/// A known crop disease in the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiseaseRecord {
    /// Unique identifier
    pub id: DiseaseId,

    /// Human-readable name
    pub name: String,

    /// One-line description of the disease
    #[serde(default)]
    pub summary: String,

    /// Latin name of the pathogen, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scientific_name: Option<String>,

    /// Host crops affected by this disease
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub plants: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,

    /// Observable symptoms, in display order
    pub symptoms: Vec<String>,

    /// Treatment recommendations, in display order
    #[serde(default)]
    pub advice: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prevention: Vec<String>,

    // === Pre-computed for fast matching (populated on load) ===
    /// Set of all symptoms for membership checks
    #[serde(skip)]
    pub symptom_set: HashSet<String>,
}

impl DiseaseRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: DiseaseId::new(id),
            name: name.into(),
            summary: String::new(),
            scientific_name: None,
            plants: Vec::new(),
            severity: None,
            symptoms: Vec::new(),
            advice: Vec::new(),
            prevention: Vec::new(),
            symptom_set: HashSet::new(),
        }
    }

    #[must_use]
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    #[must_use]
    pub fn with_symptoms<I, S>(mut self, symptoms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.symptoms = symptoms.into_iter().map(Into::into).collect();
        self.rebuild_indexes();
        self
    }

    #[must_use]
    pub fn with_advice<I, S>(mut self, advice: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.advice = advice.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_plants<I, S>(mut self, plants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.plants = plants.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    /// Rebuild the lookup set after deserialization
    pub fn rebuild_indexes(&mut self) {
        self.symptom_set = self.symptoms.iter().cloned().collect();
    }

    /// Whether this disease lists the given symptom
    #[must_use]
    pub fn has_symptom(&self, symptom: &str) -> bool {
        self.symptom_set.contains(symptom)
    }

    /// First symptom listed more than once, if any
    #[must_use]
    pub fn duplicate_symptom(&self) -> Option<&str> {
        let mut seen = HashSet::new();
        self.symptoms
            .iter()
            .find(|s| !seen.insert(s.as_str()))
            .map(String::as_str)
    }

    /// Case-insensitive substring check against the host plants
    #[must_use]
    pub fn affects_plant(&self, plant: &str) -> bool {
        let needle = plant.to_lowercase();
        self.plants
            .iter()
            .any(|p| p.to_lowercase().contains(&needle))
    }
}
