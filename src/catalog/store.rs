use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use thiserror::Error;

use crate::core::disease::DiseaseRecord;
use crate::core::types::{DiseaseId, Severity};

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse catalog: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Duplicate disease id '{0}'")]
    DuplicateId(String),

    #[error("Disease '{0}' has no symptoms")]
    NoSymptoms(String),

    #[error("Disease '{id}' lists symptom '{symptom}' more than once")]
    DuplicateSymptom { id: String, symptom: String },
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SearchError {
    #[error("Search query required")]
    EmptyQuery,
}

/// Catalog version for compatibility checking
pub const CATALOG_VERSION: &str = "1.0.0";

/// Serializable catalog format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogData {
    pub version: String,
    pub created_at: String,
    pub diseases: Vec<DiseaseRecord>,
}

/// Summary counts over the catalog
#[derive(Debug, Clone, Serialize)]
pub struct CatalogStatistics {
    pub total_diseases: usize,
    pub total_symptoms: usize,
    /// Severity label -> number of diseases, with an "Unspecified" bucket
    pub severity_distribution: Vec<(String, usize)>,
}

/// The disease catalog with indexes
#[derive(Debug)]
pub struct DiseaseCatalog {
    /// All known diseases, in catalog order
    pub diseases: Vec<DiseaseRecord>,

    /// Index: disease ID -> index in diseases vec
    id_to_index: HashMap<DiseaseId, usize>,

    /// Index: symptom -> indices of diseases listing it (ascending)
    pub symptom_to_diseases: HashMap<String, Vec<usize>>,
}

impl DiseaseCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self {
            diseases: Vec::new(),
            id_to_index: HashMap::new(),
            symptom_to_diseases: HashMap::new(),
        }
    }

    /// Load the embedded default catalog
    pub fn load_embedded() -> Result<Self, CatalogError> {
        // Validated at compile time by build.rs
        const EMBEDDED_CATALOG: &str = include_str!("../../catalogs/crop_diseases.json");
        Self::from_json(EMBEDDED_CATALOG)
    }

    /// Load catalog from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&content)?;
        tracing::debug!(
            "Loaded {} diseases from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// Parse catalog from JSON string
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let data: CatalogData = serde_json::from_str(json)?;

        // Version check (warn but don't fail)
        if data.version != CATALOG_VERSION {
            tracing::warn!(
                "Catalog version mismatch (expected {}, found {})",
                CATALOG_VERSION,
                data.version
            );
        }

        let mut catalog = Self::new();
        for disease in data.diseases {
            catalog.add_disease(disease)?;
        }

        Ok(catalog)
    }

    /// Add a disease to the catalog
    pub fn add_disease(&mut self, mut disease: DiseaseRecord) -> Result<(), CatalogError> {
        if self.id_to_index.contains_key(&disease.id) {
            return Err(CatalogError::DuplicateId(disease.id.0));
        }
        if disease.symptoms.is_empty() {
            return Err(CatalogError::NoSymptoms(disease.id.0));
        }
        if let Some(symptom) = disease.duplicate_symptom() {
            return Err(CatalogError::DuplicateSymptom {
                id: disease.id.0.clone(),
                symptom: symptom.to_string(),
            });
        }
        disease.rebuild_indexes();

        let index = self.diseases.len();

        self.id_to_index.insert(disease.id.clone(), index);

        for symptom in &disease.symptoms {
            self.symptom_to_diseases
                .entry(symptom.clone())
                .or_default()
                .push(index);
        }

        self.diseases.push(disease);
        Ok(())
    }

    /// Get a disease by ID
    pub fn get(&self, id: &DiseaseId) -> Option<&DiseaseRecord> {
        self.id_to_index.get(id).map(|&idx| &self.diseases[idx])
    }

    /// Catalog indices of diseases that list a symptom
    pub fn diseases_with_symptom(&self, symptom: &str) -> &[usize] {
        self.symptom_to_diseases
            .get(symptom)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Whether any disease lists this symptom
    pub fn knows_symptom(&self, symptom: &str) -> bool {
        self.symptom_to_diseases.contains_key(symptom)
    }

    /// Sorted union of every symptom in the catalog
    pub fn symptom_union(&self) -> Vec<&str> {
        let union: BTreeSet<&str> = self
            .symptom_to_diseases
            .keys()
            .map(String::as_str)
            .collect();
        union.into_iter().collect()
    }

    /// Find diseases whose name, scientific name or host plants contain the query
    pub fn search(&self, query: &str) -> Result<Vec<&DiseaseRecord>, SearchError> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Err(SearchError::EmptyQuery);
        }

        Ok(self
            .diseases
            .iter()
            .filter(|d| {
                d.name.to_lowercase().contains(&query)
                    || d.scientific_name
                        .as_deref()
                        .is_some_and(|s| s.to_lowercase().contains(&query))
                    || d.affects_plant(&query)
            })
            .collect())
    }

    /// Diseases affecting a host plant (case-insensitive substring)
    pub fn by_plant(&self, plant: &str) -> Vec<&DiseaseRecord> {
        self.diseases
            .iter()
            .filter(|d| d.affects_plant(plant))
            .collect()
    }

    /// Summary counts, including the severity distribution
    pub fn statistics(&self) -> CatalogStatistics {
        let mut severity_distribution: Vec<(String, usize)> = Severity::ALL
            .iter()
            .map(|sev| {
                let count = self
                    .diseases
                    .iter()
                    .filter(|d| d.severity == Some(*sev))
                    .count();
                (sev.to_string(), count)
            })
            .collect();
        let unspecified = self.diseases.iter().filter(|d| d.severity.is_none()).count();
        severity_distribution.push(("Unspecified".to_string(), unspecified));

        CatalogStatistics {
            total_diseases: self.diseases.len(),
            total_symptoms: self.symptom_to_diseases.len(),
            severity_distribution,
        }
    }

    /// Export catalog to JSON
    pub fn to_json(&self) -> Result<String, CatalogError> {
        let data = CatalogData {
            version: CATALOG_VERSION.to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            diseases: self.diseases.clone(),
        };
        Ok(serde_json::to_string_pretty(&data)?)
    }

    /// Number of diseases in catalog
    pub fn len(&self) -> usize {
        self.diseases.len()
    }

    /// Check if catalog is empty
    pub fn is_empty(&self) -> bool {
        self.diseases.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DiseaseRecord> {
        self.diseases.iter()
    }
}

impl Default for DiseaseCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a DiseaseCatalog {
    type Item = &'a DiseaseRecord;
    type IntoIter = std::slice::Iter<'a, DiseaseRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.diseases.iter()
    }
}
