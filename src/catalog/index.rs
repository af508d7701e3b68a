use std::collections::BTreeMap;

use crate::core::selection::SymptomSelection;

use super::store::DiseaseCatalog;

/// Finds diseases that share at least one symptom with a selection
pub struct CandidateFinder<'a> {
    catalog: &'a DiseaseCatalog,
}

impl<'a> CandidateFinder<'a> {
    pub fn new(catalog: &'a DiseaseCatalog) -> Self {
        Self { catalog }
    }

    /// Find candidate diseases via the symptom index.
    ///
    /// Returns `(catalog_index, overlap_count)` pairs in catalog order.
    /// Selected symptoms unknown to the catalog contribute nothing.
    pub fn find_candidates(&self, selection: &SymptomSelection) -> Vec<(usize, usize)> {
        let mut overlap: BTreeMap<usize, usize> = BTreeMap::new();

        for symptom in selection.iter() {
            let indices = self.catalog.diseases_with_symptom(symptom);
            if indices.is_empty() {
                tracing::debug!("Selected symptom '{}' is not in the catalog", symptom);
            }
            for &idx in indices {
                *overlap.entry(idx).or_default() += 1;
            }
        }

        overlap.into_iter().collect()
    }
}
