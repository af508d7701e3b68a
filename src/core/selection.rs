use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The set of symptom labels a user checked before asking for a diagnosis.
///
/// Iteration is in sorted order, which is also the order the symptom
/// checkboxes are presented in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymptomSelection {
    symptoms: BTreeSet<String>,
}

impl SymptomSelection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a symptom; returns false if it was already selected
    pub fn insert(&mut self, symptom: impl Into<String>) -> bool {
        self.symptoms.insert(symptom.into())
    }

    #[must_use]
    pub fn contains(&self, symptom: &str) -> bool {
        self.symptoms.contains(symptom)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.symptoms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symptoms.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.symptoms.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for SymptomSelection {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            symptoms: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a SymptomSelection {
    type Item = &'a String;
    type IntoIter = std::collections::btree_set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.symptoms.iter()
    }
}

/// What the user reported about a sick plant.
///
/// Checked labels are scored against the selection size; a description is
/// scored against each disease's own symptom list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Observation {
    /// Labels picked from the catalog's symptom list
    Checked(SymptomSelection),
    /// Free text, trimmed
    Described(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_is_a_set() {
        let mut sel: SymptomSelection = ["Yellow leaves", "Brown spots"].into_iter().collect();
        assert_eq!(sel.len(), 2);
        assert!(!sel.insert("Brown spots"));
        assert_eq!(sel.len(), 2);
    }

    #[test]
    fn test_selection_iterates_sorted() {
        let sel: SymptomSelection = ["Yellow leaves", "Brown spots", "Orange pustules"]
            .into_iter()
            .collect();
        let order: Vec<&str> = sel.iter().collect();
        assert_eq!(order, vec!["Brown spots", "Orange pustules", "Yellow leaves"]);
    }

    #[test]
    fn test_selection_json_is_plain_array() {
        let sel: SymptomSelection = serde_json::from_str(r#"["B","A","B"]"#).unwrap();
        assert_eq!(sel.len(), 2);
        assert_eq!(serde_json::to_string(&sel).unwrap(), r#"["A","B"]"#);
    }
}
