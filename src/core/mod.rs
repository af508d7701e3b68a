//! Core data types for crop disease diagnosis.
//!
//! - [`DiseaseRecord`]: A named disease with its symptoms and advice
//! - [`SymptomSelection`]: The set of symptoms a user has checked
//! - [`DiseaseId`], [`Severity`]: Catalog metadata types
//! - [`Confidence`]: Presentation band derived from a match percentage
//!
//! Symptom labels are compared **exactly**: the selection is expected to be
//! drawn from the catalog's own symptom union, so no normalization happens
//! beyond trimming at the input boundary.
//!
//! [`DiseaseRecord`]: disease::DiseaseRecord
//! [`SymptomSelection`]: selection::SymptomSelection
//! [`DiseaseId`]: types::DiseaseId
//! [`Severity`]: types::Severity
//! [`Confidence`]: types::Confidence

pub mod disease;
pub mod selection;
pub mod types;
