//! # symptom-solver
//!
//! A library for ranking likely crop diseases from observed symptoms.
//!
//! A grower looking at a sick plant usually sees a handful of signs: spots,
//! pustules, yellowing, wilting. Many diseases share some of those signs, so
//! no single symptom settles the question.
//!
//! `symptom-solver` scores every disease in a catalog by the share of the
//! selected symptoms it explains, and returns the candidates best first.
//!
//! ## Features
//!
//! - **Percentage scoring**: Each candidate gets a whole-number match percentage
//! - **Stable ranking**: Ties keep catalog order, so results are reproducible
//! - **Free-text input**: A description can stand in for checked symptoms
//! - **Catalog queries**: Search by name, scientific name or host plant
//!
//! ## Example
//!
//! ```rust,no_run
//! use symptom_solver::{DiseaseCatalog, SymptomSelection, SymptomMatcher};
//!
//! // Load the embedded catalog of known diseases
//! let catalog = DiseaseCatalog::load_embedded().unwrap();
//!
//! // Symptoms observed in the field
//! let selection: SymptomSelection = ["Orange pustules", "Yellow leaves"].into_iter().collect();
//!
//! // Rank diseases
//! let engine = SymptomMatcher::new(&catalog);
//! for m in engine.find_matches(&selection).unwrap() {
//!     println!("{}: {}%", m.disease_name, m.match_percent);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: Disease catalog storage and indexing
//! - [`core`]: Core data types for diseases and selections
//! - [`matching`]: Matching engine and scoring
//! - [`render`]: HTML fragments for the web interface
//! - [`cli`]: Command-line interface implementation
//! - [`web`]: Web server for browser-based diagnosis

pub mod catalog;
pub mod cli;
pub mod core;
pub mod matching;
pub mod render;
pub mod utils;
pub mod web;

// Re-export commonly used types for convenience
pub use catalog::store::DiseaseCatalog;
pub use core::disease::DiseaseRecord;
pub use core::selection::{Observation, SymptomSelection};
pub use core::types::*;
pub use matching::{match_description, match_symptoms, MatchError, MatchResult, SymptomMatcher};
