//! Symptom matching and ranking.
//!
//! - [`match_symptoms`]: Pure ranking of a catalog against a selection
//! - [`SymptomMatcher`]: The same ranking driven by the catalog's symptom index
//! - [`MatchResult`]: One ranked disease with matched and unmatched symptoms
//! - [`describe`]: Ranking against a free-text description
//!
//! ## Scoring
//!
//! A disease's score is the share of the *selection* it explains:
//!
//! ```text
//! match_percent = round(100 * |selection ∩ disease.symptoms| / |selection|)
//! ```
//!
//! Diseases with no overlap are left out. Results are sorted by score,
//! highest first, and ties keep catalog order.
//!
//! A free-text description is scored per disease instead, over that
//! disease's own symptom list (see [`describe::match_description`]).
//!
//! ## Example
//!
//! ```rust,no_run
//! use symptom_solver::{DiseaseCatalog, SymptomMatcher, SymptomSelection};
//!
//! let catalog = DiseaseCatalog::load_embedded().unwrap();
//! let selection: SymptomSelection = ["Orange pustules", "Yellow leaves"].into_iter().collect();
//!
//! match SymptomMatcher::new(&catalog).find_matches(&selection) {
//!     Ok(results) => {
//!         for m in &results {
//!             println!("{}: {}%", m.disease_name, m.match_percent);
//!         }
//!     }
//!     Err(e) => eprintln!("{e}"),
//! }
//! ```

pub mod describe;
pub mod engine;
pub mod scoring;

pub use describe::match_description;
pub use engine::{match_symptoms, MatchError, MatchResult, SymptomMatcher};
