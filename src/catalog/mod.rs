//! Disease catalog storage and indexing.
//!
//! The catalog holds the known crop diseases with their symptoms, advice and
//! host plants. An embedded catalog is compiled into the binary, but custom
//! catalogs can also be loaded from JSON files.
//!
//! ## Embedded Catalog
//!
//! The default catalog covers common foliar and vascular diseases:
//!
//! - **Leaf Blight**, **Rust**, **Yellowing / Chlorosis**
//! - **Early Blight**, **Late Blight**, **Powdery Mildew**
//! - **Bacterial Spot**, **Septoria Leaf Spot**, **Fusarium Wilt**
//!
//! ## Example
//!
//! ```rust,no_run
//! use symptom_solver::DiseaseCatalog;
//! use symptom_solver::core::types::DiseaseId;
//!
//! let catalog = DiseaseCatalog::load_embedded().unwrap();
//!
//! for disease in &catalog {
//!     println!("{}", disease.id);
//! }
//!
//! let rust = catalog.get(&DiseaseId::new("rust"));
//! ```
//!
//! ## Custom Catalogs
//!
//! ```rust,no_run
//! use symptom_solver::DiseaseCatalog;
//! use std::path::Path;
//!
//! let catalog = DiseaseCatalog::load_embedded().unwrap();
//! let json = catalog.to_json().unwrap();
//!
//! let custom = DiseaseCatalog::load_from_file(Path::new("my_catalog.json")).unwrap();
//! ```

pub mod index;
pub mod store;
