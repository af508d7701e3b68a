//! Web server for browser-based diagnosis.
//!
//! Serves the disease lookup page and a JSON API over the same catalog and
//! matcher the CLI uses. All markup is rendered server-side by
//! [`crate::render::html`].
//!
//! ## Starting the Server
//!
//! ```text
//! # Start on default port 8080
//! symptom-solver serve
//!
//! # Custom port and auto-open browser
//! symptom-solver serve --port 3000 --open
//! ```
//!
//! ## API Endpoints
//!
//! - `GET /` - Lookup page with disease cards and symptom checkboxes
//! - `GET /health` - Reachability check
//! - `GET /api/diseases`, `GET /api/disease/{id}` - Catalog entries
//! - `GET /api/symptoms` - Sorted symptom union
//! - `POST /api/match-symptoms` - Rank diseases (JSON)
//! - `POST /api/diagnose` - Rank diseases (HTML fragment)
//! - `POST /api/search-diseases` - Search by name, latin name or plant
//! - `GET /api/diseases-by-plant/{plant}` - Diseases of one host plant
//! - `GET /api/statistics` - Catalog counts

pub mod server;
