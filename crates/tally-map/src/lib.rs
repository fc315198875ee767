//! Division mapping: the table that assigns stations to divisions.
//!
//! # Features
//!
//! - **Parsing**: JSON mapping text into an ordered [`MappingTable`]
//! - **Store**: the active table with all-or-nothing replacement
//! - **Repository**: JSON file persistence under a fixed key
//! - **Classification**: case-insensitive, first-division-wins lookup
//!
//! [`MappingTable`]: tally_model::MappingTable

mod classify;
mod error;
mod parse;
mod repository;
mod store;

// === Error Types ===
pub use error::{MapError, Result};

// === Parsing ===
pub use parse::{default_mapping, fold_key, mapping_to_json, parse_mapping_text};

// === Storage ===
pub use repository::{MAPPING_KEY, MappingRepository, StoredMapping};
pub use store::{MappingSource, MappingStore};

// === Classification ===
pub use classify::{DivisionClassifier, classify};
