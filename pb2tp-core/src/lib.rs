//! Pathbuilder 2e to Tableplop character sheet engine.
//!
//! This crate provides:
//! - The Tableplop property-tree model and its integrity check
//! - Per-tab ID allocation and proficiency/formula helpers
//! - Section builders for the Character, Actions, Inventory, Feats, Spells
//!   and Background tabs
//! - File export and ID renumbering of existing documents
//!
//! # Quick Start
//!
//! ```ignore
//! use pb2tp_core::{convert, export_file_name, save_json};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let raw = std::fs::read_to_string("build.json")?;
//!     let build = pathbuilder::unwrap_build(&raw)?;
//!
//!     let doc = convert(&build);
//!     save_json(&doc, export_file_name(&doc, None)).await?;
//!     Ok(())
//! }
//! ```

pub mod export;
pub mod ids;
pub mod items;
pub mod map;
pub mod proficiency;
pub mod property;
pub mod renumber;
pub mod writer;

// Primary public API
pub use export::{export_file_name, load_json, sanitize_file_stem, save_json, ExportError};
pub use ids::{IdAllocator, Tab};
pub use map::convert;
pub use property::{Document, IntegrityIssue, PropertyKind, PropertyNode, PropertyValue};
pub use renumber::{renumber, RenumberStats};
