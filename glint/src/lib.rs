//! Glint Core - icon search for the launcher extension
//!
//! Loads an icon catalog once, ranks its variants for short interactive
//! queries with tiered name/category/keyword scoring, and renders the chosen
//! icon as HTML, a class string, a Unicode entity, or recolored SVG.
//!
//! Types are exported via UniFFI proc-macros (#[derive(uniffi::Record/Enum)]).

pub(crate) mod candidate;
pub mod catalog;
pub mod config;
pub mod interface;
pub mod models;
pub mod ranking;
pub mod render;
pub mod search;
mod store;

pub use catalog::{Catalog, CatalogLoadError, CatalogResult};
pub use config::QueryConfig;
pub use interface::*;
pub use models::IconVariant;
pub use search::{search, ResultDescriptor};
pub use store::IconSearcher;

uniffi::setup_scaffolding!("glint");
