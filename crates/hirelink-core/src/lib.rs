//! hirelink-core
//!
//! The matching layer of the hirelink marketplace: a static location
//! registry with hierarchical alias expansion, the SQL predicate builder
//! both search endpoints share, keyword relevance scoring, defensive
//! stored-media decoding, and the profession category table.
//!
//! The registry is loaded once at startup and shared read-only; every
//! search request performs one expansion followed by one store round trip.

pub mod categories;
pub mod error;
pub mod expand;
pub mod media;
pub mod model;
pub mod query;
pub mod relevance;
pub mod text;

mod loader;

// Re-exports
pub use crate::error::{RegistryError, Result};
pub use crate::expand::Expansion;
pub use crate::media::StoredMedia;
pub use crate::model::{City, Country, LocationRegistry, NodeKind, RegistryStats, State};
pub use crate::query::SearchQuery;
pub use crate::relevance::{relevance_score, sort_by_relevance};
pub use crate::text::{contains_folded, equals_folded, fold_key};
