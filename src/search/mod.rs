//! Catalog search: text normalization, relevance scoring and ordering.

pub mod relevance;
pub mod text;

pub use relevance::{filter_and_sort, relevance, SortOrder};
pub use text::{normalize, normalize_query};
