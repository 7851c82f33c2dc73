//! Result types for company searches
//!
//! This module defines the normalized row model, the error taxonomy, and the
//! normalizer that turns provider records into rows.

mod error;
mod normalize;
mod types;

pub use error::{ErrorKind, SearchError};
pub use normalize::normalize;
pub use types::*;

/// Outcome of a single search: the ordered rows, or the reason there are none
pub type SearchResult = std::result::Result<Vec<CompanyRecord>, SearchError>;
