//! Company search module
//!
//! Builds the provider search request, performs the single round trip and
//! hands the records to the normalizer.

mod client;
mod models;

pub use client::{preflight, CompanySource, SearchClient};
pub use models::*;
