//! crm-company-search: look up CRM company records by name
//!
//! A search term goes out through one of two transports (straight to the CRM
//! API, or through a relay that holds the credentials), the provider's records
//! are normalized into uniform rows, and the rows are handed to a display sink.

pub mod config;
pub mod display;
pub mod metrics;
pub mod network;
pub mod results;
pub mod search;
pub mod session;
pub mod transport;
pub mod web;

pub use config::{Configuration, Settings};
pub use display::{DisplaySink, DisplayStatus};
pub use results::{normalize, CompanyRecord, ErrorKind, SearchError, SearchResult};
pub use search::{SearchClient, SearchQuery};
pub use session::{SearchOutcome, SearchSession};
pub use transport::{Operation, TransportMode};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT: f64 = 10.0;

/// Hard ceiling on records requested per search
pub const MAX_PAGE_LIMIT: u32 = 100;

/// Placeholder shown for any field the provider did not return
pub const UNAVAILABLE: &str = "N/A";
