//! HTTP networking module
//!
//! Provides the HTTP client used to reach the CRM API or the relay.

mod client;
mod request;

pub use client::HttpClient;
pub use request::{ApiRequest, ApiResponse, HttpMethod, RequestBody};
