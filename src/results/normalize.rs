//! Provider record normalization
//!
//! Provider records look like `{"id": "...", "properties": {"name": ..., ...}}`.
//! Every field is defaulted on its own, so a record with holes still becomes a
//! row; nothing is dropped and the provider's order is kept.

use super::types::{CompanyRecord, RecordSource};
use crate::UNAVAILABLE;
use serde_json::Value;

/// Convert raw provider records into rows, preserving order
pub fn normalize(raw: &[Value]) -> Vec<CompanyRecord> {
    raw.iter().map(normalize_record).collect()
}

fn normalize_record(record: &Value) -> CompanyRecord {
    let props = record.get("properties");
    let field = |name: &str| props.and_then(|p| p.get(name)).and_then(text);

    CompanyRecord {
        name: field("name").unwrap_or_else(unavailable),
        domain: field("domain")
            .or_else(|| field("website"))
            .unwrap_or_else(unavailable),
        phone: field("phone").unwrap_or_else(unavailable),
        city: field("city").unwrap_or_else(unavailable),
        industry: field("industry").unwrap_or_else(unavailable),
        origin_id: record.get("id").and_then(text).unwrap_or_default(),
        source: RecordSource::Remote,
    }
}

/// Usable text for a JSON value; null and empty strings count as absent
fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn unavailable() -> String {
    UNAVAILABLE.to_string()
}
