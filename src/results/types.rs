//! Result type definitions

use crate::UNAVAILABLE;
use serde::{Deserialize, Serialize};

/// A single normalized company row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyRecord {
    /// Company name
    pub name: String,
    /// Primary domain, or the website when no domain is recorded
    pub domain: String,
    /// Phone number
    pub phone: String,
    /// City
    pub city: String,
    /// Industry label
    pub industry: String,
    /// Provider record identifier, empty when the provider sent none
    pub origin_id: String,
    /// Where this row came from
    #[serde(default)]
    pub source: RecordSource,
}

impl CompanyRecord {
    /// Create a row with every display field set to the placeholder
    pub fn unavailable(origin_id: impl Into<String>) -> Self {
        Self {
            name: UNAVAILABLE.to_string(),
            domain: UNAVAILABLE.to_string(),
            phone: UNAVAILABLE.to_string(),
            city: UNAVAILABLE.to_string(),
            industry: UNAVAILABLE.to_string(),
            origin_id: origin_id.into(),
            source: RecordSource::Remote,
        }
    }

    /// Display cells in table column order
    pub fn cells(&self) -> [&str; 5] {
        [
            &self.name,
            &self.domain,
            &self.phone,
            &self.city,
            &self.industry,
        ]
    }
}

/// Origin tag for a row
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordSource {
    #[default]
    Remote,
}

/// Column headings for the five displayed fields
pub const COLUMNS: [&str; 5] = ["Company Name", "Domain", "Phone Number", "City", "Industry"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_row() {
        let row = CompanyRecord::unavailable("42");
        assert_eq!(row.origin_id, "42");
        assert!(row.cells().iter().all(|c| *c == UNAVAILABLE));
        assert_eq!(row.source, RecordSource::Remote);
    }

    #[test]
    fn test_serializes_source_tag() {
        let row = CompanyRecord::unavailable("1");
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["source"], "remote");
        assert_eq!(json["originId"], "1");
    }
}
