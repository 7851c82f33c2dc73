//! Search query and request payload models

use serde::{Deserialize, Serialize};

/// A user-initiated search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Company name fragment to look for
    pub term: String,
}

impl SearchQuery {
    /// Create a query; surrounding whitespace is dropped
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into().trim().to_string(),
        }
    }

    /// Check if query is empty
    pub fn is_empty(&self) -> bool {
        self.term.trim().is_empty()
    }
}

/// Provider-side search body
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderSearchBody {
    pub filter_groups: Vec<FilterGroup>,
    pub properties: Vec<String>,
    pub limit: u32,
}

impl ProviderSearchBody {
    /// Records whose name contains the term
    pub fn name_contains(term: &str, properties: Vec<String>, limit: u32) -> Self {
        Self {
            filter_groups: vec![FilterGroup {
                filters: vec![Filter {
                    property_name: "name".to_string(),
                    operator: "CONTAINS_TOKEN".to_string(),
                    value: term.to_string(),
                }],
            }],
            properties,
            limit,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FilterGroup {
    pub filters: Vec<Filter>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Filter {
    pub property_name: String,
    pub operator: String,
    pub value: String,
}

/// Relay-side search body; the relay builds the provider filter itself
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelaySearchBody {
    pub search_term: String,
    pub properties: Vec<String>,
    pub limit: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_is_trimmed() {
        let query = SearchQuery::new("  Acme ");
        assert_eq!(query.term, "Acme");
        assert!(!query.is_empty());
        assert!(SearchQuery::new(" \t\n").is_empty());
        assert!(SearchQuery::new("").is_empty());
    }

    #[test]
    fn test_provider_body_shape() {
        let body = ProviderSearchBody::name_contains("Acme", vec!["name".to_string()], 100);
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "filterGroups": [{
                    "filters": [{
                        "propertyName": "name",
                        "operator": "CONTAINS_TOKEN",
                        "value": "Acme"
                    }]
                }],
                "properties": ["name"],
                "limit": 100
            })
        );
    }

    #[test]
    fn test_relay_body_shape() {
        let body = RelaySearchBody {
            search_term: "Acme".to_string(),
            properties: vec!["name".to_string(), "domain".to_string()],
            limit: 100,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"searchTerm": "Acme", "properties": ["name", "domain"], "limit": 100})
        );
    }
}
