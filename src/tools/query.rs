//! Query builder — validated input to ordered query parameters.
//!
//! Only values that differ from the contract default are emitted; an absent
//! key always means "not filtered". Lists become repeated `key[]` pairs.

use crate::tools::catalog::{ParamLocation, ToolEntry, ToolInput};
use serde_json::Value;

/// A single query value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    Scalar(String),
    List(Vec<String>),
}

/// Ordered query parameter map. Order follows the tool contract.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParameters {
    entries: Vec<(String, QueryValue)>,
}

impl QueryParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the query for one validated call.
    pub fn from_input(entry: &ToolEntry, input: &ToolInput) -> Self {
        let mut query = Self::new();
        for param_def in &entry.parameters {
            if param_def.location != ParamLocation::Query {
                continue;
            }
            let Some(value) = input.get(&param_def.name) else {
                continue;
            };
            if param_def.default.as_ref() == Some(value) {
                continue;
            }
            if let Some(query_value) = to_query_value(value) {
                query.push(&param_def.name, query_value);
            }
        }
        query
    }

    pub fn push(&mut self, key: &str, value: QueryValue) {
        self.entries.push((key.to_string(), value));
    }

    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Flatten to wire pairs: scalars once, list elements as `key[]` in order.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        for (key, value) in &self.entries {
            match value {
                QueryValue::Scalar(s) => pairs.push((key.clone(), s.clone())),
                QueryValue::List(items) => {
                    let list_key = format!("{key}[]");
                    pairs.extend(items.iter().map(|item| (list_key.clone(), item.clone())));
                }
            }
        }
        pairs
    }
}

fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn to_query_value(value: &Value) -> Option<QueryValue> {
    match value {
        Value::Array(items) => {
            let items: Vec<String> = items.iter().filter_map(scalar_string).collect();
            if items.is_empty() {
                None
            } else {
                Some(QueryValue::List(items))
            }
        }
        other => scalar_string(other).map(QueryValue::Scalar),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::definitions::{fathom_catalog, GET_SUMMARY, LIST_MEETINGS};
    use proptest::prelude::*;
    use serde_json::json;

    fn build(tool: &str, args: Value) -> QueryParameters {
        let catalog = fathom_catalog().unwrap();
        let entry = catalog.get(tool).unwrap();
        let input = entry.validate(&args).unwrap();
        QueryParameters::from_input(entry, &input)
    }

    #[test]
    fn test_defaults_are_suppressed() {
        let query = build(
            LIST_MEETINGS,
            json!({
                "include_summary": false,
                "calendar_invitees_domains_type": "all",
                "response_format": "json",
            }),
        );
        assert!(query.is_empty(), "unexpected keys: {:?}", query.keys().collect::<Vec<_>>());
    }

    #[test]
    fn test_non_default_values_emitted_in_contract_order() {
        let query = build(
            LIST_MEETINGS,
            json!({
                "teams": ["Sales", "Engineering"],
                "include_summary": true,
                "calendar_invitees_domains_type": "one_or_more_external",
                "created_after": "2026-01-01T00:00:00Z",
            }),
        );
        assert_eq!(
            query.keys().collect::<Vec<_>>(),
            vec!["calendar_invitees_domains_type", "created_after", "include_summary", "teams"]
        );
        assert_eq!(
            query.to_pairs(),
            vec![
                ("calendar_invitees_domains_type".to_string(), "one_or_more_external".to_string()),
                ("created_after".to_string(), "2026-01-01T00:00:00Z".to_string()),
                ("include_summary".to_string(), "true".to_string()),
                ("teams[]".to_string(), "Sales".to_string()),
                ("teams[]".to_string(), "Engineering".to_string()),
            ]
        );
    }

    #[test]
    fn test_cursor_passes_through_verbatim() {
        let cursor = "eyJwYWdlIjoyfQ==/+&?";
        let query = build(LIST_MEETINGS, json!({ "cursor": cursor }));
        assert_eq!(query.to_pairs(), vec![("cursor".to_string(), cursor.to_string())]);
    }

    #[test]
    fn test_empty_list_emits_nothing() {
        let query = build(LIST_MEETINGS, json!({ "recorded_by": [] }));
        assert!(!query.contains_key("recorded_by"));
    }

    #[test]
    fn test_path_and_local_params_never_in_query() {
        let query = build(GET_SUMMARY, json!({ "recording_id": 9, "response_format": "json" }));
        assert!(query.is_empty());
    }

    proptest! {
        #[test]
        fn prop_no_default_valued_keys(
            summary in any::<bool>(),
            transcript in any::<bool>(),
            action_items in any::<bool>(),
            crm in any::<bool>(),
            domain_type in prop::sample::select(vec!["all", "only_internal", "one_or_more_external"]),
        ) {
            let catalog = fathom_catalog().unwrap();
            let entry = catalog.get(LIST_MEETINGS).unwrap();
            let input = entry.validate(&json!({
                "include_summary": summary,
                "include_transcript": transcript,
                "include_action_items": action_items,
                "include_crm_matches": crm,
                "calendar_invitees_domains_type": domain_type,
            })).unwrap();
            let query = QueryParameters::from_input(entry, &input);

            for key in query.keys() {
                let default = entry.param(key).and_then(|p| p.default.clone());
                prop_assert_ne!(input.get(key).cloned(), default, "key {} emitted at default", key);
            }
            prop_assert_eq!(query.contains_key("include_summary"), summary);
            prop_assert_eq!(query.contains_key("calendar_invitees_domains_type"), domain_type != "all");
        }

        #[test]
        fn prop_list_order_and_cardinality_preserved(
            teams in prop::collection::vec("[A-Za-z][A-Za-z ]{0,12}", 1..8),
        ) {
            let catalog = fathom_catalog().unwrap();
            let entry = catalog.get(LIST_MEETINGS).unwrap();
            let input = entry.validate(&json!({ "teams": teams.clone() })).unwrap();
            let pairs = QueryParameters::from_input(entry, &input).to_pairs();

            prop_assert_eq!(pairs.len(), teams.len());
            for ((key, value), team) in pairs.iter().zip(teams.iter()) {
                prop_assert_eq!(key.as_str(), "teams[]");
                prop_assert_eq!(value, team);
            }
        }
    }
}
