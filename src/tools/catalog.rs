//! Tool catalog — typed field contracts, argument validation, input schemas.
//!
//! Every tool declares a closed set of parameters. One generic routine checks a
//! raw argument object against that contract, applies defaults, and reports
//! every violation at once.

use crate::tools::enums::{ResponseFormat, ToolAnnotations, ToolKind};
use crate::types::{Error, Result};
use crate::validation::{validate_email, validate_length, validate_range};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

// =============================================================================
// Parameter types
// =============================================================================

/// Parameter type for tool inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamType {
    String,
    Int,
    Bool,
    Email,
    List(Box<ParamType>),
    Enum(Vec<String>),
    Optional(Box<ParamType>),
}

impl ParamType {
    /// Validate the JSON shape of a value against this parameter type.
    ///
    /// Lists only check that the value is an array; elements are checked by
    /// [`ParamDef::check`] so every bad element gets reported.
    pub fn validate(&self, value: &Value) -> std::result::Result<(), String> {
        match self {
            ParamType::String => {
                if value.is_string() {
                    Ok(())
                } else {
                    Err(format!("expected string, got {}", value_type_name(value)))
                }
            }
            ParamType::Int => {
                if value.is_i64() || value.is_u64() {
                    Ok(())
                } else {
                    Err(format!("expected integer, got {}", value_type_name(value)))
                }
            }
            ParamType::Bool => {
                if value.is_boolean() {
                    Ok(())
                } else {
                    Err(format!("expected boolean, got {}", value_type_name(value)))
                }
            }
            ParamType::Email => match value.as_str() {
                Some(s) => validate_email(s),
                None => Err(format!("expected email string, got {}", value_type_name(value))),
            },
            ParamType::List(_) => {
                if value.is_array() {
                    Ok(())
                } else {
                    Err(format!("expected array, got {}", value_type_name(value)))
                }
            }
            ParamType::Enum(variants) => {
                if let Some(s) = value.as_str() {
                    if variants.iter().any(|v| v == s) {
                        Ok(())
                    } else {
                        Err(format!(
                            "invalid enum value '{}', expected one of: {}",
                            s,
                            variants.join(", ")
                        ))
                    }
                } else {
                    Err(format!("expected string for enum, got {}", value_type_name(value)))
                }
            }
            ParamType::Optional(inner) => {
                if value.is_null() {
                    Ok(())
                } else {
                    inner.validate(value)
                }
            }
        }
    }

    /// Rewrite integral floats (`42.0`) as integers wherever this type expects
    /// an integer. Other values are returned unchanged.
    pub fn normalize(&self, value: &Value) -> Value {
        match (self, value) {
            (ParamType::Int, Value::Number(n)) if !n.is_i64() && !n.is_u64() => {
                integral(n).map_or_else(|| value.clone(), Value::from)
            }
            (ParamType::Optional(inner), _) => inner.normalize(value),
            (ParamType::List(inner), Value::Array(items)) => {
                Value::Array(items.iter().map(|item| inner.normalize(item)).collect())
            }
            _ => value.clone(),
        }
    }

    /// JSON Schema fragment for this type.
    pub fn json_schema(&self) -> Value {
        match self {
            ParamType::String => serde_json::json!({ "type": "string" }),
            ParamType::Int => serde_json::json!({ "type": "integer" }),
            ParamType::Bool => serde_json::json!({ "type": "boolean" }),
            ParamType::Email => serde_json::json!({ "type": "string", "format": "email" }),
            ParamType::List(inner) => serde_json::json!({
                "type": "array",
                "items": inner.json_schema(),
            }),
            ParamType::Enum(variants) => serde_json::json!({
                "type": "string",
                "enum": variants,
            }),
            ParamType::Optional(inner) => inner.json_schema(),
        }
    }
}

fn integral(n: &serde_json::Number) -> Option<i64> {
    let f = n.as_f64()?;
    (f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64).then_some(f as i64)
}

fn value_type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// =============================================================================
// Parameter definition
// =============================================================================

/// Where a validated parameter goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamLocation {
    /// Sent as a query parameter.
    #[default]
    Query,
    /// Substituted into the endpoint path.
    Path,
    /// Consumed by the server itself (never sent).
    Local,
}

/// Value constraints beyond the JSON type. Applied to each element of a list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraints {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<i64>,
}

impl Constraints {
    fn check(&self, value: &Value) -> std::result::Result<(), String> {
        if let Some(s) = value.as_str() {
            validate_length(s, self.min_length, self.max_length)?;
        }
        if value.is_number() {
            match value.as_i64() {
                Some(n) => validate_range(n, self.minimum, self.maximum)?,
                None => return Err("integer out of range".to_string()),
            }
        }
        Ok(())
    }

    fn apply_to_schema(&self, schema: &mut Map<String, Value>) {
        if let Some(v) = self.min_length {
            schema.insert("minLength".to_string(), Value::from(v));
        }
        if let Some(v) = self.max_length {
            schema.insert("maxLength".to_string(), Value::from(v));
        }
        if let Some(v) = self.minimum {
            schema.insert("minimum".to_string(), Value::from(v));
        }
        if let Some(v) = self.maximum {
            schema.insert("maximum".to_string(), Value::from(v));
        }
    }
}

/// A single parameter definition for a tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParamDef {
    pub name: String,
    pub param_type: ParamType,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(default)]
    pub location: ParamLocation,
    #[serde(default)]
    pub constraints: Constraints,
}

impl ParamDef {
    pub fn new(name: &str, param_type: ParamType, description: &str) -> Self {
        Self {
            name: name.to_string(),
            param_type,
            description: description.to_string(),
            default: None,
            location: ParamLocation::Query,
            constraints: Constraints::default(),
        }
    }

    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    pub fn at(mut self, location: ParamLocation) -> Self {
        self.location = location;
        self
    }

    pub fn with_constraints(mut self, constraints: Constraints) -> Self {
        self.constraints = constraints;
        self
    }

    pub fn is_required(&self) -> bool {
        self.default.is_none() && !matches!(self.param_type, ParamType::Optional(_))
    }

    /// Check a present, non-null value. Returns every violation found.
    pub fn check(&self, value: &Value) -> Vec<String> {
        let mut errors = Vec::new();
        self.check_value(&self.param_type, value, &self.name, &mut errors);
        errors
    }

    fn check_value(&self, ty: &ParamType, value: &Value, path: &str, errors: &mut Vec<String>) {
        match ty {
            ParamType::Optional(inner) => {
                if !value.is_null() {
                    self.check_value(inner, value, path, errors);
                }
            }
            ParamType::List(inner) => match value.as_array() {
                Some(items) => {
                    for (i, item) in items.iter().enumerate() {
                        self.check_value(inner, item, &format!("{path}[{i}]"), errors);
                    }
                }
                None => errors.push(format!(
                    "Parameter '{}': expected array, got {}",
                    path,
                    value_type_name(value)
                )),
            },
            scalar => {
                if let Err(e) = scalar.validate(value) {
                    errors.push(format!("Parameter '{}': {}", path, e));
                } else if let Err(e) = self.constraints.check(value) {
                    errors.push(format!("Parameter '{}': {}", path, e));
                }
            }
        }
    }

    /// JSON Schema for this parameter, including description and default.
    pub fn to_schema(&self) -> Value {
        let mut schema = match self.param_type.json_schema() {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        match schema.get_mut("items") {
            Some(Value::Object(items)) => self.constraints.apply_to_schema(items),
            _ => self.constraints.apply_to_schema(&mut schema),
        }
        schema.insert(
            "description".to_string(),
            Value::String(self.description.clone()),
        );
        if let Some(default) = &self.default {
            schema.insert("default".to_string(), default.clone());
        }
        Value::Object(schema)
    }
}

// =============================================================================
// Tool entry
// =============================================================================

/// Complete tool metadata entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolEntry {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Endpoint path template; `{name}` segments are filled from path params.
    pub endpoint: String,
    pub kind: ToolKind,
    pub parameters: Vec<ParamDef>,
    pub annotations: ToolAnnotations,
}

impl ToolEntry {
    pub fn param(&self, name: &str) -> Option<&ParamDef> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// Validate raw arguments against the contract.
    ///
    /// `null` (or a missing argument object) counts as `{}`. Null fields count
    /// as absent. Undeclared keys are rejected.
    pub fn validate(&self, raw: &Value) -> Result<ToolInput> {
        let empty = Map::new();
        let raw_map = match raw {
            Value::Null => &empty,
            Value::Object(map) => map,
            other => {
                return Err(Error::validation(
                    &self.id,
                    vec![format!(
                        "Arguments must be a JSON object, got {}",
                        value_type_name(other)
                    )],
                ))
            }
        };

        let mut errors = Vec::new();
        let mut values = Map::new();

        for param_def in &self.parameters {
            match raw_map.get(&param_def.name) {
                Some(value) if !value.is_null() => {
                    let value = param_def.param_type.normalize(value);
                    let param_errors = param_def.check(&value);
                    if param_errors.is_empty() {
                        values.insert(param_def.name.clone(), value);
                    } else {
                        errors.extend(param_errors);
                    }
                }
                _ => {
                    if let Some(default) = &param_def.default {
                        values.insert(param_def.name.clone(), default.clone());
                    } else if param_def.is_required() {
                        errors.push(format!("Missing required parameter: {}", param_def.name));
                    }
                }
            }
        }

        for key in raw_map.keys() {
            if self.param(key).is_none() {
                errors.push(format!("Unknown parameter: {}", key));
            }
        }

        if errors.is_empty() {
            Ok(ToolInput {
                tool_id: self.id.clone(),
                values,
            })
        } else {
            Err(Error::validation(&self.id, errors))
        }
    }

    /// Fill `{name}` segments of the endpoint template from path parameters.
    pub fn resolve_endpoint(&self, input: &ToolInput) -> Result<String> {
        let mut endpoint = self.endpoint.clone();
        for param_def in self
            .parameters
            .iter()
            .filter(|p| p.location == ParamLocation::Path)
        {
            let value = input.get(&param_def.name).ok_or_else(|| {
                Error::internal(format!(
                    "path parameter '{}' missing after validation",
                    param_def.name
                ))
            })?;
            let segment = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            endpoint = endpoint.replace(&format!("{{{}}}", param_def.name), &segment);
        }
        Ok(endpoint)
    }

    /// Closed JSON Schema describing the tool's arguments.
    pub fn to_input_schema(&self) -> Value {
        let properties: Map<String, Value> = self
            .parameters
            .iter()
            .map(|p| (p.name.clone(), p.to_schema()))
            .collect();
        let required: Vec<&str> = self
            .parameters
            .iter()
            .filter(|p| p.is_required())
            .map(|p| p.name.as_str())
            .collect();

        serde_json::json!({
            "type": "object",
            "properties": properties,
            "required": required,
            "additionalProperties": false,
        })
    }

    /// Tool descriptor as listed by `tools/list`.
    pub fn to_mcp_tool(&self) -> Value {
        serde_json::json!({
            "name": self.id,
            "title": self.title,
            "description": self.description,
            "inputSchema": self.to_input_schema(),
            "annotations": self.annotations,
        })
    }
}

// =============================================================================
// Validated input
// =============================================================================

/// Validated, defaulted arguments for one tool call. Immutable.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolInput {
    tool_id: String,
    values: Map<String, Value>,
}

impl ToolInput {
    pub fn tool_id(&self) -> &str {
        &self.tool_id
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// Boolean flag; absent means `false`.
    pub fn flag(&self, name: &str) -> bool {
        self.get(name).and_then(Value::as_bool).unwrap_or(false)
    }

    pub fn response_format(&self) -> ResponseFormat {
        self.str("response_format")
            .and_then(ResponseFormat::parse)
            .unwrap_or_default()
    }
}

// =============================================================================
// Tool catalog
// =============================================================================

/// In-memory tool catalog. Read-only once built.
#[derive(Debug, Default)]
pub struct ToolCatalog {
    entries: HashMap<String, ToolEntry>,
}

impl ToolCatalog {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Register a tool entry.
    pub fn register(&mut self, entry: ToolEntry) -> Result<()> {
        if entry.id.is_empty() {
            return Err(Error::internal("Tool id cannot be empty"));
        }
        if self.entries.contains_key(&entry.id) {
            return Err(Error::internal(format!("Tool already registered: {}", entry.id)));
        }
        self.entries.insert(entry.id.clone(), entry);
        Ok(())
    }

    /// Get a tool entry by id.
    pub fn get(&self, tool_id: &str) -> Option<&ToolEntry> {
        self.entries.get(tool_id)
    }

    /// List all tool ids.
    pub fn list_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.entries.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// List all tool entries.
    pub fn list_entries(&self) -> Vec<&ToolEntry> {
        let mut entries: Vec<&ToolEntry> = self.entries.values().collect();
        entries.sort_by(|a, b| a.id.cmp(&b.id));
        entries
    }

    /// Validate arguments for a tool, producing its `ToolInput`.
    pub fn validate_input(&self, tool_id: &str, raw: &Value) -> Result<ToolInput> {
        let entry = self
            .entries
            .get(tool_id)
            .ok_or_else(|| Error::not_found(format!("Unknown tool: {}", tool_id)))?;
        entry.validate(raw)
    }

    /// Number of registered tools.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_entry() -> ToolEntry {
        ToolEntry {
            id: "search_recordings".to_string(),
            title: "Search".to_string(),
            description: "Search recordings".to_string(),
            endpoint: "/recordings/{recording_id}/search".to_string(),
            kind: ToolKind::GetSummary,
            parameters: vec![
                ParamDef::new("recording_id", ParamType::Int, "Recording")
                    .at(ParamLocation::Path)
                    .with_constraints(Constraints {
                        minimum: Some(1),
                        ..Constraints::default()
                    }),
                ParamDef::new(
                    "query",
                    ParamType::Optional(Box::new(ParamType::String)),
                    "Search query",
                )
                .with_constraints(Constraints {
                    min_length: Some(2),
                    max_length: Some(200),
                    ..Constraints::default()
                }),
                ParamDef::new(
                    "recorded_by",
                    ParamType::Optional(Box::new(ParamType::List(Box::new(ParamType::Email)))),
                    "Recorder emails",
                ),
                ParamDef::new("include_summary", ParamType::Bool, "Include summary")
                    .with_default(json!(false)),
                ParamDef::new(
                    "response_format",
                    ParamType::Enum(vec!["markdown".to_string(), "json".to_string()]),
                    "Output format",
                )
                .with_default(json!("markdown"))
                .at(ParamLocation::Local),
            ],
            annotations: ToolAnnotations::read_only(),
        }
    }

    #[test]
    fn test_register_and_get() {
        let mut catalog = ToolCatalog::new();
        catalog.register(sample_entry()).unwrap();

        assert!(catalog.get("search_recordings").is_some());
        assert!(catalog.get("nonexistent").is_none());
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.list_ids(), vec!["search_recordings".to_string()]);
    }

    #[test]
    fn test_register_empty_or_duplicate_id_fails() {
        let mut catalog = ToolCatalog::new();
        let mut entry = sample_entry();
        entry.id = String::new();
        assert!(catalog.register(entry).is_err());

        catalog.register(sample_entry()).unwrap();
        assert!(catalog.register(sample_entry()).is_err());
    }

    #[test]
    fn test_validate_applies_defaults() {
        let input = sample_entry().validate(&json!({"recording_id": 7})).unwrap();
        assert_eq!(input.get("recording_id"), Some(&json!(7)));
        assert_eq!(input.get("include_summary"), Some(&json!(false)));
        assert_eq!(input.response_format(), ResponseFormat::Markdown);
        assert!(input.get("query").is_none());
    }

    #[test]
    fn test_null_fields_count_as_absent() {
        let input = sample_entry()
            .validate(&json!({"recording_id": 7, "query": null, "include_summary": null}))
            .unwrap();
        assert!(input.get("query").is_none());
        assert_eq!(input.get("include_summary"), Some(&json!(false)));
    }

    #[test]
    fn test_null_arguments_count_as_empty_object() {
        let err = sample_entry().validate(&Value::Null).unwrap_err();
        match err {
            Error::Validation { errors, .. } => {
                assert_eq!(errors, vec!["Missing required parameter: recording_id".to_string()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_non_object_arguments_rejected() {
        let err = sample_entry().validate(&json!([1, 2])).unwrap_err();
        assert!(err.to_string().contains("Arguments must be a JSON object, got array"));
    }

    #[test]
    fn test_every_violation_is_reported() {
        let err = sample_entry()
            .validate(&json!({
                "recording_id": 0,
                "query": "a",
                "recorded_by": ["ok@acme.com", "nope", 3],
                "response_format": "xml",
                "bogus": true,
            }))
            .unwrap_err();

        let Error::Validation { tool, errors } = err else {
            panic!("expected validation error");
        };
        assert_eq!(tool, "search_recordings");
        assert_eq!(errors.len(), 6, "errors: {errors:?}");
        assert!(errors.iter().any(|e| e.contains("'recording_id': must be >= 1, got 0")));
        assert!(errors.iter().any(|e| e.contains("'query': must be at least 2 characters")));
        assert!(errors.iter().any(|e| e.contains("'recorded_by[1]': invalid email address 'nope'")));
        assert!(errors.iter().any(|e| e.contains("'recorded_by[2]': expected email string, got number")));
        assert!(errors.iter().any(|e| e.contains("invalid enum value 'xml'")));
        assert!(errors.iter().any(|e| e == "Unknown parameter: bogus"));
    }

    #[test]
    fn test_wrong_scalar_types() {
        let err = sample_entry()
            .validate(&json!({"recording_id": "7", "include_summary": "yes"}))
            .unwrap_err();
        let Error::Validation { errors, .. } = err else {
            panic!("expected validation error");
        };
        assert_eq!(
            errors,
            vec![
                "Parameter 'recording_id': expected integer, got string".to_string(),
                "Parameter 'include_summary': expected boolean, got string".to_string(),
            ]
        );
    }

    #[test]
    fn test_integral_float_accepted_as_integer() {
        let entry = sample_entry();
        let input = entry.validate(&json!({"recording_id": 42.0})).unwrap();
        assert_eq!(input.get("recording_id"), Some(&json!(42)));
        assert_eq!(entry.resolve_endpoint(&input).unwrap(), "/recordings/42/search");
    }

    #[test]
    fn test_fractional_float_rejected_as_integer() {
        let err = sample_entry()
            .validate(&json!({"recording_id": 42.5}))
            .unwrap_err();
        let Error::Validation { errors, .. } = err else {
            panic!("expected validation error");
        };
        assert_eq!(
            errors,
            vec!["Parameter 'recording_id': expected integer, got number".to_string()]
        );
    }

    #[test]
    fn test_integral_float_still_range_checked() {
        let err = sample_entry()
            .validate(&json!({"recording_id": 0.0}))
            .unwrap_err();
        assert!(err.to_string().contains("'recording_id': must be >= 1, got 0"));
    }

    #[test]
    fn test_validate_unknown_tool() {
        let catalog = ToolCatalog::new();
        let err = catalog.validate_input("nonexistent", &json!({})).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn test_resolve_endpoint_substitutes_path_params() {
        let entry = sample_entry();
        let input = entry.validate(&json!({"recording_id": 123456})).unwrap();
        assert_eq!(
            entry.resolve_endpoint(&input).unwrap(),
            "/recordings/123456/search"
        );
    }

    #[test]
    fn test_input_schema_is_closed() {
        let schema = sample_entry().to_input_schema();
        assert_eq!(schema["additionalProperties"], json!(false));
        assert_eq!(schema["required"], json!(["recording_id"]));
        assert_eq!(schema["properties"]["recording_id"]["minimum"], json!(1));
        assert_eq!(
            schema["properties"]["recorded_by"]["items"],
            json!({"type": "string", "format": "email"})
        );
        assert_eq!(schema["properties"]["include_summary"]["default"], json!(false));
        assert_eq!(schema["properties"]["query"]["maxLength"], json!(200));
    }

    #[test]
    fn test_param_type_enum_validation() {
        let pt = ParamType::Enum(vec!["asc".to_string(), "desc".to_string()]);
        assert!(pt.validate(&json!("asc")).is_ok());
        assert!(pt.validate(&json!("bad")).is_err());
        assert!(pt.validate(&json!(42)).is_err());
    }
}
