//! Tool parameter schemas
//!
//! Parameters are declared as data (`ParamSpec`) and checked explicitly at
//! dispatch time. The same descriptors are rendered to the JSON Schema shape
//! that `tools/list` advertises to the host.

use serde_json::{Map, Value, json};

/// JSON type tag for a declared parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    String,
    Integer,
    Boolean,
    StringArray,
    Object,
}

impl ParamKind {
    /// Human-readable name, used in schemas and error messages.
    pub fn name(self) -> &'static str {
        match self {
            ParamKind::String => "string",
            ParamKind::Integer => "integer",
            ParamKind::Boolean => "boolean",
            ParamKind::StringArray => "array of strings",
            ParamKind::Object => "object",
        }
    }

    fn matches(self, value: &Value) -> bool {
        match self {
            ParamKind::String => value.is_string(),
            ParamKind::Integer => value.is_i64() || value.is_u64(),
            ParamKind::Boolean => value.is_boolean(),
            ParamKind::StringArray => value
                .as_array()
                .is_some_and(|a| a.iter().all(Value::is_string)),
            ParamKind::Object => value.is_object(),
        }
    }
}

/// One declared parameter of a tool.
#[derive(Debug, Clone)]
pub struct ParamSpec {
    pub name: String,
    pub kind: ParamKind,
    pub required: bool,
    pub default: Option<Value>,
    pub description: String,
}

impl ParamSpec {
    pub fn required(name: &str, kind: ParamKind, description: &str) -> Self {
        Self {
            name: name.to_string(),
            kind,
            required: true,
            default: None,
            description: description.to_string(),
        }
    }

    /// An optional parameter always carries the default substituted when the
    /// caller omits it.
    pub fn optional(name: &str, kind: ParamKind, default: Value, description: &str) -> Self {
        Self {
            name: name.to_string(),
            kind,
            required: false,
            default: Some(default),
            description: description.to_string(),
        }
    }
}

/// Argument rejection produced by [`validate_arguments`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgumentError {
    /// Required parameter absent
    Missing { name: String },
    /// Parameter present with an incompatible JSON type, or not declared
    Invalid { name: String, expected: String },
}

/// Validate a raw argument payload against the declared parameters.
///
/// Returns the validated argument map with defaults substituted for absent
/// optional parameters. `Null` arguments are treated as an empty map (the
/// host may omit the field entirely); any other non-object payload is
/// rejected. Arguments that name no declared parameter are rejected rather
/// than silently dropped.
pub fn validate_arguments(
    specs: &[ParamSpec],
    arguments: &Value,
) -> Result<Map<String, Value>, ArgumentError> {
    let empty = Map::new();
    let supplied = match arguments {
        Value::Null => &empty,
        Value::Object(map) => map,
        _ => {
            return Err(ArgumentError::Invalid {
                name: "arguments".to_string(),
                expected: "object".to_string(),
            });
        }
    };

    for key in supplied.keys() {
        if !specs.iter().any(|s| &s.name == key) {
            return Err(ArgumentError::Invalid {
                name: key.clone(),
                expected: "no such parameter".to_string(),
            });
        }
    }

    let mut validated = Map::new();
    for spec in specs {
        match supplied.get(&spec.name) {
            Some(value) => {
                if !spec.kind.matches(value) {
                    return Err(ArgumentError::Invalid {
                        name: spec.name.clone(),
                        expected: spec.kind.name().to_string(),
                    });
                }
                validated.insert(spec.name.clone(), value.clone());
            }
            None if spec.required => {
                return Err(ArgumentError::Missing {
                    name: spec.name.clone(),
                });
            }
            None => {
                if let Some(default) = &spec.default {
                    validated.insert(spec.name.clone(), default.clone());
                }
            }
        }
    }

    Ok(validated)
}

/// Render parameter specs to the JSON Schema object advertised on
/// `tools/list`.
pub fn to_json_schema(specs: &[ParamSpec]) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();

    for spec in specs {
        let mut property = match spec.kind {
            ParamKind::StringArray => json!({
                "type": "array",
                "items": { "type": "string" },
            }),
            kind => json!({ "type": kind.name() }),
        };
        property["description"] = Value::String(spec.description.clone());
        if let Some(default) = &spec.default {
            property["default"] = default.clone();
        }
        properties.insert(spec.name.clone(), property);

        if spec.required {
            required.push(Value::String(spec.name.clone()));
        }
    }

    let mut schema = json!({
        "type": "object",
        "properties": properties,
    });
    if !required.is_empty() {
        schema["required"] = Value::Array(required);
    }
    schema
}
