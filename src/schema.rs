use jsonschema::validator_for;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::protocol::{JsonRpcRequest, RpcId};

/// JSON Schema (draft 2020-12) of the response envelope this agent emits.
pub const RESPONSE_SCHEMA: &str = r#"{
  "$schema": "https://json-schema.org/draft/2020-12/schema",
  "title": "JSON-RPC 2.0 Response",
  "type": "object",
  "required": ["jsonrpc", "id"],
  "additionalProperties": false,
  "properties": {
    "jsonrpc": { "const": "2.0" },
    "id": { "type": ["string", "integer", "null"] },
    "result": {},
    "error": {
      "type": "object",
      "required": ["code", "message"],
      "additionalProperties": false,
      "properties": {
        "code": { "enum": [-32700, -32600, -32601, -32602, -32603] },
        "message": { "type": "string", "minLength": 1 },
        "data": {}
      }
    }
  },
  "oneOf": [
    { "required": ["result"], "not": { "required": ["error"] } },
    { "required": ["error"], "not": { "required": ["result"] } }
  ]
}"#;

#[derive(Debug, thiserror::Error)]
pub enum SchemaValidationError {
    #[error("Schema parse error: {0}")]
    SchemaParse(#[from] serde_json::Error),
    #[error("Schema compile error: {0}")]
    SchemaCompile(String),
    #[error("Instance validation failed")]
    ValidationFailed,
}

/// Validate a JSON instance against a JSON Schema (draft 2020-12).
/// Returns Ok(()) if valid, Err otherwise.
pub fn validate_json(schema_str: &str, instance_str: &str) -> Result<(), SchemaValidationError> {
    let schema_json: Value = serde_json::from_str(schema_str)?;
    let instance_json: Value = serde_json::from_str(instance_str)?;

    let validator = validator_for(&schema_json)
        .map_err(|e| SchemaValidationError::SchemaCompile(e.to_string()))?;

    if validator.is_valid(&instance_json) {
        Ok(())
    } else {
        Err(SchemaValidationError::ValidationFailed)
    }
}

/// One structural problem found in a request envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// JSON pointer to the offending field (`""` for the document root).
    pub path: String,
    pub message: String,
}

impl Violation {
    fn new(path: &str, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Structurally validate a decoded JSON-RPC request.
///
/// Every violation is reported, not just the first. `params` stays an opaque
/// object here; method-specific payloads are checked by their handlers.
pub fn validate_request(value: &Value) -> Result<JsonRpcRequest, Vec<Violation>> {
    let obj = match value.as_object() {
        Some(obj) => obj,
        None => return Err(vec![Violation::new("", "request must be a JSON object")]),
    };

    let mut violations = Vec::new();

    match obj.get("jsonrpc") {
        None => {}
        Some(Value::String(v)) if v == "2.0" => {}
        Some(_) => violations.push(Violation::new("/jsonrpc", "must be the string \"2.0\"")),
    }

    let method = match obj.get("method") {
        None => {
            violations.push(Violation::new("/method", "field required"));
            None
        }
        Some(Value::String(m)) if m.is_empty() => {
            violations.push(Violation::new("/method", "must be a non-empty string"));
            None
        }
        Some(Value::String(m)) => Some(m.clone()),
        Some(_) => {
            violations.push(Violation::new("/method", "must be a string"));
            None
        }
    };

    let id = match obj.get("id") {
        None | Some(Value::Null) => None,
        Some(raw) => match RpcId::from_value(raw) {
            Some(id) => Some(id),
            None => {
                violations.push(Violation::new("/id", "must be a string or an integer"));
                None
            }
        },
    };

    let params: Option<Map<String, Value>> = match obj.get("params") {
        None | Some(Value::Null) => None,
        Some(Value::Object(p)) => Some(p.clone()),
        Some(_) => {
            violations.push(Violation::new("/params", "must be an object"));
            None
        }
    };

    match method {
        Some(method) if violations.is_empty() => Ok(JsonRpcRequest::new(method, id, params)),
        _ => Err(violations),
    }
}
