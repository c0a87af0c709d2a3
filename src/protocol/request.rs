use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// JSON-RPC 2.0 ID: a number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RpcId {
    Number(i64),
    Str(String),
}

impl RpcId {
    /// Interpret a raw JSON value as an id, if it has an acceptable shape.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self::Str(s.clone())),
            Value::Number(n) => n.as_i64().map(Self::Number),
            _ => None,
        }
    }

    /// Best-effort id extraction from an arbitrary decoded body.
    ///
    /// Used on failure paths where the request never made it through
    /// validation; anything that is not an object with a usable `id` yields
    /// `None`.
    pub fn best_effort(body: &Value) -> Option<Self> {
        body.get("id").and_then(Self::from_value)
    }

    /// Same as [`RpcId::best_effort`] but starting from raw bytes.
    pub fn best_effort_from_bytes(raw: &[u8]) -> Option<Self> {
        serde_json::from_slice::<Value>(raw)
            .ok()
            .and_then(|body| Self::best_effort(&body))
    }
}

/// JSON-RPC 2.0 request envelope, as accepted by the schema validator.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub id: Option<RpcId>,
    pub method: String,
    pub params: Option<Map<String, Value>>,
}

impl JsonRpcRequest {
    pub fn new(method: impl Into<String>, id: Option<RpcId>, params: Option<Map<String, Value>>) -> Self {
        Self {
            jsonrpc: "2.0".into(),
            id,
            method: method.into(),
            params,
        }
    }

    /// Look up a single entry in `params`.
    pub fn param(&self, name: &str) -> Option<&Value> {
        self.params.as_ref().and_then(|p| p.get(name))
    }
}
