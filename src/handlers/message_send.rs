use serde_json::Value;

use crate::etymology::EtymologyService;
use crate::protocol::{first_text_part, JsonRpcError, JsonRpcRequest, Message};

/// Handle a `message/send` call.
///
/// The `message` param is validated here rather than by the envelope schema,
/// since `params` is opaque to the envelope.
pub async fn handle(req: &JsonRpcRequest, service: &EtymologyService) -> Result<Value, JsonRpcError> {
    let raw = match req.param("message") {
        Some(v) if is_present(v) => v,
        _ => return Err(JsonRpcError::invalid_params("Missing 'message' in params")),
    };

    if !raw.is_object() {
        return Err(JsonRpcError::invalid_params("Invalid 'message' in params")
            .with_data(Some(serde_json::json!({ "detail": "message must be an object" }))));
    }

    let text = first_text_part(raw)
        .ok_or_else(|| JsonRpcError::invalid_params("message.parts must include a text part"))?;

    let etymology = service.lookup(text).await.map_err(|e| e.to_rpc_error())?;

    serde_json::to_value(Message::agent_text(etymology))
        .map_err(|e| JsonRpcError::internal_error(e.to_string()))
}

/// Empty or falsy values (`null`, `false`, `0`, `""`, `{}`, `[]`) count as a
/// missing message.
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64() != Some(0.0),
        Value::String(s) => !s.is_empty(),
        Value::Object(m) => !m.is_empty(),
        Value::Array(a) => !a.is_empty(),
    }
}
