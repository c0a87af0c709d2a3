pub mod message_send;

use serde_json::Value;

use crate::etymology::EtymologyService;
use crate::protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, RpcId};
use crate::schema;

/// The only RPC method this agent serves.
pub const MESSAGE_SEND: &str = "message/send";

/// Turn a raw request body into exactly one JSON-RPC response.
///
/// Parse failures answer with `id: null`; validation failures echo whatever
/// usable `id` the body carried.
pub async fn handle_body(body: &[u8], service: &EtymologyService) -> JsonRpcResponse {
    let payload: Value = match serde_json::from_slice(body) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(error = %e, "failed to parse JSON body");
            return JsonRpcResponse::error(None, JsonRpcError::parse_error(e.to_string()));
        }
    };

    let req = match schema::validate_request(&payload) {
        Ok(req) => req,
        Err(violations) => {
            tracing::debug!(?violations, "invalid JSON-RPC request");
            let errors = serde_json::to_value(&violations).unwrap_or(Value::Null);
            return JsonRpcResponse::error(
                RpcId::best_effort(&payload),
                JsonRpcError::invalid_request(errors),
            );
        }
    };

    dispatch(&req, service).await
}

/// Dispatch a validated JSON-RPC request to the appropriate handler.
pub async fn dispatch(req: &JsonRpcRequest, service: &EtymologyService) -> JsonRpcResponse {
    match req.method.as_str() {
        MESSAGE_SEND => match message_send::handle(req, service).await {
            Ok(result) => JsonRpcResponse::success(req.id.clone(), result),
            Err(error) => JsonRpcResponse::error(req.id.clone(), error),
        },

        _ => {
            tracing::debug!(method = %req.method, "method not found");
            JsonRpcResponse::error(req.id.clone(), JsonRpcError::method_not_found(&req.method))
        }
    }
}
