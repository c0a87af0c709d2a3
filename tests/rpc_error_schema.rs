use jsonschema::validator_for;
use serde_json::{json, Value};

use etymo_agent::protocol::{build_error, ErrorCode, JsonRpcResponse, Message, RpcId};
use etymo_agent::schema::RESPONSE_SCHEMA;

fn response_validator() -> jsonschema::Validator {
    let schema_json: Value = serde_json::from_str(RESPONSE_SCHEMA).unwrap();
    validator_for(&schema_json).unwrap()
}

#[test]
fn golden_error_envelope() {
    // 1. Build an error response the way the dispatcher does
    let response = build_error(
        Some(RpcId::Number(1)),
        ErrorCode::InvalidParams,
        "Missing 'message' in params",
        None,
    );

    let json_str = serde_json::to_string_pretty(&response).unwrap();
    let json_value: Value = serde_json::from_str(&json_str).unwrap();

    // 2. Validate against the published envelope schema
    assert!(response_validator().is_valid(&json_value), "error JSON must satisfy the envelope schema");

    // 3. Golden snapshot (byte-identical, stable)
    let expected = r#"{
  "jsonrpc": "2.0",
  "id": 1,
  "error": {
    "code": -32602,
    "message": "Missing 'message' in params"
  }
}"#;

    assert_eq!(json_str.trim(), expected.trim(), "error JSON snapshot mismatch");
}

#[test]
fn golden_parse_error_has_null_id() {
    let response = build_error(None, ErrorCode::ParseError, "Parse error", Some(json!({ "detail": "EOF" })));
    let json_str = serde_json::to_string(&response).unwrap();

    assert_eq!(
        json_str,
        r#"{"jsonrpc":"2.0","id":null,"error":{"code":-32700,"message":"Parse error","data":{"detail":"EOF"}}}"#
    );
}

#[test]
fn every_code_maps_to_reserved_range() {
    let expected = [
        (ErrorCode::ParseError, -32700, "Parse error"),
        (ErrorCode::InvalidRequest, -32600, "Invalid Request"),
        (ErrorCode::MethodNotFound, -32601, "Method not found"),
        (ErrorCode::InvalidParams, -32602, "Invalid params"),
        (ErrorCode::InternalError, -32603, "Internal error"),
    ];

    let validator = response_validator();
    for (code, number, message) in expected {
        assert_eq!(code.code(), number);
        assert_eq!(code.canonical_message(), message);
        assert_eq!(ErrorCode::from_code(number), Some(code));

        let resp = build_error(Some(RpcId::Str("r".into())), code, message, None);
        assert!(resp.result.is_none());
        assert_eq!(resp.error.as_ref().and_then(|e| e.kind()), Some(code));
        assert!(validator.is_valid(&serde_json::to_value(&resp).unwrap()));
    }

    assert_eq!(ErrorCode::from_code(-32000), None);
}

#[test]
fn success_envelope_satisfies_schema() {
    let message = serde_json::to_value(Message::agent_text("From Latin quercus.")).unwrap();
    let resp = JsonRpcResponse::success(Some(RpcId::Str("abc".into())), message);
    let value = serde_json::to_value(&resp).unwrap();

    assert!(response_validator().is_valid(&value));
    assert!(value.get("error").is_none());
    assert_eq!(value["result"]["role"], "agent");
}

#[test]
fn schema_rejects_both_result_and_error() {
    let value = json!({
        "jsonrpc": "2.0",
        "id": 1,
        "result": {},
        "error": { "code": -32603, "message": "Internal error" }
    });
    assert!(!response_validator().is_valid(&value));

    let value = json!({ "jsonrpc": "2.0", "id": 1 });
    assert!(!response_validator().is_valid(&value));
}
