//! OpenAI Responses API client against a mock HTTP server.

use std::sync::Arc;

use etymo_agent::etymology::{
    EtymologyService, GenerationRequest, OpenAiClient, TextGenerator, UpstreamError,
    ETYMOLOGY_INSTRUCTIONS,
};
use mockito::Matcher;
use serde_json::json;

fn request(input: &str) -> GenerationRequest {
    GenerationRequest {
        instructions: ETYMOLOGY_INSTRUCTIONS.to_string(),
        temperature: 0.2,
        input: input.to_string(),
    }
}

#[tokio::test]
async fn sends_model_instructions_temperature_and_input() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/responses")
        .match_header("authorization", "Bearer sk-test")
        .match_body(Matcher::PartialJson(json!({
            "model": "gpt-4o-mini",
            "temperature": 0.2,
            "input": "quarantine",
            "instructions": ETYMOLOGY_INSTRUCTIONS,
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"output_text": "From Venetian quaranta giorni, forty days."}"#)
        .create_async()
        .await;

    let client = OpenAiClient::new(&format!("{}/v1/", server.url()), "sk-test", "gpt-4o-mini");
    let text = client.generate(&request("quarantine")).await.unwrap();

    assert_eq!(text, "From Venetian quaranta giorni, forty days.");
    mock.assert_async().await;
}

#[tokio::test]
async fn reads_text_from_output_blocks() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/responses")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "id": "resp_1",
                "output": [{
                    "type": "message",
                    "role": "assistant",
                    "content": [{ "type": "output_text", "text": "Blend of breakfast and lunch." }]
                }]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = OpenAiClient::new(&server.url(), "sk-test", "gpt-4o-mini");
    let text = client.generate(&request("brunch")).await.unwrap();
    assert_eq!(text, "Blend of breakfast and lunch.");
}

#[tokio::test]
async fn non_success_status_is_an_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/responses")
        .with_status(429)
        .with_body(r#"{"error":{"message":"Rate limit reached"}}"#)
        .create_async()
        .await;

    let client = OpenAiClient::new(&server.url(), "sk-test", "gpt-4o-mini");
    let err = client.generate(&request("oak")).await.unwrap_err();

    match &err {
        UpstreamError::Status { status, body } => {
            assert_eq!(*status, 429);
            assert!(body.contains("Rate limit reached"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn undecodable_body_is_malformed() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/responses")
        .with_status(200)
        .with_body("<html>gateway</html>")
        .create_async()
        .await;

    let client = OpenAiClient::new(&server.url(), "sk-test", "gpt-4o-mini");
    let err = client.generate(&request("oak")).await.unwrap_err();
    assert!(matches!(err, UpstreamError::Malformed(_)));
}

#[tokio::test]
async fn unreachable_upstream_is_transport_error() {
    // Port 9 (discard) on loopback is closed in test environments.
    let client = OpenAiClient::new("http://127.0.0.1:9", "sk-test", "gpt-4o-mini");
    let err = client.generate(&request("oak")).await.unwrap_err();
    assert!(matches!(err, UpstreamError::Transport(_)));
}

#[tokio::test]
async fn service_calls_api_once_per_word() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/responses")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"output_text": "  From Old English ac.  "}"#)
        .expect(1)
        .create_async()
        .await;

    let client = OpenAiClient::new(&server.url(), "sk-test", "gpt-4o-mini");
    let service = EtymologyService::new(Arc::new(client));

    assert_eq!(service.lookup("Oak").await.unwrap(), "From Old English ac.");
    assert_eq!(service.lookup("oak tree").await.unwrap(), "From Old English ac.");
    mock.assert_async().await;
}
