#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use etymo_agent::etymology::{EtymologyService, GenerationRequest, TextGenerator, UpstreamError};

/// How the fake upstream answers.
#[derive(Debug, Clone)]
pub enum Behavior {
    /// Padded text derived from the input, so trimming is observable.
    Echo,
    Reply(&'static str),
    Fail(&'static str),
    Panic,
}

/// In-memory stand-in for the LLM API that counts calls.
pub struct FakeGenerator {
    behavior: Behavior,
    calls: AtomicUsize,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl FakeGenerator {
    pub fn new(behavior: Behavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<GenerationRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl TextGenerator for FakeGenerator {
    async fn generate(&self, req: &GenerationRequest) -> Result<String, UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(req.clone());
        match &self.behavior {
            Behavior::Echo => Ok(format!("\n  Etymology of {}.  \n", req.input)),
            Behavior::Reply(text) => Ok(text.to_string()),
            Behavior::Fail(cause) => Err(UpstreamError::Malformed(cause.to_string())),
            Behavior::Panic => panic!("generator exploded"),
        }
    }
}

pub fn service_with(behavior: Behavior) -> (EtymologyService, Arc<FakeGenerator>) {
    let fake = FakeGenerator::new(behavior);
    (EtymologyService::new(fake.clone()), fake)
}

pub fn send_body(id: serde_json::Value, text: &str) -> Vec<u8> {
    serde_json::to_vec(&serde_json::json!({
        "jsonrpc": "2.0",
        "method": "message/send",
        "id": id,
        "params": {
            "message": {
                "role": "user",
                "parts": [{ "kind": "text", "text": text }]
            }
        }
    }))
    .unwrap()
}
