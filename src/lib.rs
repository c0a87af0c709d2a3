//! Etymology agent speaking the A2A `message/send` convention.
//!
//! Exposes a single JSON-RPC 2.0 endpoint over HTTP. The first text part of
//! an incoming message names a word; its origin is fetched from an LLM,
//! cached in-process and returned as an agent message.

pub mod config;
pub mod etymology;
pub mod guard;
pub mod handlers;
pub mod protocol;
pub mod server;

pub mod schema;
