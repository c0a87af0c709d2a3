//! Word-origin lookups: the in-process cache, the upstream text generator and
//! the service tying them together.

pub mod cache;
pub mod service;
pub mod upstream;

pub use cache::{cache_key, EtymologyCache};
pub use service::{EtymologyService, LookupError, ETYMOLOGY_INSTRUCTIONS, NO_WORD_REPLY, TEMPERATURE};
pub use upstream::{GenerationRequest, OpenAiClient, TextGenerator, UpstreamError};
