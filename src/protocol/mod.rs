pub mod message;
pub mod request;
pub mod response;

pub use message::{first_text_part, Message, Part, TextPart};
pub use request::{JsonRpcRequest, RpcId};
pub use response::{build_error, ErrorCode, JsonRpcError, JsonRpcResponse};
