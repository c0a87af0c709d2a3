//! Last-resort failure handling.
//!
//! A process-wide panic hook logs every panic and remembers its rendered
//! backtrace on the panicking thread; [`guarded`] turns a panic inside a
//! request future into an INTERNAL_ERROR response carrying that trace.

use std::any::Any;
use std::backtrace::Backtrace;
use std::cell::RefCell;
use std::future::Future;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use serde_json::json;

use crate::protocol::{build_error, ErrorCode, JsonRpcResponse, RpcId};

thread_local! {
    static LAST_TRACE: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// Install the logging panic hook. Replaces any previous hook.
pub fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        let trace = Backtrace::force_capture();
        tracing::error!(panic = %info, "unhandled failure\n{trace}");
        LAST_TRACE.with(|slot| *slot.borrow_mut() = Some(format!("{info}\n{trace}")));
    }));
}

/// Trace recorded by the hook for the most recent panic on this thread.
fn take_trace() -> Option<String> {
    LAST_TRACE.with(|slot| slot.borrow_mut().take())
}

/// Human-readable text of a panic payload.
fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

/// INTERNAL_ERROR envelope for a caught panic, with `detail` and `trace` data.
///
/// Must run on the thread that panicked for the hook's trace to be found;
/// otherwise the current backtrace is rendered instead.
pub fn recover(id: Option<RpcId>, payload: Box<dyn Any + Send>) -> JsonRpcResponse {
    let detail = panic_message(payload.as_ref());
    let trace = take_trace().unwrap_or_else(|| Backtrace::force_capture().to_string());
    tracing::error!(%detail, "request handler panicked");
    build_error(
        id,
        ErrorCode::InternalError,
        ErrorCode::InternalError.canonical_message(),
        Some(json!({ "detail": detail, "trace": trace })),
    )
}

/// Run `fut`, converting a panic into an INTERNAL_ERROR response whose id is
/// extracted best-effort from `raw_body`.
pub async fn guarded<F>(raw_body: &[u8], fut: F) -> JsonRpcResponse
where
    F: Future<Output = JsonRpcResponse>,
{
    match AssertUnwindSafe(fut).catch_unwind().await {
        Ok(resp) => resp,
        Err(payload) => recover(RpcId::best_effort_from_bytes(raw_body), payload),
    }
}
