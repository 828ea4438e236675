mod rest;

pub use rest::RestTransport;

use serde_json::Value;

/// Completion handler for a dispatched API call.
///
/// Invoked exactly once with the raw response payload. Success and error
/// bodies arrive through the same path and are not differentiated here.
pub type CompletionHandler = Box<dyn FnOnce(Value) + Send + 'static>;

/// Outbound call dispatcher shared by every resource proxy.
///
/// Implementations must not block the caller and must not panic on
/// remote-side failure; whatever the server answers (or an error-shaped
/// substitute, if no answer could be obtained) is handed to `on_complete`.
pub trait Transport: Send + Sync {
    fn api_call(&self, method: &str, params: Vec<(String, String)>, on_complete: CompletionHandler);
}
