use std::sync::mpsc;
use std::sync::Mutex;
use std::thread::JoinHandle;

use serde_json::{json, Value};
use uuid::Uuid;

use super::{CompletionHandler, Transport};
use crate::config::ClientConfig;
use crate::error::{Result, SlackError};

/// A single queued API call
struct ApiRequest {
    id: Uuid,
    method: String,
    params: Vec<(String, String)>,
    on_complete: CompletionHandler,
}

/// REST transport backed by a dispatch worker thread.
///
/// `api_call` enqueues the request and returns immediately; the worker
/// performs the blocking HTTP round trip and fires the completion handler.
/// The token never appears in params supplied by callers; it is injected
/// here, right before the wire.
pub struct RestTransport {
    http: reqwest::blocking::Client,
    base_url: String,
    token: String,
    sender: Mutex<Option<mpsc::Sender<ApiRequest>>>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl RestTransport {
    /// Build a transport from a validated configuration and start its
    /// dispatch worker.
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let http = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| SlackError::Http(e.to_string()))?;

        let (sender, receiver) = mpsc::channel::<ApiRequest>();

        let worker_http = http.clone();
        let worker_base_url = config.base_url.clone();
        let worker_token = config.token.clone();
        let worker = std::thread::spawn(move || {
            Self::dispatch_loop(receiver, worker_http, worker_base_url, worker_token);
        });

        Ok(Self {
            http,
            base_url: config.base_url,
            token: config.token,
            sender: Mutex::new(Some(sender)),
            worker: Mutex::new(Some(worker)),
        })
    }

    /// Worker loop: drains the queue until every sender is gone, so calls
    /// enqueued before shutdown still complete.
    fn dispatch_loop(
        receiver: mpsc::Receiver<ApiRequest>,
        http: reqwest::blocking::Client,
        base_url: String,
        token: String,
    ) {
        while let Ok(request) = receiver.recv() {
            let ApiRequest {
                id,
                method,
                params,
                on_complete,
            } = request;

            let payload = match Self::execute(&http, &base_url, &token, &method, params) {
                Ok(payload) => payload,
                Err(err) => {
                    log::warn!("api call {} ({}) failed in transport: {}", method, id, err);
                    json!({ "ok": false, "error": err.to_string() })
                }
            };

            on_complete(payload);
        }

        log::debug!("dispatch worker stopped");
    }

    /// One blocking round trip: form-encoded POST, JSON decode.
    ///
    /// An `{"ok": false}` body is not an error at this layer; only failing to
    /// obtain a decodable body is.
    fn execute(
        http: &reqwest::blocking::Client,
        base_url: &str,
        token: &str,
        method: &str,
        mut params: Vec<(String, String)>,
    ) -> Result<Value> {
        params.push(("token".to_string(), token.to_string()));

        let url = format!("{}/{}", base_url, method);
        let response = http
            .post(&url)
            .form(&params)
            .send()
            .map_err(|e| SlackError::Http(e.to_string()))?;

        let body = response
            .text()
            .map_err(|e| SlackError::Http(e.to_string()))?;

        serde_json::from_str(&body).map_err(|e| SlackError::Decode(e.to_string()))
    }

    /// Synchronous variant of [`Transport::api_call`], bypassing the queue.
    /// Used where the caller needs the payload in hand, e.g. directory loads.
    pub fn call_blocking(&self, method: &str, params: Vec<(String, String)>) -> Result<Value> {
        Self::execute(&self.http, &self.base_url, &self.token, method, params)
    }

    /// Stop accepting new calls, drain the queue, and join the worker.
    /// Safe to call more than once; later calls are no-ops.
    pub fn shutdown(&self) {
        if let Ok(mut sender) = self.sender.lock() {
            sender.take();
        }
        if let Ok(mut worker) = self.worker.lock() {
            if let Some(handle) = worker.take() {
                let _ = handle.join();
            }
        }
    }
}

impl Transport for RestTransport {
    fn api_call(&self, method: &str, params: Vec<(String, String)>, on_complete: CompletionHandler) {
        let request = ApiRequest {
            id: Uuid::new_v4(),
            method: method.to_string(),
            params,
            on_complete,
        };

        log::debug!("dispatching {} ({})", request.method, request.id);

        let guard = match self.sender.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let undelivered = match guard.as_ref() {
            Some(sender) => match sender.send(request) {
                Ok(()) => None,
                Err(mpsc::SendError(request)) => Some(request),
            },
            None => Some(request),
        };
        drop(guard);

        // The handler still fires exactly once even when the queue is gone
        if let Some(request) = undelivered {
            log::warn!("dispatch queue closed; completing {} locally", request.method);
            (request.on_complete)(json!({ "ok": false, "error": "dispatch_queue_closed" }));
        }
    }
}

impl Drop for RestTransport {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn test_config() -> ClientConfig {
        // Discard port: connections are refused immediately, no traffic leaves
        ClientConfig::new("xoxb-test")
            .with_base_url("http://127.0.0.1:9/api")
            .with_timeout(Duration::from_secs(2))
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let result = RestTransport::new(ClientConfig::new(""));
        assert!(matches!(result, Err(SlackError::Config(_))));
    }

    #[test]
    fn test_call_blocking_surfaces_transport_failure() {
        let transport = RestTransport::new(test_config()).unwrap();

        let result = transport.call_blocking("groups.list", Vec::new());

        assert!(matches!(result, Err(SlackError::Http(_))));
    }

    #[test]
    fn test_shutdown_is_idempotent() {
        let transport = RestTransport::new(test_config()).unwrap();

        transport.shutdown();
        transport.shutdown();
    }
}
