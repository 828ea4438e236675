use std::sync::Arc;

use crate::models::Ts;
use crate::transport::Transport;

/// API method family a conversation belongs to. The family picks the prefix
/// for the shared operations (`groups.mark`, `channels.mark`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiFamily {
    Channels,
    Groups,
    Im,
}

impl ApiFamily {
    pub fn prefix(&self) -> &'static str {
        match self {
            ApiFamily::Channels => "channels",
            ApiFamily::Groups => "groups",
            ApiFamily::Im => "im",
        }
    }
}

/// The named channel-like resource every conversation proxy is built from:
/// an opaque id plus a handle to the shared transport.
///
/// The id is bound at construction and never changes. Actions dispatched
/// through the core are fire-and-forget; the completion payload is logged
/// once, unchanged, whether the remote side reported success or an error.
pub struct ChannelCore {
    id: String,
    family: ApiFamily,
    client: Arc<dyn Transport>,
}

impl ChannelCore {
    pub fn new(id: impl Into<String>, family: ApiFamily, client: Arc<dyn Transport>) -> Self {
        Self {
            id: id.into(),
            family,
            client,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn family(&self) -> ApiFamily {
        self.family
    }

    /// Dispatch `method` with `{channel: id}` plus any extra parameters
    pub(crate) fn dispatch(&self, method: &str, extra: Vec<(String, String)>) {
        let mut params = vec![("channel".to_string(), self.id.clone())];
        params.extend(extra);
        self.dispatch_raw(method, params);
    }

    /// Dispatch `method` with exactly the given parameters, for the few
    /// operations that do not address the conversation by `channel`
    /// (`channels.join` goes by name, `im.open` by user).
    pub(crate) fn dispatch_raw(&self, method: &str, params: Vec<(String, String)>) {
        self.client
            .api_call(method, params, Box::new(|payload| log::debug!("{}", payload)));
    }

    fn family_method(&self, operation: &str) -> String {
        format!("{}.{}", self.family.prefix(), operation)
    }

    /// Move the read cursor for this conversation to `ts`
    pub fn mark(&self, ts: &Ts) {
        let method = self.family_method("mark");
        self.dispatch(&method, vec![("ts".to_string(), ts.as_str().to_string())]);
    }

    /// Set the conversation topic
    pub fn set_topic(&self, topic: &str) {
        let method = self.family_method("setTopic");
        self.dispatch(&method, vec![("topic".to_string(), topic.to_string())]);
    }

    /// Set the conversation purpose
    pub fn set_purpose(&self, purpose: &str) {
        let method = self.family_method("setPurpose");
        self.dispatch(&method, vec![("purpose".to_string(), purpose.to_string())]);
    }
}
