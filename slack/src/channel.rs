use std::sync::Arc;

use crate::conversation::{ApiFamily, ChannelCore};
use crate::models::{ChannelId, ChannelRecord, Ts};
use crate::transport::Transport;

/// Handle to a public channel. Same contract as [`Group`](crate::group::Group):
/// fire-and-forget actions, completion payloads logged unchanged.
pub struct Channel {
    core: ChannelCore,
    record: ChannelRecord,
}

impl Channel {
    pub fn new(record: ChannelRecord, client: Arc<dyn Transport>) -> Self {
        Self {
            core: ChannelCore::new(record.id.as_str(), ApiFamily::Channels, client),
            record,
        }
    }

    pub fn from_id(id: ChannelId, client: Arc<dyn Transport>) -> Self {
        Self::new(
            ChannelRecord {
                id,
                ..ChannelRecord::default()
            },
            client,
        )
    }

    pub fn id(&self) -> &str {
        self.core.id()
    }

    pub fn name(&self) -> &str {
        &self.record.name
    }

    pub fn record(&self) -> &ChannelRecord {
        &self.record
    }

    /// Join the channel. The API addresses this one by name, not id.
    pub fn join(&self) {
        self.core.dispatch_raw(
            "channels.join",
            vec![("name".to_string(), self.record.name.clone())],
        );
    }

    /// Leave the channel
    pub fn leave(&self) {
        self.core.dispatch("channels.leave", Vec::new());
    }

    /// Archive the channel
    pub fn archive(&self) {
        self.core.dispatch("channels.archive", Vec::new());
    }

    /// Unarchive the channel
    pub fn unarchive(&self) {
        self.core.dispatch("channels.unarchive", Vec::new());
    }

    /// Move the read cursor to `ts`
    pub fn mark(&self, ts: &Ts) {
        self.core.mark(ts);
    }

    /// Set the channel topic
    pub fn set_topic(&self, topic: &str) {
        self.core.set_topic(topic);
    }

    /// Set the channel purpose
    pub fn set_purpose(&self, purpose: &str) {
        self.core.set_purpose(purpose);
    }
}
