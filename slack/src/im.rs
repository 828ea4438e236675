use std::sync::Arc;

use crate::conversation::{ApiFamily, ChannelCore};
use crate::models::{ImId, ImRecord, Ts};
use crate::transport::Transport;

/// Handle to a direct-message conversation
pub struct Im {
    core: ChannelCore,
    record: ImRecord,
}

impl Im {
    pub fn new(record: ImRecord, client: Arc<dyn Transport>) -> Self {
        Self {
            core: ChannelCore::new(record.id.as_str(), ApiFamily::Im, client),
            record,
        }
    }

    pub fn from_id(id: ImId, client: Arc<dyn Transport>) -> Self {
        Self::new(
            ImRecord {
                id,
                ..ImRecord::default()
            },
            client,
        )
    }

    pub fn id(&self) -> &str {
        self.core.id()
    }

    pub fn record(&self) -> &ImRecord {
        &self.record
    }

    /// Close the conversation
    pub fn close(&self) {
        self.core.dispatch("im.close", Vec::new());
    }

    /// Re-open the conversation with the counterpart user. The API addresses
    /// this one by user, not channel.
    pub fn open(&self) {
        self.core.dispatch_raw(
            "im.open",
            vec![("user".to_string(), self.record.user.as_str().to_string())],
        );
    }

    /// Move the read cursor to `ts`
    pub fn mark(&self, ts: &Ts) {
        self.core.mark(ts);
    }
}
