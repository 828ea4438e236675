use std::sync::Arc;

use crate::conversation::{ApiFamily, ChannelCore};
use crate::models::{GroupId, GroupRecord, Ts};
use crate::transport::Transport;

/// Handle to a single private group on the workspace.
///
/// Every action is a one-shot asynchronous call: it dispatches one request
/// keyed by a fixed method name with `{channel: id}`, returns immediately,
/// and the completion payload is logged when it arrives. No ordering,
/// deduplication, or retry is imposed here; whether an action is idempotent
/// is up to the remote API.
pub struct Group {
    core: ChannelCore,
    record: GroupRecord,
}

impl Group {
    pub fn new(record: GroupRecord, client: Arc<dyn Transport>) -> Self {
        Self {
            core: ChannelCore::new(record.id.as_str(), ApiFamily::Groups, client),
            record,
        }
    }

    /// Handle for a group known only by id, e.g. from an event before the
    /// directory has seen it
    pub fn from_id(id: GroupId, client: Arc<dyn Transport>) -> Self {
        Self::new(
            GroupRecord {
                id,
                ..GroupRecord::default()
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

    pub fn record(&self) -> &GroupRecord {
        &self.record
    }

    /// Close the group for the calling user
    pub fn close(&self) {
        self.core.dispatch("groups.close", Vec::new());
    }

    /// Re-open a previously closed group
    pub fn open(&self) {
        self.core.dispatch("groups.open", Vec::new());
    }

    /// Archive the group
    pub fn archive(&self) {
        self.core.dispatch("groups.archive", Vec::new());
    }

    /// Unarchive the group
    pub fn unarchive(&self) {
        self.core.dispatch("groups.unarchive", Vec::new());
    }

    /// Clone the group into an empty child, archiving the original
    pub fn create_child(&self) {
        self.core.dispatch("groups.createChild", Vec::new());
    }

    /// Move the read cursor to `ts`
    pub fn mark(&self, ts: &Ts) {
        self.core.mark(ts);
    }

    /// Set the group topic
    pub fn set_topic(&self, topic: &str) {
        self.core.set_topic(topic);
    }

    /// Set the group purpose
    pub fn set_purpose(&self, purpose: &str) {
        self.core.set_purpose(purpose);
    }
}
