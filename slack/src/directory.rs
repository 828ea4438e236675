use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::Result;
use crate::models::{
    ChannelId, ChannelRecord, GroupId, GroupRecord, ImId, ImRecord, UserId, UserRecord,
};
use crate::transport::RestTransport;

/// Shared cache of everything the workspace has told us about its
/// conversations and members. Clones share the same underlying maps.
pub struct Directory {
    groups: Arc<RwLock<HashMap<GroupId, GroupRecord>>>,
    channels: Arc<RwLock<HashMap<ChannelId, ChannelRecord>>>,
    ims: Arc<RwLock<HashMap<ImId, ImRecord>>>,
    users: Arc<RwLock<HashMap<UserId, UserRecord>>>,
}

impl Directory {
    pub fn new() -> Self {
        Self {
            groups: Arc::new(RwLock::new(HashMap::new())),
            channels: Arc::new(RwLock::new(HashMap::new())),
            ims: Arc::new(RwLock::new(HashMap::new())),
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Populate the maps with blocking `*.list` calls. A list that fails or
    /// comes back error-shaped leaves its map untouched.
    pub fn load_from(&self, transport: &RestTransport) -> Result<()> {
        for record in fetch_list::<GroupRecord>(transport, "groups.list", "groups")? {
            self.insert_group(record);
        }
        for record in fetch_list::<ChannelRecord>(transport, "channels.list", "channels")? {
            self.insert_channel(record);
        }
        for record in fetch_list::<ImRecord>(transport, "im.list", "ims")? {
            self.insert_im(record);
        }
        for record in fetch_list::<UserRecord>(transport, "users.list", "members")? {
            self.insert_user(record);
        }
        Ok(())
    }

    pub fn insert_group(&self, record: GroupRecord) {
        if let Ok(mut groups) = self.groups.write() {
            groups.insert(record.id.clone(), record);
        }
    }

    pub fn insert_channel(&self, record: ChannelRecord) {
        if let Ok(mut channels) = self.channels.write() {
            channels.insert(record.id.clone(), record);
        }
    }

    pub fn insert_im(&self, record: ImRecord) {
        if let Ok(mut ims) = self.ims.write() {
            ims.insert(record.id.clone(), record);
        }
    }

    pub fn insert_user(&self, record: UserRecord) {
        if let Ok(mut users) = self.users.write() {
            users.insert(record.id.clone(), record);
        }
    }

    pub fn group(&self, id: &GroupId) -> Option<GroupRecord> {
        self.groups.read().ok()?.get(id).cloned()
    }

    pub fn group_named(&self, name: &str) -> Option<GroupRecord> {
        self.groups
            .read()
            .ok()?
            .values()
            .find(|g| g.name == name)
            .cloned()
    }

    pub fn all_groups(&self) -> Vec<GroupRecord> {
        self.groups
            .read()
            .map(|groups| groups.values().cloned().collect())
            .unwrap_or_default()
    }

    pub fn channel(&self, id: &ChannelId) -> Option<ChannelRecord> {
        self.channels.read().ok()?.get(id).cloned()
    }

    pub fn channel_named(&self, name: &str) -> Option<ChannelRecord> {
        self.channels
            .read()
            .ok()?
            .values()
            .find(|c| c.name == name)
            .cloned()
    }

    pub fn all_channels(&self) -> Vec<ChannelRecord> {
        self.channels
            .read()
            .map(|channels| channels.values().cloned().collect())
            .unwrap_or_default()
    }

    pub fn im(&self, id: &ImId) -> Option<ImRecord> {
        self.ims.read().ok()?.get(id).cloned()
    }

    pub fn im_for_user(&self, user: &UserId) -> Option<ImRecord> {
        self.ims
            .read()
            .ok()?
            .values()
            .find(|im| &im.user == user)
            .cloned()
    }

    pub fn user(&self, id: &UserId) -> Option<UserRecord> {
        self.users.read().ok()?.get(id).cloned()
    }

    pub fn all_users(&self) -> Vec<UserRecord> {
        self.users
            .read()
            .map(|users| users.values().cloned().collect())
            .unwrap_or_default()
    }

    /// Display name for a user id, for mention rendering
    pub fn user_name(&self, id: &UserId) -> Option<String> {
        self.user(id).map(|u| u.name)
    }

    /// Display name for a channel id, for mention rendering
    pub fn channel_name(&self, id: &ChannelId) -> Option<String> {
        self.channel(id).map(|c| c.name)
    }
}

impl Default for Directory {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Directory {
    fn clone(&self) -> Self {
        Self {
            groups: self.groups.clone(),
            channels: self.channels.clone(),
            ims: self.ims.clone(),
            users: self.users.clone(),
        }
    }
}

fn fetch_list<T: DeserializeOwned>(
    transport: &RestTransport,
    method: &str,
    key: &str,
) -> Result<Vec<T>> {
    let payload = transport.call_blocking(method, Vec::new())?;

    if payload["ok"].as_bool() != Some(true) {
        log::warn!("{} returned an error payload: {}", method, payload);
        return Ok(Vec::new());
    }

    match payload.get(key).cloned().unwrap_or(Value::Null) {
        Value::Null => {
            log::warn!("{} response is missing the {} list", method, key);
            Ok(Vec::new())
        }
        list => match serde_json::from_value(list) {
            Ok(records) => Ok(records),
            Err(err) => {
                log::warn!("failed to decode {} list: {}", method, err);
                Ok(Vec::new())
            }
        },
    }
}
