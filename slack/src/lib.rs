pub mod channel;
pub mod config;
pub mod conversation;
pub mod directory;
pub mod error;
pub mod group;
pub mod im;
pub mod message;
pub mod models;
pub mod transport;

// Re-export key types for easier access
pub use channel::Channel;
pub use config::ClientConfig;
pub use conversation::{ApiFamily, ChannelCore};
pub use directory::Directory;
pub use error::{Result, SlackError};
pub use group::Group;
pub use im::Im;
pub use message::Message;
pub use models::{
    ChannelId, ChannelRecord, GroupId, GroupRecord, ImId, ImRecord, TopicInfo, Ts, UserId,
    UserRecord,
};
pub use transport::{CompletionHandler, RestTransport, Transport};
