use serde_derive::{Deserialize, Serialize};

/// A member of the workspace as the platform reports it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct UserInfo {
    /// Opaque, stable user identifier like `U024BE7LH`.
    pub id: String,
    /// The handle of the user, this is what people type to address somebody.
    pub name: String,
}

impl UserInfo {
    pub fn new(id: &str, name: &str) -> Self {
        UserInfo {
            id: id.to_string(),
            name: name.to_string(),
        }
    }
}

/// A plain chat message posted by a user.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MessageEvent {
    pub channel: String,
    pub user: String,
    pub text: String,
}

/// Events the bot is interested in. Everything else the platform sends is dropped during
/// decoding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// The session is established.
    Hello,
    /// Somebody posted a message in a channel the bot can see.
    Message(MessageEvent),
    /// A user was renamed or a new user joined the workspace.
    UserChange(UserInfo),
    /// Answer to a ping with the id of the ping.
    Pong(u64),
    /// The server is going to close the connection.
    Goodbye,
}
