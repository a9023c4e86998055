//! Web API responses used during connection setup and when opening direct message
//! channels.
use crate::event::UserInfo;
use crate::Result;
use serde::de::DeserializeOwned;
use serde_derive::Deserialize;

/// Common part of every Web API response.
pub trait ApiResponse {
    fn ok(&self) -> bool;
    fn error(&self) -> Option<&str>;
}

/// The identity of the connecting bot.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct SelfInfo {
    pub id: String,
    pub name: String,
}

/// Response of `rtm.connect`.
#[derive(Debug, Deserialize)]
pub struct RtmConnect {
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, rename = "self")]
    pub bot: Option<SelfInfo>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ResponseMetadata {
    #[serde(default)]
    pub next_cursor: String,
}

/// Response of `users.list`, one page of it.
#[derive(Debug, Deserialize)]
pub struct UsersList {
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub members: Vec<UserInfo>,
    #[serde(default)]
    pub response_metadata: Option<ResponseMetadata>,
}

impl UsersList {
    /// The cursor of the next page or `None` if this was the last one.
    pub fn next_cursor(&self) -> Option<&str> {
        match &self.response_metadata {
            Some(meta) if !meta.next_cursor.is_empty() => Some(&meta.next_cursor),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ChannelInfo {
    pub id: String,
}

/// Response of `conversations.open`.
#[derive(Debug, Deserialize)]
pub struct ConversationsOpen {
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub channel: Option<ChannelInfo>,
}

macro_rules! api_response {
    ($t:ty) => {
        impl ApiResponse for $t {
            fn ok(&self) -> bool {
                self.ok
            }

            fn error(&self) -> Option<&str> {
                self.error.as_deref()
            }
        }
    };
}

api_response!(RtmConnect);
api_response!(UsersList);
api_response!(ConversationsOpen);

/// Parse the body of a Web API response.
pub fn decode_response<T: DeserializeOwned>(body: &str) -> Result<T> {
    Ok(serde_json::from_str(body)?)
}
