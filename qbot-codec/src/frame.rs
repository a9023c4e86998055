//! Conversion between websocket text frames and events.
use crate::codec_error;
use crate::event::{Event, MessageEvent, UserInfo};
use crate::Result;
use serde_derive::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct RawFrame {
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    subtype: Option<String>,
    #[serde(default)]
    channel: Option<String>,
    #[serde(default)]
    user: Option<Value>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    reply_to: Option<u64>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum OutgoingFrame<'a> {
    Message { id: u64, channel: &'a str, text: &'a str },
    Ping { id: u64 },
}

/// Decode a text frame. Frames which are valid but uninteresting for the bot (acks of sent
/// messages, edits, typing indicators, etc.) are decoded as `None`.
pub fn decode(text: &str) -> Result<Option<Event>> {
    let value: Value = serde_json::from_str(text)?;

    if !value.is_object() {
        return codec_error!(format!("Frame is not a JSON object: {text}"));
    }

    let raw: RawFrame = serde_json::from_value(value)?;

    let kind = match raw.kind.as_deref() {
        Some(kind) => kind,
        None => return Ok(None),
    };

    match kind {
        "hello" => Ok(Some(Event::Hello)),
        "goodbye" => Ok(Some(Event::Goodbye)),
        "pong" => Ok(Some(Event::Pong(raw.reply_to.unwrap_or_default()))),
        "message" => Ok(decode_message(raw)),
        "user_change" | "team_join" => decode_user(raw).map(|u| Some(Event::UserChange(u))),
        _ => Ok(None),
    }
}

fn decode_message(raw: RawFrame) -> Option<Event> {
    // Edits, deletions, channel joins and bot posts all come as subtypes.
    if raw.subtype.is_some() {
        return None;
    }

    let user = match raw.user {
        Some(Value::String(user)) => user,
        _ => return None,
    };

    Some(Event::Message(MessageEvent {
        channel: raw.channel?,
        user,
        text: raw.text.unwrap_or_default(),
    }))
}

fn decode_user(raw: RawFrame) -> Result<UserInfo> {
    match raw.user {
        Some(user @ Value::Object(_)) => Ok(serde_json::from_value(user)?),
        _ => codec_error!("User change event without user object"),
    }
}

/// Encode a chat message to be posted into a channel.
pub fn encode_message(id: u64, channel: &str, text: &str) -> Result<String> {
    Ok(serde_json::to_string(&OutgoingFrame::Message { id, channel, text })?)
}

/// Encode a keepalive ping.
pub fn encode_ping(id: u64) -> Result<String> {
    Ok(serde_json::to_string(&OutgoingFrame::Ping { id })?)
}
