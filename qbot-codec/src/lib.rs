//! Data structures and converter functions for the real-time messaging protocol
//! spoken by the chat platform.
//!
//! The `event` module holds the typed events the bot reacts to, `frame` converts
//! websocket text frames from and to those events and `api` describes the Web API
//! responses needed to open a session.
pub mod api;
pub mod event;
pub mod frame;


use std::fmt;

/// Type alias for a sync and send error.
pub type Error = Box<dyn std::error::Error + Send + Sync>;
/// Type alias for a simplified Result with Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Error struct used by the crate.
#[derive(Debug)]
pub struct CodecError {
    pub message: String,
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", &self)
    }
}

impl std::error::Error for CodecError {}

/// Shorthand for making codec errors.
///
/// ```no_run
/// use qbot_codec::codec_error;
///
/// fn must_be_object(v: &serde_json::Value) -> qbot_codec::Result<()> {
///     if v.is_object() {
///         return Ok(());
///     }
///
///     codec_error!("Frame is not a JSON object")
/// }
/// ```
#[macro_export]
macro_rules! codec_error {
    ($message:expr) => {
        ::std::result::Result::Err(Box::new($crate::CodecError {
            message: ::std::string::String::from($message),
        }))
    };
}
