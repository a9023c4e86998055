//! A bot which guards a single token that chat users take turns holding.
//!
//! Users join a waiting list by talking to the bot, the head of the list holds the token. The
//! [`dispatch`] pipeline feeds the chat events into the [`command`] processor, which works on an
//! immutable [`queue::Queue`]. State changes are announced in the channel and written to disk.
pub mod command;
pub mod config;
pub mod directory;
pub mod dispatch;
pub mod error;
pub mod persist;
pub mod queue;
pub mod response;

pub use error::{Error, ErrorScope, Result, RuntimeError};

#[macro_export]
macro_rules! logerr {
    ($val:expr) => {
        if let Err(e) = $val {
            log::error!("Error {:?}", e);
        }
    };
}
