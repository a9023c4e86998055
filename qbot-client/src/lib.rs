//! Client of the chat platform's real-time messaging API.
//!
//! [`connect`] opens a session and returns the [`Client`] together with the stream of
//! incoming events. Outgoing operations are requests sent into the client's sink, so the
//! sink can be cloned and handed to as many tasks as needed.
mod client_api;
pub use client_api::{
    connect, connect_with_backoff, open_im, ping, post_message, Client, ClientRequest, ClientSink, EventStream,
};

mod error;
pub use error::ClientError;

mod processor;
mod web;

pub use qbot_codec::event::{Event, MessageEvent, UserInfo};
