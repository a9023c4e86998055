//! The user facing commands.
//!
//! A command takes the current queue and answers the new queue together with the text to tell
//! the users. The queue passed in is never changed; an unchanged queue means the command was
//! rejected or had nothing to do.
mod force;
mod hand_over;
mod join_leave;
mod report;

#[cfg(test)]
mod tests;

use crate::directory::UserDirectory;
use crate::queue::{Entry, Queue};
use crate::response::Responses;
use log::info;
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::Instant;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verb {
    Join,
    Leave,
    /// Also spelled `drop`.
    Done,
    Yield,
    Barge,
    Boot,
    Oust,
    Delegate,
    Replace,
    Success,
    Failure,
    List,
    Help,
}

impl Verb {
    /// Parse the command word, case insensitively.
    pub fn from_word(word: &str) -> Option<Verb> {
        let verb = match word.to_lowercase().as_str() {
            "join" => Verb::Join,
            "leave" => Verb::Leave,
            "done" | "drop" => Verb::Done,
            "yield" => Verb::Yield,
            "barge" => Verb::Barge,
            "boot" => Verb::Boot,
            "oust" => Verb::Oust,
            "delegate" => Verb::Delegate,
            "replace" => Verb::Replace,
            "success" => Verb::Success,
            "failure" => Verb::Failure,
            "list" => Verb::List,
            "help" => Verb::Help,
            _ => return None,
        };

        Some(verb)
    }

    /// Commands which are also accepted in a direct message.
    pub fn is_private(&self) -> bool {
        matches!(self, Verb::List | Verb::Help)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Recipient {
    Channel(String),
    /// Sent as a direct message.
    User(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub recipient: Recipient,
    pub message: String,
}

impl Notification {
    pub fn channel(channel: &str, message: String) -> Self {
        Notification {
            recipient: Recipient::Channel(channel.to_string()),
            message,
        }
    }

    pub fn user(id: &str, message: String) -> Self {
        Notification {
            recipient: Recipient::User(id.to_string()),
            message,
        }
    }

    /// Nothing to tell.
    pub fn silent(channel: &str) -> Self {
        Notification::channel(channel, String::new())
    }

    pub fn is_empty(&self) -> bool {
        self.message.is_empty()
    }
}

/// An oust waiting for the ouster to repeat it.
#[derive(Clone, Debug)]
pub struct PendingConfirmation {
    pub entry: Entry,
    pub timestamp: Instant,
}

pub struct Commands {
    bot_id: String,
    bot_name: String,
    directory: UserDirectory,
    response: Responses,
    confirm_window: Duration,
    /// Unconfirmed ousts by the id of the ouster.
    pending: HashMap<String, PendingConfirmation>,
}

impl Commands {
    pub fn new(bot_id: &str, bot_name: &str, directory: UserDirectory, confirm_window: Duration) -> Self {
        Commands {
            bot_id: bot_id.to_string(),
            bot_name: bot_name.to_string(),
            response: Responses::new(directory.clone()),
            directory,
            confirm_window,
            pending: HashMap::new(),
        }
    }

    pub fn bot_id(&self) -> &str {
        &self.bot_id
    }

    pub fn bot_name(&self) -> &str {
        &self.bot_name
    }

    /// Run a command issued by `actor` in `channel` with the rest of the message as `args`.
    pub fn execute(&mut self, verb: Verb, q: &Queue, channel: &str, actor: &str, args: &str) -> (Queue, Notification) {
        let args = args.trim();

        match verb {
            Verb::Join => self.join(q, channel, actor, args),
            Verb::Leave => self.leave(q, channel, actor, args),
            Verb::Done => self.done(q, channel, actor),
            Verb::Yield => self.yield_token(q, channel, actor),
            Verb::Barge => self.barge(q, channel, actor, args),
            Verb::Boot => self.boot(q, channel, actor, args),
            Verb::Oust => self.oust(q, channel, actor, args, Instant::now()),
            Verb::Delegate => self.delegate(q, channel, actor, args),
            Verb::Replace => self.replace(q, channel, actor, args),
            Verb::Success => self.success(q, channel, actor),
            Verb::Failure => self.failure(q, channel, actor, args),
            Verb::List => self.list(q, channel),
            Verb::Help => self.help(q, actor),
        }
    }

    /// Resolve a user given by mention (`<@U123>`, `<@U123|name>`), by `@name` or by plain name.
    fn resolve_user(&self, name: &str) -> Option<String> {
        if let Some(mention) = name.strip_prefix("<@").and_then(|m| m.strip_suffix('>')) {
            let id = mention.split('|').next().unwrap_or_default();

            if id == self.bot_id || self.directory.name(id).is_some() {
                return Some(id.to_string());
            }

            return None;
        }

        let name = name.strip_prefix('@').unwrap_or(name);

        if name == self.bot_name {
            return Some(self.bot_id.clone());
        }

        self.directory.id(name)
    }

    fn log_activity(&self, e: &Entry, text: &str) {
        info!("{} ({}) {}", self.response.link(&e.id), e.reason, text);
    }
}

/// The latest entry of `id` whose reason starts with `prefix`, with its zero based index.
fn find_latest(q: &Queue, id: &str, prefix: &str) -> Option<(usize, Entry)> {
    q.iter()
        .enumerate()
        .rev()
        .find(|(_, e)| e.id == id && e.reason.starts_with(prefix))
        .map(|(ix, e)| (ix, e.clone()))
}

/// Entry at the 1 based position.
fn entry_at(q: &Queue, position: usize) -> Option<&Entry> {
    position.checked_sub(1).and_then(|ix| q.get(ix))
}

/// Split a leading position number off the arguments.
fn parse_position(args: &str) -> Option<(usize, &str)> {
    let (first, rest) = pop_word(args);

    first.parse::<usize>().ok().map(|position| (position, rest))
}

/// The first word and the trimmed rest.
pub(crate) fn pop_word(args: &str) -> (&str, &str) {
    let args = args.trim();

    match args.split_once(char::is_whitespace) {
        Some((first, rest)) => (first, rest.trim()),
        None => (args, ""),
    }
}
