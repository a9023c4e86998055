use crate::command::pop_word;
use qbot_codec::event::MessageEvent;

/// A message addressed to the bot, split into command word and arguments.
#[derive(Debug, PartialEq)]
pub(crate) struct Routed<'a> {
    pub(crate) verb: &'a str,
    pub(crate) args: &'a str,
    /// Came in a direct message channel.
    pub(crate) private: bool,
}

fn is_private_channel(channel: &str) -> bool {
    channel.starts_with('D')
}

/// The first word of a public message names the bot: `qbot`, `qbot:` or `<@ID>`.
fn is_bot_address(word: &str, bot_id: &str, bot_name: &str) -> bool {
    let word = word.strip_suffix(':').unwrap_or(word);

    (!bot_name.is_empty() && word == bot_name) || word == format!("<@{}>", bot_id)
}

/// Decide if the message is for us. In public channels it has to start with the bot name or a
/// mention of the bot, which is stripped.
pub(crate) fn route<'a>(m: &'a MessageEvent, bot_id: &str, bot_name: &str) -> Option<Routed<'a>> {
    if m.user == bot_id {
        return None;
    }

    let text = m.text.trim();
    let private = is_private_channel(&m.channel);

    let command = if private {
        text
    } else {
        let (first, rest) = pop_word(text);

        if !is_bot_address(first, bot_id, bot_name) {
            return None;
        }

        rest
    };

    let (verb, args) = pop_word(command);

    if verb.is_empty() {
        return None;
    }

    Some(Routed { verb, args, private })
}
