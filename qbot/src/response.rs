//! Texts the bot answers with.
use crate::directory::UserDirectory;
use crate::queue::{Entry, Queue};

/// Ordinal suffix of a number, `st`, `nd`, `rd` or `th`.
pub fn suffix(n: usize) -> &'static str {
    match n % 100 {
        11..=13 => "th",
        _ => match n % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        },
    }
}

pub fn ordinal(n: usize) -> String {
    format!("{n}{}", suffix(n))
}

/// Builds the notification texts. Names are looked up in the directory at render time, so a
/// renamed user shows up with the new name.
#[derive(Clone)]
pub struct Responses {
    directory: UserDirectory,
}

impl Responses {
    pub fn new(directory: UserDirectory) -> Self {
        Responses { directory }
    }

    fn name(&self, id: &str) -> String {
        self.directory.name(id).unwrap_or_else(|| id.to_string())
    }

    pub fn link(&self, id: &str) -> String {
        format!("<@{}|{}>", id, self.name(id))
    }

    pub fn item(&self, e: &Entry) -> String {
        if e.reason.is_empty() {
            self.link(&e.id)
        } else {
            format!("{} ({})", self.link(&e.id), e.reason)
        }
    }

    fn finished(&self, e: &Entry) -> String {
        format!("{} has finished with the token", self.item(e))
    }

    pub fn now_has_token(&self, e: &Entry) -> String {
        format!("*{} now has the token*", self.item(e))
    }

    pub fn up_for_grabs(&self) -> String {
        "The token is up for grabs".to_string()
    }

    /// Who gets the token after the previous holder went away.
    fn next_holder(&self, q: &Queue) -> String {
        if q.is_empty() {
            self.up_for_grabs()
        } else {
            self.now_has_token(&q.active())
        }
    }

    pub fn bad_position(&self, actor: &str) -> String {
        format!("{} That's not a valid position in the queue", self.link(actor))
    }

    pub fn not_owned(&self, actor: &str, position: usize, owner: &str) -> String {
        format!(
            "{} Not replacing because {} is {} in line",
            self.link(actor),
            self.link(owner),
            ordinal(position)
        )
    }

    pub fn not_in_position(&self, actor: &str, position: usize) -> String {
        format!("{} You are not {} in line", self.link(actor), ordinal(position))
    }

    /// Announce the place of a new entry, `position` is 1 based.
    pub fn joined(&self, e: &Entry, position: usize) -> String {
        match position {
            1 => self.now_has_token(e),
            2 => format!("{} is now next in line", self.item(e)),
            n => format!("{} is now {} in line", self.item(e), ordinal(n)),
        }
    }

    pub fn join_no_reason(&self, actor: &str) -> String {
        format!("{} You must provide a reason for joining", self.link(actor))
    }

    pub fn replace_no_reason(&self, actor: &str) -> String {
        format!("{} You must provide a new reason", self.link(actor))
    }

    pub fn left(&self, e: &Entry) -> String {
        format!("{} has left the queue", self.item(e))
    }

    pub fn leave_active(&self, actor: &str) -> String {
        format!("{} You have the token, did you mean `done` or `drop`?", self.link(actor))
    }

    pub fn no_entry_with_reason(&self, actor: &str, prefix: &str) -> String {
        format!(
            "{} No entry with a reason that starts with '{}' was found",
            self.link(actor),
            prefix
        )
    }

    pub fn not_in_queue(&self, actor: &str) -> String {
        format!("{} You are not in the queue", self.link(actor))
    }

    /// The holder is done, `q` is the queue without them.
    pub fn done(&self, e: &Entry, q: &Queue) -> String {
        format!("{}\n{}", self.finished(e), self.next_holder(q))
    }

    pub fn done_not_active(&self, actor: &str) -> String {
        format!("{} You cannot be done if you don't have the token", self.link(actor))
    }

    pub fn yielded(&self, e: &Entry, q: &Queue) -> String {
        format!("{} has yielded the token\n{}", self.item(e), self.now_has_token(&q.active()))
    }

    pub fn yield_nobody_waiting(&self, actor: &str) -> String {
        format!("{} You cannot yield if there is nobody waiting", self.link(actor))
    }

    pub fn yield_not_active(&self, actor: &str) -> String {
        format!("{} You cannot yield if you do not have the token", self.link(actor))
    }

    pub fn barged(&self, e: &Entry, active: &Entry) -> String {
        format!(
            "{} barged to the front\n{} still has the token",
            self.item(e),
            self.item(active)
        )
    }

    pub fn booted(&self, booter: &str, e: &Entry) -> String {
        format!("{} booted {} from the list", self.link(booter), self.item(e))
    }

    pub fn boot_no_target(&self, booter: &str) -> String {
        format!("{} You must specify who you want to boot", self.link(booter))
    }

    pub fn boot_no_entry(&self, booter: &str, name: &str) -> String {
        format!("{} No entry for {} was found", self.link(booter), name)
    }

    pub fn boot_no_entry_with_reason(&self, booter: &str, name: &str, prefix: &str) -> String {
        format!(
            "{} No entry for {} with a reason that starts with '{}' was found",
            self.link(booter),
            name,
            prefix
        )
    }

    pub fn must_oust(&self, booter: &str) -> String {
        format!("{} You must oust the token holder", self.link(booter))
    }

    /// The holder was ousted, `q` is the queue without them.
    pub fn ousted(&self, ouster: &str, e: &Entry, q: &Queue) -> String {
        format!("{} ousted {}\n{}", self.link(ouster), self.item(e), self.next_holder(q))
    }

    pub fn oust_not_active(&self, ouster: &str) -> String {
        format!("{} You can only oust the token holder", self.link(ouster))
    }

    pub fn oust_no_target(&self, ouster: &str) -> String {
        format!("{} You must specify who you want to oust", self.link(ouster))
    }

    pub fn oust_confirm(&self, ouster: &str, target: &str, window_secs: u64) -> String {
        format!(
            "{} Are you sure you want to oust {}?\n(Repeat this command within {} seconds to confirm)",
            self.link(ouster),
            self.link(target),
            window_secs
        )
    }

    pub fn delegated(&self, e: &Entry, target: &str) -> String {
        format!("{} has delegated to {}", self.item(e), self.link(target))
    }

    pub fn delegated_active(&self, e: &Entry, new: &Entry) -> String {
        format!("{}\n{}", self.delegated(e, &new.id), self.now_has_token(new))
    }

    pub fn delegate_no_target(&self, actor: &str) -> String {
        format!("{} You must specify who you want to delegate to", self.link(actor))
    }

    pub fn delegate_no_such_user(&self, actor: &str, target: &str) -> String {
        format!(
            "{} You cannot delegate to {} because they don't exist",
            self.link(actor),
            target
        )
    }

    pub fn delegate_no_entry(&self, actor: &str) -> String {
        format!("{} You cannot delegate if you are not in the queue", self.link(actor))
    }

    pub fn refuse_token(&self) -> String {
        "What am I going to do with the token?".to_string()
    }

    /// The bot was handed the token. It takes it, then gives it straight back.
    pub fn refuse_token_active(&self, e: &Entry, bot: &Entry) -> String {
        format!(
            "{}\n:zap: :zap: AT LAST! ULTIMATE POWER! :zap: :zap:\n\nJust kidding ... I don't need the token, you can have it back\n{}",
            self.delegated_active(e, bot),
            self.delegated_active(bot, e)
        )
    }

    /// `q` is the queue after removing the holder, `holder` is None if the queue was empty.
    pub fn success(&self, sender: &str, holder: Option<&Entry>, q: &Queue) -> String {
        let notice = format!("Received a success notification from {}", self.link(sender));

        match holder {
            Some(e) => format!("{}\n{}", notice, self.done(e, q)),
            None => notice,
        }
    }

    /// Tell the holder and the next in line (if that is somebody else) about a failure.
    pub fn failure(&self, sender: &str, q: &Queue, message: &str) -> String {
        let mut mentions = vec![];

        if let Some(holder) = q.get(0) {
            mentions.push(self.link(&holder.id));

            if let Some(next) = q.get(1) {
                if next.id != holder.id {
                    mentions.push(self.link(&next.id));
                }
            }
        }

        let notice = format!("Received a failure notification from {}: {}", self.link(sender), message);

        if mentions.is_empty() {
            notice
        } else {
            format!("{} {}", mentions.join(" "), notice)
        }
    }

    /// The queue with plain names, so listing it doesn't ping everybody.
    pub fn list(&self, q: &Queue) -> String {
        if q.is_empty() {
            return "Nobody has the token, and nobody is waiting".to_string();
        }

        let mut lines = vec![format!("*1: {} has the token*", self.plain(&q.active()))];

        for (ix, e) in q.waiting().iter().enumerate() {
            lines.push(format!("{}: {}", ix + 2, self.plain(e)));
        }

        lines.join("\n")
    }

    fn plain(&self, e: &Entry) -> String {
        if e.reason.is_empty() {
            self.name(&e.id)
        } else {
            format!("{} ({})", self.name(&e.id), e.reason)
        }
    }

    pub fn help(&self, bot_name: &str) -> String {
        let mut s = format!("Address each command to the bot (`{}: <command>`)\n", bot_name);

        let sections: [(&str, &[(&str, &str)]); 7] = [
            (
                "If you don't have the token and need it",
                &[
                    ("join <reason>", "Join the queue and give a reason why"),
                    (
                        "barge <reason>",
                        "Barge to the front of the queue so you get the token next (only with good reason!)",
                    ),
                    ("barge", "Barge your most recent entry to the front of the queue"),
                    ("barge <position>", "Barge your entry at the given position to the front of the queue"),
                ],
            ),
            (
                "If you have the token and have done with it",
                &[
                    ("done", "Release the token once you are done with it"),
                    ("drop", "Drop the token and leave the queue (an alias of `done`)"),
                    ("yield", "Release the token and swap places with next in line"),
                ],
            ),
            (
                "If you are in the queue and need to change something",
                &[
                    ("delegate <user>", "Delegate your most recent entry to someone else"),
                    (
                        "delegate <user> <reason prefix>",
                        "Delegate your latest entry whose reason starts with <reason prefix>",
                    ),
                    ("replace <position> <reason>", "Replace the reason of a queue entry you own"),
                ],
            ),
            (
                "If you are in the queue and need to leave",
                &[
                    ("leave", "Leave the queue (your most recent entry is removed)"),
                    ("leave <reason prefix>", "Leave the queue (your latest entry with a matching reason)"),
                    ("leave <position>", "Leave the queue (your entry at the given position)"),
                ],
            ),
            (
                "If you need to get rid of somebody who is in the way",
                &[
                    ("oust <name>", "Remove the token holder (repeat the command to confirm)"),
                    ("boot <name>", "Kick somebody out of the waiting list (their most recent entry)"),
                    ("boot <name> <reason prefix>", "Kick out their latest entry with a matching reason"),
                    ("boot <position> <name>", "Kick out their entry at the given position"),
                ],
            ),
            (
                "Notifications (from automated systems)",
                &[
                    (
                        "success",
                        "Notify the token holder and next in line of success and remove the token holder",
                    ),
                    (
                        "failure <message>",
                        "Notify the token holder and next in line of failure with a custom message",
                    ),
                ],
            ),
            (
                "Other useful things to know",
                &[
                    ("list", "Show who has the token and who is waiting"),
                    ("help", "Show this text"),
                ],
            ),
        ];

        for (title, commands) in sections {
            s.push_str(&format!("\n*{}:*\n", title));

            for (usage, text) in commands {
                s.push_str(&format!("`{}` - {}\n", usage, text));
            }
        }

        s
    }
}
