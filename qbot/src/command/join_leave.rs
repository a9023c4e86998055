use super::{entry_at, find_latest, parse_position, Commands, Notification};
use crate::queue::{Entry, Queue};

impl Commands {
    pub(crate) fn join(&self, q: &Queue, channel: &str, actor: &str, reason: &str) -> (Queue, Notification) {
        if reason.is_empty() {
            return (q.clone(), Notification::channel(channel, self.response.join_no_reason(actor)));
        }

        let e = Entry::new(actor, reason);

        if q.contains(&e) {
            return (q.clone(), Notification::silent(channel));
        }

        let q = q.add(e.clone());
        self.log_activity(&e, "joined");

        let text = self.response.joined(&e, q.len());

        (q, Notification::channel(channel, text))
    }

    /// Leave with the latest entry matching the reason prefix, or with the entry at a position.
    pub(crate) fn leave(&self, q: &Queue, channel: &str, actor: &str, args: &str) -> (Queue, Notification) {
        let found = match parse_position(args) {
            Some((position, "")) => match entry_at(q, position) {
                Some(e) if e.id == actor => (position - 1, e.clone()),
                Some(_) => {
                    let text = self.response.not_in_position(actor, position);
                    return (q.clone(), Notification::channel(channel, text));
                }
                None => return (q.clone(), Notification::channel(channel, self.response.bad_position(actor))),
            },
            _ => match find_latest(q, actor, args) {
                Some(found) => found,
                None if args.is_empty() => {
                    return (q.clone(), Notification::channel(channel, self.response.not_in_queue(actor)))
                }
                None => {
                    let text = self.response.no_entry_with_reason(actor, args);
                    return (q.clone(), Notification::channel(channel, text));
                }
            },
        };

        let (index, e) = found;

        if index == 0 {
            return (q.clone(), Notification::channel(channel, self.response.leave_active(actor)));
        }

        let q = q.remove(&e);
        self.log_activity(&e, "left the queue");

        (q, Notification::channel(channel, self.response.left(&e)))
    }

    /// Give a new reason to an own entry at a position.
    pub(crate) fn replace(&self, q: &Queue, channel: &str, actor: &str, args: &str) -> (Queue, Notification) {
        let Some((position, reason)) = parse_position(args) else {
            return (q.clone(), Notification::channel(channel, self.response.bad_position(actor)));
        };

        let Some(old) = entry_at(q, position) else {
            return (q.clone(), Notification::channel(channel, self.response.bad_position(actor)));
        };

        if old.id != actor {
            let text = self.response.not_owned(actor, position, &old.id);
            return (q.clone(), Notification::channel(channel, text));
        }

        if reason.is_empty() {
            return (q.clone(), Notification::channel(channel, self.response.replace_no_reason(actor)));
        }

        let e = Entry::new(actor, reason);
        let q = q.delegate(old, e.clone());
        self.log_activity(&e, "replaced");

        (q, Notification::channel(channel, self.response.joined(&e, position)))
    }
}
