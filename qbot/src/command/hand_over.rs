use super::{find_latest, pop_word, Commands, Notification};
use crate::queue::{Entry, Queue};

impl Commands {
    pub(crate) fn done(&self, q: &Queue, channel: &str, actor: &str) -> (Queue, Notification) {
        if q.is_empty() {
            return (q.clone(), Notification::silent(channel));
        }

        let active = q.active();

        if active.id != actor {
            return (q.clone(), Notification::channel(channel, self.response.done_not_active(actor)));
        }

        let q = q.remove(&active);
        self.log_activity(&active, "done");

        if !q.is_empty() {
            self.log_activity(&q.active(), "is active");
        }

        let text = self.response.done(&active, &q);

        (q, Notification::channel(channel, text))
    }

    pub(crate) fn yield_token(&self, q: &Queue, channel: &str, actor: &str) -> (Queue, Notification) {
        let active = q.active();

        if q.is_empty() || active.id != actor {
            return (q.clone(), Notification::channel(channel, self.response.yield_not_active(actor)));
        }

        if q.len() < 2 {
            return (q.clone(), Notification::channel(channel, self.response.yield_nobody_waiting(actor)));
        }

        let q = q.yield_token();
        self.log_activity(&active, "yielded");
        self.log_activity(&q.active(), "is active");

        let text = self.response.yielded(&active, &q);

        (q, Notification::channel(channel, text))
    }

    /// Hand the latest own entry matching the reason prefix over to another user.
    pub(crate) fn delegate(&self, q: &Queue, channel: &str, actor: &str, args: &str) -> (Queue, Notification) {
        if q.is_empty() {
            return (q.clone(), Notification::channel(channel, self.response.delegate_no_entry(actor)));
        }

        let (name, prefix) = pop_word(args);

        if name.is_empty() {
            return (q.clone(), Notification::channel(channel, self.response.delegate_no_target(actor)));
        }

        let Some(target) = self.resolve_user(name) else {
            let text = self.response.delegate_no_such_user(actor, name);
            return (q.clone(), Notification::channel(channel, text));
        };

        let Some((index, e)) = find_latest(q, actor, prefix) else {
            return (q.clone(), Notification::channel(channel, self.response.delegate_no_entry(actor)));
        };

        let new = Entry::new(&target, &e.reason);

        if target == self.bot_id {
            let text = if index == 0 {
                self.response.refuse_token_active(&e, &new)
            } else {
                self.response.refuse_token()
            };

            return (q.clone(), Notification::channel(channel, text));
        }

        let q = q.delegate(&e, new.clone());
        self.log_activity(&e, &format!("delegated to {}", self.response.link(&target)));

        let text = if index == 0 {
            self.log_activity(&new, "is active");
            self.response.delegated_active(&e, &new)
        } else {
            self.response.delegated(&e, &target)
        };

        (q, Notification::channel(channel, text))
    }
}
