use super::{entry_at, find_latest, parse_position, pop_word, Commands, Notification, PendingConfirmation};
use crate::queue::{Entry, Queue};
use tokio::time::Instant;

impl Commands {
    /// Jump right behind the token holder. Without arguments the latest own entry barges, a
    /// position selects an own entry, anything else is the reason of a new entry.
    pub(crate) fn barge(&self, q: &Queue, channel: &str, actor: &str, args: &str) -> (Queue, Notification) {
        let e = match parse_position(args) {
            Some((position, "")) => match entry_at(q, position) {
                Some(e) if e.id == actor => e.clone(),
                Some(_) => {
                    let text = self.response.not_in_position(actor, position);
                    return (q.clone(), Notification::channel(channel, text));
                }
                None => return (q.clone(), Notification::channel(channel, self.response.bad_position(actor))),
            },
            _ if args.is_empty() => match find_latest(q, actor, "") {
                Some((_, e)) => e,
                None => return (q.clone(), Notification::channel(channel, self.response.join_no_reason(actor))),
            },
            _ => Entry::new(actor, args),
        };

        if q.get(0) == Some(&e) {
            return (q.clone(), Notification::silent(channel));
        }

        let q = q.barge(e.clone());
        let active = q.active();

        if active == e {
            self.log_activity(&e, "joined");
            return (q, Notification::channel(channel, self.response.now_has_token(&e)));
        }

        self.log_activity(&e, "barged");

        (q, Notification::channel(channel, self.response.barged(&e, &active)))
    }

    /// Remove a waiting entry of somebody else, by name and reason prefix or by position and name.
    pub(crate) fn boot(&self, q: &Queue, channel: &str, booter: &str, args: &str) -> (Queue, Notification) {
        if q.is_empty() {
            return (q.clone(), Notification::silent(channel));
        }

        let (index, e) = match parse_position(args) {
            Some((position, name)) => {
                if name.is_empty() {
                    return (q.clone(), Notification::channel(channel, self.response.boot_no_target(booter)));
                }

                let Some(id) = self.resolve_user(name) else {
                    let text = self.response.boot_no_entry(booter, name);
                    return (q.clone(), Notification::channel(channel, text));
                };

                match entry_at(q, position) {
                    Some(e) if e.id == id => (position - 1, e.clone()),
                    Some(_) => {
                        let text = self.response.boot_no_entry(booter, name);
                        return (q.clone(), Notification::channel(channel, text));
                    }
                    None => return (q.clone(), Notification::channel(channel, self.response.bad_position(booter))),
                }
            }
            None => {
                let (name, prefix) = pop_word(args);

                if name.is_empty() {
                    return (q.clone(), Notification::channel(channel, self.response.boot_no_target(booter)));
                }

                let found = self.resolve_user(name).and_then(|id| find_latest(q, &id, prefix));

                match found {
                    Some(found) => found,
                    None if prefix.is_empty() => {
                        let text = self.response.boot_no_entry(booter, name);
                        return (q.clone(), Notification::channel(channel, text));
                    }
                    None => {
                        let text = self.response.boot_no_entry_with_reason(booter, name, prefix);
                        return (q.clone(), Notification::channel(channel, text));
                    }
                }
            }
        };

        if index == 0 {
            return (q.clone(), Notification::channel(channel, self.response.must_oust(booter)));
        }

        let q = q.remove(&e);
        self.log_activity(&e, &format!("booted by {}", self.response.link(booter)));

        (q, Notification::channel(channel, self.response.booted(booter, &e)))
    }

    /// Remove the token holder. The ouster has to repeat the same oust within the confirmation
    /// window, the first call only records the request.
    pub(crate) fn oust(
        &mut self,
        q: &Queue,
        channel: &str,
        ouster: &str,
        args: &str,
        now: Instant,
    ) -> (Queue, Notification) {
        if q.is_empty() {
            return (q.clone(), Notification::silent(channel));
        }

        let (name, _) = pop_word(args);

        if name.is_empty() {
            return (q.clone(), Notification::channel(channel, self.response.oust_no_target(ouster)));
        }

        let active = q.active();

        if self.resolve_user(name).as_deref() != Some(active.id.as_str()) {
            self.pending.remove(ouster);

            return (q.clone(), Notification::channel(channel, self.response.oust_not_active(ouster)));
        }

        let window = self.confirm_window;
        self.pending.retain(|_, p| now.duration_since(p.timestamp) <= window);

        let confirmed = self.pending.get(ouster).is_some_and(|p| p.entry == active);

        if !confirmed {
            self.pending.insert(
                ouster.to_string(),
                PendingConfirmation {
                    entry: active.clone(),
                    timestamp: now,
                },
            );

            let text = self.response.oust_confirm(ouster, &active.id, window.as_secs());

            return (q.clone(), Notification::channel(channel, text));
        }

        self.pending.remove(ouster);

        let q = q.remove(&active);
        self.log_activity(&active, &format!("ousted by {}", self.response.link(ouster)));

        if !q.is_empty() {
            self.log_activity(&q.active(), "is active");
        }

        let text = self.response.ousted(ouster, &active, &q);

        (q, Notification::channel(channel, text))
    }

    #[cfg(test)]
    pub(crate) fn pending_count(&self) -> usize {
        self.pending.len()
    }
}
