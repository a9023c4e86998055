use super::{Commands, Notification};
use crate::queue::Queue;
use log::info;

impl Commands {
    /// An automated system reports success, the holder is finished.
    pub(crate) fn success(&self, q: &Queue, channel: &str, sender: &str) -> (Queue, Notification) {
        info!("{} sent a success notification", self.response.link(sender));

        if q.is_empty() {
            return (q.clone(), Notification::channel(channel, self.response.success(sender, None, q)));
        }

        let holder = q.active();
        let q = q.remove(&holder);
        self.log_activity(&holder, "done");

        if !q.is_empty() {
            self.log_activity(&q.active(), "is active");
        }

        let text = self.response.success(sender, Some(&holder), &q);

        (q, Notification::channel(channel, text))
    }

    /// An automated system reports a failure, the queue stays as it is.
    pub(crate) fn failure(&self, q: &Queue, channel: &str, sender: &str, message: &str) -> (Queue, Notification) {
        info!("{} sent a failure notification: {}", self.response.link(sender), message);

        (q.clone(), Notification::channel(channel, self.response.failure(sender, q, message)))
    }

    pub(crate) fn list(&self, q: &Queue, channel: &str) -> (Queue, Notification) {
        (q.clone(), Notification::channel(channel, self.response.list(q)))
    }

    pub(crate) fn help(&self, q: &Queue, actor: &str) -> (Queue, Notification) {
        (q.clone(), Notification::user(actor, self.response.help(&self.bot_name)))
    }
}
