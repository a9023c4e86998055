use super::{NotifySink, PersistSink, UserSink};
use crate::command::{Commands, Verb};
use crate::error::{dispatch_error, transport_error, Result};
use crate::queue::Queue;
use log::{debug, trace};
use qbot_client::EventStream;
use qbot_codec::event::{Event, MessageEvent};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use super::director;

pub(crate) struct Handler {
    pub(crate) commands: Commands,
    pub(crate) queue: Queue,
    pub(crate) persist: PersistSink,
    pub(crate) notify: NotifySink,
    pub(crate) users: UserSink,
    /// Longest time without any event before giving up.
    pub(crate) timeout: Duration,
}

impl Handler {
    pub(crate) async fn event_loop(mut self, mut events: EventStream, shutdown: CancellationToken) -> Result<()> {
        loop {
            trace!("Dispatcher awaiting event");

            tokio::select! {
                _ = shutdown.cancelled() => {
                    debug!("Dispatcher shutting down");

                    return Ok(());
                }
                event = events.recv() => {
                    match event {
                        Some(Ok(event)) => self.handle_event(event).await?,
                        Some(Err(e)) => return transport_error(&format!("{:#}", e)),
                        None => return transport_error("Event stream closed"),
                    }
                }
                _ = tokio::time::sleep(self.timeout) => {
                    return dispatch_error(&format!("No activity for {:?} - shutting down", self.timeout));
                }
            }
        }
    }

    async fn handle_event(&mut self, event: Event) -> Result<()> {
        match event {
            Event::Message(m) => self.handle_message(m).await,
            Event::UserChange(user) => {
                if self.users.send(user).await.is_err() {
                    return dispatch_error("Users worker is gone");
                }

                Ok(())
            }
            Event::Pong(id) => {
                trace!("Pong {}", id);

                Ok(())
            }
            Event::Hello => {
                debug!("Server said hello");

                Ok(())
            }
            Event::Goodbye => transport_error("Server said goodbye"),
        }
    }

    async fn handle_message(&mut self, m: MessageEvent) -> Result<()> {
        let Some(routed) = director::route(&m, self.commands.bot_id(), self.commands.bot_name()) else {
            trace!("Ignoring message {:?}", m);

            return Ok(());
        };

        let Some(verb) = Verb::from_word(routed.verb) else {
            debug!("Unknown command {:?} from {}", routed.verb, m.user);

            return Ok(());
        };

        if routed.private && !verb.is_private() {
            debug!("Command {:?} is not accepted in private", verb);

            return Ok(());
        }

        debug!("Message {:?} with command {:?} and args {:?}", m.text, verb, routed.args);

        let (queue, notification) = self.commands.execute(verb, &self.queue, &m.channel, &m.user, routed.args);

        if queue != self.queue {
            for line in notification.message.lines() {
                debug!("{}", line);
            }

            self.queue = queue;

            if self.persist.send(self.queue.clone()).await.is_err() {
                return dispatch_error("Persister is gone");
            }
        }

        if !notification.is_empty() && self.notify.send(notification).await.is_err() {
            return dispatch_error("Notifier is gone");
        }

        Ok(())
    }
}
