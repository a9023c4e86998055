//! The workers which connect the chat transport to the commands.
//!
//! The handler is the only owner of the queue. It hands snapshots to the persister and texts to
//! the notifier over bounded channels, renames go to the users worker, and the keepalive pings
//! the transport. All of them stop on the shared shutdown token, and any of them stopping
//! cancels the token.
mod director;
mod handler;
mod keepalive;
mod notifier;
mod persister;
mod users;


use crate::command::{Commands, Notification};
use crate::config;
use crate::directory::UserDirectory;
use crate::error::{dispatch_error, Result};
use crate::queue::Queue;
use log::{debug, error};
use qbot_client::{ClientSink, EventStream};
use qbot_codec::event::UserInfo;
use std::future::Future;
use std::path::PathBuf;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

pub(crate) type PersistSink = mpsc::Sender<Queue>;
pub(crate) type NotifySink = mpsc::Sender<Notification>;
pub(crate) type UserSink = mpsc::Sender<UserInfo>;

/// Everything the pipeline works with.
pub struct Context {
    pub commands: Commands,
    /// The queue as loaded, also the baseline of the persister.
    pub queue: Queue,
    pub directory: UserDirectory,
    pub data_file: PathBuf,
    pub client: ClientSink,
}

/// The running workers.
pub struct Pipeline {
    workers: Vec<(&'static str, JoinHandle<Result<()>>)>,
}

impl Pipeline {
    /// Wait for every worker to stop. Returns the first error any of them stopped with.
    pub async fn wait(self) -> Result<()> {
        let mut result = Ok(());

        for (name, worker) in self.workers {
            let outcome = match worker.await {
                Ok(outcome) => outcome,
                Err(e) => dispatch_error(&format!("{} worker panicked: {}", name, e)),
            };

            if result.is_ok() {
                result = outcome;
            }
        }

        result
    }
}

pub fn start(context: Context, events: EventStream, config: &config::Dispatch, shutdown: CancellationToken) -> Pipeline {
    let buffer = config.channel_buffer.max(1);

    let (persist_sink, persist_stream) = mpsc::channel(buffer);
    let (notify_sink, notify_stream) = mpsc::channel(buffer);
    let (user_sink, user_stream) = mpsc::channel(buffer);

    let workers = vec![
        spawn_worker(
            "persister",
            &shutdown,
            persister::persist_loop(context.data_file, context.queue.clone(), persist_stream, shutdown.clone()),
        ),
        spawn_worker(
            "notifier",
            &shutdown,
            notifier::notify_loop(context.client.clone(), notify_stream, shutdown.clone()),
        ),
        spawn_worker(
            "users",
            &shutdown,
            users::rename_loop(context.directory, user_stream, shutdown.clone()),
        ),
        spawn_worker(
            "keepalive",
            &shutdown,
            keepalive::keepalive_loop(context.client, config.keepalive_interval(), shutdown.clone()),
        ),
        spawn_worker(
            "dispatcher",
            &shutdown,
            handler::Handler {
                commands: context.commands,
                queue: context.queue,
                persist: persist_sink,
                notify: notify_sink,
                users: user_sink,
                timeout: config.inactivity_timeout(),
            }
            .event_loop(events, shutdown.clone()),
        ),
    ];

    Pipeline { workers }
}

fn spawn_worker<F>(name: &'static str, shutdown: &CancellationToken, worker: F) -> (&'static str, JoinHandle<Result<()>>)
where
    F: Future<Output = Result<()>> + Send + 'static,
{
    let shutdown = shutdown.clone();

    let handle = tokio::spawn(async move {
        // Cancels on return and on panic as well.
        let _stop_all = shutdown.drop_guard();

        let result = worker.await;

        match &result {
            Ok(()) => debug!("{} worker stopped", name),
            Err(e) => error!("{} worker failed {:?}", name, e),
        }

        result
    });

    (name, handle)
}
