use crate::error::ClientError;
use crate::processor;
use crate::web::WebApi;
use anyhow::{anyhow, Result};
use log::{debug, error, info, warn};
use qbot_codec::event::{Event, UserInfo};
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

/// Sending half of the request channel of a connected client.
pub type ClientSink = mpsc::Sender<ClientRequest>;

/// Incoming events. An `Err` item means the session is over and the stream ends after it.
pub type EventStream = mpsc::Receiver<Result<Event>>;

/// Represents a request to the client. The outcome is sent back on the `response` channel.
#[derive(Debug)]
pub enum ClientRequest {
    PostMessage {
        channel: String,
        text: String,
        response: oneshot::Sender<Result<()>>,
    },
    /// Open the direct message channel with a user and answer its id.
    OpenIm {
        user: String,
        response: oneshot::Sender<Result<String>>,
    },
    Ping {
        response: oneshot::Sender<Result<()>>,
    },
    Close,
}

pub struct Client {
    /// User id of the bot itself.
    pub id: String,
    pub name: String,
    /// The workspace members at the time of connecting.
    pub users: Vec<UserInfo>,
    request_sink: ClientSink,
    socket_loop: JoinHandle<()>,
}

impl Client {
    pub fn sink(&self) -> ClientSink {
        self.request_sink.clone()
    }

    /// Close the websocket and wait for the socket loop to finish.
    pub async fn close(self) {
        if self.request_sink.send(ClientRequest::Close).await.is_err() {
            debug!("Socket loop has already finished");
        }

        if let Err(e) = self.socket_loop.await {
            error!("Socket loop panicked {:?}", e);
        }
    }
}

/// Open a real-time session: fetch the websocket URL, the bot identity and the member list,
/// then connect the websocket.
pub async fn connect(token: &str) -> Result<(Client, EventStream)> {
    let web = WebApi::new(token)?;

    let (url, bot) = web.rtm_connect().await?;
    let users = web.users_list().await?;

    debug!("Connecting websocket {}", url);

    let (socket, _) = tokio_tungstenite::connect_async(url.as_str()).await?;

    let (request_sink, requests) = mpsc::channel(16);
    let (event_sink, events) = mpsc::channel(16);

    let socket_loop = tokio::spawn(async move {
        if let Err(e) = processor::socket_loop(socket, web, requests, event_sink).await {
            error!("Socket loop finished with error {:?}", e);
        }
    });

    info!("Connected as {} ({}), {} users known", bot.name, bot.id, users.len());

    Ok((
        Client {
            id: bot.id,
            name: bot.name,
            users,
            request_sink,
            socket_loop,
        },
        events,
    ))
}

/// Keep trying to connect, doubling the wait between attempts up to `max_backoff`. Gives up
/// immediately if the token is refused.
pub async fn connect_with_backoff(token: &str, max_backoff: Duration) -> Result<(Client, EventStream)> {
    let mut backoff = Duration::from_secs(1);

    loop {
        match connect(token).await {
            Ok(connected) => return Ok(connected),
            Err(e) if is_fatal(&e) => return Err(e),
            Err(e) => {
                warn!("Cannot connect, retrying in {:?}: {:?}", backoff, e);

                tokio::time::sleep(backoff).await;

                backoff = next_backoff(backoff, max_backoff);
            }
        }
    }
}

pub(crate) fn next_backoff(current: Duration, max: Duration) -> Duration {
    std::cmp::min(current * 2, max)
}

fn is_fatal(err: &anyhow::Error) -> bool {
    err.downcast_ref::<ClientError>().map(ClientError::is_fatal).unwrap_or(false)
}

/// Post a text message into a channel.
pub async fn post_message(sink: &ClientSink, channel: &str, text: &str) -> Result<()> {
    let (tx, rx) = oneshot::channel();

    sink.send(ClientRequest::PostMessage {
        channel: channel.to_string(),
        text: text.to_string(),
        response: tx,
    })
    .await
    .map_err(|_| anyhow!("Client is closed"))?;

    rx.await?
}

/// Get the id of the direct message channel with `user`.
pub async fn open_im(sink: &ClientSink, user: &str) -> Result<String> {
    let (tx, rx) = oneshot::channel();

    sink.send(ClientRequest::OpenIm {
        user: user.to_string(),
        response: tx,
    })
    .await
    .map_err(|_| anyhow!("Client is closed"))?;

    rx.await?
}

pub async fn ping(sink: &ClientSink) -> Result<()> {
    let (tx, rx) = oneshot::channel();

    sink.send(ClientRequest::Ping { response: tx })
        .await
        .map_err(|_| anyhow!("Client is closed"))?;

    rx.await?
}
