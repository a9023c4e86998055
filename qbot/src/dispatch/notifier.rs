use crate::command::{Notification, Recipient};
use crate::error::{transport_error, Result};
use log::trace;
use qbot_client::ClientSink;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

pub(crate) async fn notify_loop(
    client: ClientSink,
    mut notifications: mpsc::Receiver<Notification>,
    shutdown: CancellationToken,
) -> Result<()> {
    loop {
        tokio::select! {
            notification = notifications.recv() => {
                match notification {
                    Some(n) => deliver(&client, n).await?,
                    None => return Ok(()),
                }
            }
            _ = shutdown.cancelled() => return Ok(()),
        }
    }
}

/// Post the message, opening the direct message channel first if it goes to a user.
async fn deliver(client: &ClientSink, n: Notification) -> Result<()> {
    let channel = match n.recipient {
        Recipient::Channel(channel) => channel,
        Recipient::User(id) => match qbot_client::open_im(client, &id).await {
            Ok(channel) => channel,
            Err(e) => return transport_error(&format!("Cannot open IM channel for {}: {:#}", id, e)),
        },
    };

    trace!("Posting to {}: {}", channel, n.message);

    if let Err(e) = qbot_client::post_message(client, &channel, &n.message).await {
        return transport_error(&format!("Cannot post to {}: {:#}", channel, e));
    }

    Ok(())
}
