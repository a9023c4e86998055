use crate::client_api::ClientRequest;
use crate::web::WebApi;
use anyhow::{anyhow, Result};
use futures::stream::{SplitSink, StreamExt};
use futures::SinkExt;
use log::{debug, error, trace, warn};
use qbot_codec::event::Event;
use qbot_codec::frame;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;
type SocketSink = SplitSink<Socket, Message>;
type EventSink = mpsc::Sender<Result<Event>>;

/// Pump incoming frames into `events` and serve the requests until the session ends or the
/// client asks to close.
pub(crate) async fn socket_loop(
    socket: Socket,
    web: WebApi,
    mut requests: mpsc::Receiver<ClientRequest>,
    events: EventSink,
) -> Result<()> {
    let (mut sink, mut stream) = socket.split();
    let mut next_id = 1u64;

    loop {
        tokio::select! {
            incoming = stream.next() => {
                match incoming {
                    Some(Ok(Message::Text(text))) => {
                        if !forward_frame(&text, &events).await {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(frame))) => {
                        notify_closed(&events, anyhow!("Connection closed by server {:?}", frame)).await;
                        break;
                    }
                    // pings are answered by tungstenite
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        error!("Websocket error {:?}", e);

                        notify_closed(&events, e.into()).await;
                        break;
                    }
                    None => {
                        notify_closed(&events, anyhow!("Connection closed")).await;
                        break;
                    }
                }
            }
            request = requests.recv() => {
                let request = request.unwrap_or(ClientRequest::Close);

                if !handle_request(request, &mut sink, &web, &mut next_id).await {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Decode and forward one frame. Returns false if the session is over.
async fn forward_frame(text: &str, events: &EventSink) -> bool {
    trace!("Incoming {}", text);

    match frame::decode(text) {
        Ok(Some(Event::Goodbye)) => {
            notify_closed(events, anyhow!("Server said goodbye")).await;
            false
        }
        Ok(Some(event)) => events.send(Ok(event)).await.is_ok(),
        Ok(None) => true,
        Err(e) => {
            warn!("Dropping malformed frame {}: {:?}", text, e);
            true
        }
    }
}

async fn notify_closed(events: &EventSink, err: anyhow::Error) {
    if events.send(Err(err)).await.is_err() {
        debug!("Nobody listens to the events any more");
    }
}

/// Serve one request. Returns false after closing the socket.
async fn handle_request(request: ClientRequest, sink: &mut SocketSink, web: &WebApi, next_id: &mut u64) -> bool {
    match request {
        ClientRequest::PostMessage { channel, text, response } => {
            let result = send_frame(sink, frame::encode_message(*next_id, &channel, &text)).await;
            *next_id += 1;

            if response.send(result).is_err() {
                debug!("Message sender went away");
            }
        }
        ClientRequest::OpenIm { user, response } => {
            // HTTP round trip, don't block the socket meanwhile
            let web = web.clone();

            tokio::spawn(async move {
                if response.send(web.open_im(&user).await).is_err() {
                    debug!("Open IM requester went away");
                }
            });
        }
        ClientRequest::Ping { response } => {
            let result = send_frame(sink, frame::encode_ping(*next_id)).await;
            *next_id += 1;

            if response.send(result).is_err() {
                debug!("Ping sender went away");
            }
        }
        ClientRequest::Close => {
            debug!("Closing websocket");

            if let Err(e) = sink.close().await {
                warn!("Error closing websocket {:?}", e);
            }

            return false;
        }
    }

    true
}

async fn send_frame(sink: &mut SocketSink, encoded: qbot_codec::Result<String>) -> Result<()> {
    let text = encoded.map_err(|e| anyhow!("Cannot encode frame: {e}"))?;

    trace!("Outgoing {}", text);

    sink.send(Message::Text(text)).await?;

    Ok(())
}
