use crate::error::{transport_error, Result};
use log::trace;
use qbot_client::ClientSink;
use std::time::Duration;
use tokio::time::{self, Instant};
use tokio_util::sync::CancellationToken;

/// Ping the transport every `period`, the first ping goes out after one period.
pub(crate) async fn keepalive_loop(client: ClientSink, period: Duration, shutdown: CancellationToken) -> Result<()> {
    let mut ticker = time::interval_at(Instant::now() + period, period);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                trace!("Keepalive ping");

                if let Err(e) = qbot_client::ping(&client).await {
                    return transport_error(&format!("Ping failed: {:#}", e));
                }
            }
            _ = shutdown.cancelled() => return Ok(()),
        }
    }
}
