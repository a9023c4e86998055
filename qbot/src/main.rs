use clap::Parser;
use env_logger::Builder;
use log::info;
use qbot::command::Commands;
use qbot::config::{self, Cli};
use qbot::directory::UserDirectory;
use qbot::dispatch::{self, Context};
use qbot::{logerr, persist, Result};
use std::io::Write;
use std::time::Duration;
use tokio::signal::unix::{signal, SignalKind};
use tokio_util::sync::CancellationToken;

fn setup_logger() {
    let mut builder = Builder::from_default_env();

    builder
        .format_timestamp_millis()
        .format(|buf, record| {
            let lvl = buf.default_level_style(record.level()).bold();

            writeln!(
                buf,
                "{} - [{lvl}{:5}{lvl:#}] {}:{} - {}",
                buf.timestamp_millis(),
                record.level(),
                record.file().unwrap_or_default(),
                record.line().unwrap_or_default(),
                record.args()
            )
        })
        .write_style(env_logger::WriteStyle::Always)
        .init();
}

/// Wait for SIGINT or SIGTERM.
async fn wait_for_signal() -> Result<()> {
    let mut terminate = signal(SignalKind::terminate())?;

    tokio::select! {
        result = tokio::signal::ctrl_c() => result?,
        _ = terminate.recv() => {}
    }

    Ok(())
}

#[tokio::main]
pub async fn main() -> Result<()> {
    setup_logger();

    let cli = Cli::parse();

    info!("Qbot version {}", env!("CARGO_PKG_VERSION"));

    let config = config::load(cli.config.as_deref())?;
    let queue = persist::load(&cli.data_file).await?;

    info!("Loaded {} entries from {}", queue.len(), cli.data_file.display());

    let max_backoff = Duration::from_secs(config.connection.max_backoff_secs);

    let (client, events) = tokio::select! {
        connected = qbot_client::connect_with_backoff(&cli.token, max_backoff) => connected?,
        result = wait_for_signal() => {
            info!("Received signal before connecting - shutting down");

            return result;
        }
    };

    info!("Connected as {}", client.name);

    let directory = UserDirectory::new(&client.users);
    let commands = Commands::new(
        &client.id,
        &client.name,
        directory.clone(),
        Duration::from_secs(config.commands.oust_confirmation_secs),
    );

    let shutdown = CancellationToken::new();
    let context = Context {
        commands,
        queue,
        directory,
        data_file: cli.data_file,
        client: client.sink(),
    };

    let pipeline = dispatch::start(context, events, &config.dispatch, shutdown.clone());

    info!("Ready");

    tokio::select! {
        result = wait_for_signal() => {
            logerr!(result);

            info!("Received signal - shutting down");
        }
        _ = shutdown.cancelled() => {
            info!("Execution terminated - shutting down");
        }
    }

    shutdown.cancel();

    let result = pipeline.wait().await;

    client.close().await;

    info!("Shutdown complete");

    result
}
