use std::sync::Arc;

use clap::Parser;
use client::{ClientError, ProtocolHandler, RelayClient, RelayConfig};

#[derive(Parser, Debug)]
#[command(name = "relay-cli", about = "Relay stream listener: connects and logs every decoded message")]
struct Cli {
    #[arg(long, env = "RELAY_ENDPOINT", default_value = "ws://127.0.0.1:3000")]
    endpoint: String,

    #[arg(long, env = "RELAY_SESSION")]
    session: String,

    #[arg(long, default_value_t = false)]
    reconnect: bool,
}

/// Relies on the handler trait's default bodies, which log each message.
struct LogHandler;

impl ProtocolHandler for LogHandler {}

#[tokio::main]
async fn main() -> Result<(), ClientError> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let relay = RelayClient::new(
        RelayConfig {
            session: cli.session,
            reconnect: cli.reconnect,
            relay_endpoint: cli.endpoint,
        },
        Arc::new(LogHandler),
    )?;
    relay.connect();

    tracing::info!("streaming; press ctrl-c to stop");
    tokio::signal::ctrl_c().await.expect("ctrl-c handler failed");
    relay.close();
    Ok(())
}
