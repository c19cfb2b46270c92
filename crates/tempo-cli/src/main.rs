use anyhow::Context;
use clap::Parser;
use tokio::sync::mpsc;

use tempo_config::TempoConfig;
use tempo_engine::{EngineClient, HttpPushConnector, ReconnectPolicy, run_push_channel};
use tempo_session::{SessionEvent, SessionRuntime};

mod board;
mod cli;
mod repl;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("tempo error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let mut config = TempoConfig::load_with_dotenv().context("failed to load configuration")?;
    if let Some(url) = cli.engine_url {
        config.engine.base_url = url;
    }

    let client = EngineClient::new(&config.engine).context("failed to build engine client")?;
    let (runtime, events_rx) = SessionRuntime::new(client, config.session.move_request_delay());

    spawn_push_channel(&config, runtime.sender());

    repl::Repl::new(runtime, events_rx).run().await
}

/// Start the push channel supervisor plus a forwarder that feeds its events
/// into the session loop. Both tasks end on their own once the session's
/// receiver is dropped.
fn spawn_push_channel(config: &TempoConfig, session_tx: mpsc::Sender<SessionEvent>) {
    let connector = HttpPushConnector::new(&config.engine.base_url, &config.push);
    let policy = ReconnectPolicy::from(&config.push);
    let (push_tx, mut push_rx) = mpsc::channel(32);

    tokio::spawn(async move {
        if let Err(err) = run_push_channel(connector, push_tx, policy).await {
            tracing::warn!(%err, "push channel shut down");
        }
    });
    tokio::spawn(async move {
        while let Some(event) = push_rx.recv().await {
            if session_tx.send(SessionEvent::Push(event)).await.is_err() {
                break;
            }
        }
    });
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("TEMPO_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
