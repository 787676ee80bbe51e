//! Taskpad interactive shell
//!
//! Reads commands from stdin and applies them to an in-memory task store
//! that lives for the duration of the session.

mod command;
mod config;
mod form;
mod session;
mod view;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ShellConfig;
use crate::session::Session;
use taskpad_core::task::InMemoryTaskStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "taskpad=info,taskpad_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = ShellConfig::from_env();
    let store = InMemoryTaskStore::with_config(config.store_config());
    tracing::info!(
        "Task store ready (id policy: {}, event capacity: {})",
        store.id_policy(),
        config.event_capacity
    );

    // Mirror every store change into the log
    let mut events = store.subscribe();
    let watcher = tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => {
                    tracing::debug!(
                        "Store event: {} {}",
                        event.kind(),
                        event.task_id().unwrap_or("*")
                    );
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!("Event watcher lagged, skipped {} events", skipped);
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    let mut session = Session::new(store, config);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    stdout
        .write_all(b"Taskpad. Type 'help' for commands.\n")
        .await?;
    loop {
        if !session.is_confirming() {
            stdout.write_all(b"> ").await?;
            stdout.flush().await?;
        }

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let reply = session.handle_line(&line).await;
        if !reply.text.is_empty() {
            stdout.write_all(reply.text.as_bytes()).await?;
            stdout.write_all(b"\n").await?;
            stdout.flush().await?;
        }
        if reply.quit {
            break;
        }
    }

    let remaining = session.store().count_total().await;
    drop(session);
    watcher.abort();
    tracing::info!("Session ended with {} tasks discarded", remaining);
    Ok(())
}
