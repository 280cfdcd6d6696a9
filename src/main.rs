//! Boardinghouse Console — notification service entry point
//!
//! Wires the notification bus, inbox, and broadcast bridge together and runs
//! the demo generator until Ctrl-C.

use std::sync::Arc;

use tokio::sync::broadcast::error::RecvError;
use tracing;
use tracing_subscriber::{fmt, EnvFilter};

use boarding_core::config::AppConfig;
use boarding_core::error::AppError;
use boarding_realtime::{BroadcastBridge, NotificationBus, NotificationInbox};

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Console error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from files and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("BOARDING_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Boardinghouse Console v{}", env!("CARGO_PKG_VERSION"));

    let notifications = &config.notifications;
    let bus = Arc::new(NotificationBus::from_config(notifications)?);

    let inbox = Arc::new(NotificationInbox::new(notifications.inbox_max_stored));
    bus.subscribe(inbox.as_listener());

    let bridge = BroadcastBridge::attach(&bus, notifications.bridge_buffer_size);
    let mut feed = bridge.subscribe();
    let feed_task = tokio::spawn(async move {
        loop {
            match feed.recv().await {
                Ok(event) => tracing::info!(
                    category = %event.category(),
                    subject = %event.subject,
                    "{}: {}",
                    event.title,
                    event.message
                ),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!("Notification feed lagged, skipped {} events", skipped);
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    if notifications.enabled {
        bus.start_generating()?;
    } else {
        tracing::info!("Notification generator disabled by configuration");
    }

    tokio::signal::ctrl_c()
        .await
        .map_err(|e| AppError::internal(format!("Failed to listen for shutdown signal: {e}")))?;

    tracing::info!("Shutdown signal received");
    bus.stop_generating();
    bridge.detach(&bus);
    if let Err(e) = feed_task.await {
        tracing::warn!("Notification feed task ended abnormally: {}", e);
    }

    tracing::info!(
        stored = inbox.len(),
        unread = inbox.unread_count(),
        metrics = ?bus.metrics(),
        "Console stopped"
    );
    Ok(())
}
