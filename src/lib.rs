//! Emotion Ledger is a web service for recording why money was spent, not
//! just how much.
//!
//! Each expense is tagged with the emotion felt at the time, and the service
//! reports how often each emotion led to spending and how much was spent.
//!
//! This library provides a JSON REST API backed by a SQLite database.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod analytics;
mod app_state;
mod cors;
mod database_id;
mod db;
mod endpoints;
mod error;
mod expense;
mod logging;
mod routing;

pub use analytics::{EmotionSummary, summarize_by_emotion};
pub use app_state::AppState;
pub use cors::{DEFAULT_ALLOWED_ORIGINS, cors_layer, parse_allowed_origins};
pub use database_id::{DatabaseId, ExpenseId};
pub use db::initialize as initialize_db;
pub use error::{Error, StorageError, ValidationError};
pub use expense::{
    Expense, ExpenseRequest, NewExpense, count_expenses, create_expense, list_expenses,
};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;

/// Wait for ctrl+c or, on unix, SIGTERM and then ask the server behind `handle`
/// to stop accepting connections.
///
/// In-flight requests get one second to finish before the server stops.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("could not listen for ctrl+c: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(error) => {
                tracing::error!("could not listen for SIGTERM: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let signal_name = tokio::select! {
        _ = ctrl_c => "ctrl+c",
        _ = terminate => "terminate",
    };

    tracing::info!("Received {signal_name} signal, shutting down.");
    handle.graceful_shutdown(Some(SHUTDOWN_GRACE_PERIOD));
}

const SHUTDOWN_GRACE_PERIOD: Duration = Duration::from_secs(1);
