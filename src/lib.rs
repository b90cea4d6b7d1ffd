//! Loan Ledger is a web app for recording money lent between people and
//! seeing who owes whom.
//!
//! This library serves HTML pages over a remote loans API. The loans API owns
//! the transactions, this crate keeps an in-memory copy of them, validates new
//! loans before sending them, and works out each person's net balance.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod balance;
mod endpoints;
mod error;
mod error_page;
mod html;
mod logging;
mod navigation;
mod routing;
mod transaction;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use balance::{BalanceMap, aggregate, sorted_balances};
pub use error::Error;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;
pub use transaction::{
    HttpTransactionSource, NewTransaction, StoreSnapshot, Transaction, TransactionId,
    TransactionSource, TransactionStore,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("Could not listen for ctrl+c: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!("Could not listen for the terminate signal: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
