//! Implements a struct that holds the state of the web server.

use std::sync::Arc;

use crate::transaction::{HttpTransactionSource, TransactionStore};

/// The state of the web server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The in-memory copy of the loans service's transactions, shared by
    /// every request.
    pub transaction_store: Arc<TransactionStore>,
}

impl AppState {
    /// Create a new [AppState] with an empty store backed by the loans API
    /// at `api_base_url`, e.g. "http://localhost:8080/api".
    pub fn new(api_base_url: &str) -> Self {
        Self {
            transaction_store: Arc::new(TransactionStore::new(HttpTransactionSource::new(
                api_base_url,
            ))),
        }
    }
}
