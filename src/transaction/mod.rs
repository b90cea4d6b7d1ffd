//! Loans between two people and the pages for listing and recording them.
//!
//! - [Transaction] and the validated [NewTransaction] request
//! - [TransactionSource], the remote loans service, and its HTTP client
//! - [TransactionStore], the in-memory copy of the service's transactions
//! - The ledger page, the new loan page and the create endpoint

use std::sync::Arc;

use axum::extract::FromRef;

use crate::AppState;

mod core;
mod create_endpoint;
mod create_page;
mod ledger_page;
mod remote;
mod store;

pub use core::{NewTransaction, Transaction, TransactionId};
pub use create_endpoint::{CreateTransactionForm, create_transaction_endpoint};
pub use create_page::get_new_transaction_page;
pub use ledger_page::get_ledger_page;
pub use remote::{HttpTransactionSource, TransactionSource};
pub use store::{StoreSnapshot, TransactionStore};

/// The state needed by the route handlers that read or record loans.
#[derive(Debug, Clone)]
pub struct TransactionState {
    pub transaction_store: Arc<TransactionStore>,
}

impl FromRef<AppState> for TransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transaction_store: state.transaction_store.clone(),
        }
    }
}

#[cfg(test)]
impl TransactionState {
    /// State backed by the loans API at `base_url`.
    pub(crate) fn for_api(base_url: &str) -> Self {
        Self {
            transaction_store: Arc::new(TransactionStore::new(HttpTransactionSource::new(
                base_url,
            ))),
        }
    }
}
