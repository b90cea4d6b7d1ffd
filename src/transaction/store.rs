//! The in-memory copy of the loans service's transactions.
//!
//! The store never patches its collection in place. Every change replaces the
//! whole collection with what the loans service returned, so readers always
//! see a complete list: either the one before a refresh or the one after it.
//!
//! Loads are numbered in the order they start. A load that finishes after a
//! later-started load has already been applied is discarded, so a slow page
//! visit cannot put back a list that is older than a create's resync.

use std::{
    collections::HashSet,
    sync::{
        Arc,
        atomic::{AtomicU64, AtomicUsize, Ordering},
    },
};

use tokio::sync::{Mutex, RwLock};

use crate::{
    Error,
    transaction::{
        core::{NewTransaction, Transaction},
        remote::{HttpTransactionSource, TransactionSource},
    },
};

/// A consistent view of the store at one point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreSnapshot {
    /// The transactions in the order the loans service returned them.
    pub transactions: Arc<Vec<Transaction>>,
    /// Whether a load or create is in flight.
    pub is_loading: bool,
    /// Why the last load or create failed, if it did.
    pub last_error: Option<String>,
}

#[derive(Debug, Default)]
struct Contents {
    transactions: Arc<Vec<Transaction>>,
    last_error: Option<String>,
    // The number of the load that produced `transactions`, 0 before any load.
    applied_load: u64,
}

/// Holds the transactions fetched from a [TransactionSource].
///
/// Create one per application and share it behind an [Arc].
#[derive(Debug)]
pub struct TransactionStore<S = HttpTransactionSource> {
    source: S,
    contents: RwLock<Contents>,
    in_flight: AtomicUsize,
    started_loads: AtomicU64,
    // Serializes writes so that each create is followed by its own resync
    // before the next create starts.
    write_lock: Mutex<()>,
}

/// Counts an operation as in flight until dropped, so that the busy flag is
/// cleared even if the operation's future is dropped part way.
struct BusyGuard<'a>(&'a AtomicUsize);

impl<'a> BusyGuard<'a> {
    fn new(in_flight: &'a AtomicUsize) -> Self {
        in_flight.fetch_add(1, Ordering::SeqCst);
        Self(in_flight)
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl<S> TransactionStore<S>
where
    S: TransactionSource,
{
    /// Create an empty store. Call [TransactionStore::load] to populate it.
    pub fn new(source: S) -> Self {
        Self {
            source,
            contents: RwLock::new(Contents::default()),
            in_flight: AtomicUsize::new(0),
            started_loads: AtomicU64::new(0),
            write_lock: Mutex::new(()),
        }
    }

    /// The current transactions, busy flag and last error, read together.
    pub async fn snapshot(&self) -> StoreSnapshot {
        let contents = self.contents.read().await;

        StoreSnapshot {
            transactions: contents.transactions.clone(),
            is_loading: self.is_loading(),
            last_error: contents.last_error.clone(),
        }
    }

    /// Whether a load or create is in flight.
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    /// Replace the store's transactions with the full list from the source.
    ///
    /// On success the last error is cleared. On failure the collection is
    /// emptied and the error message is kept as the last error.
    ///
    /// If a load that started after this one has already been applied, this
    /// load's outcome is discarded and the store is left as it is.
    ///
    /// # Errors
    ///
    /// Returns [Error::FetchFailed] if the source could not provide the list.
    pub async fn load(&self) -> Result<(), Error> {
        let load_number = self.started_loads.fetch_add(1, Ordering::SeqCst) + 1;

        let result = {
            let _busy = BusyGuard::new(&self.in_flight);
            self.source.fetch_transactions().await
        };

        let mut contents = self.contents.write().await;

        if load_number < contents.applied_load {
            tracing::debug!(
                "Discarding load {load_number}, load {} has already replaced the transactions",
                contents.applied_load
            );
            return result.map(|_| ());
        }

        contents.applied_load = load_number;

        match result {
            Ok(transactions) => {
                let transactions = drop_duplicate_ids(transactions);
                tracing::info!("Loaded {} transactions", transactions.len());

                contents.transactions = Arc::new(transactions);
                contents.last_error = None;

                Ok(())
            }
            Err(error) => {
                tracing::error!("Could not load transactions: {error}");

                contents.transactions = Arc::default();
                contents.last_error = Some(error.to_string());

                Err(error)
            }
        }
    }

    /// Send `new_transaction` to the source, then reload every transaction
    /// from the source once the write has succeeded.
    ///
    /// The store's collection is never changed by a failed write. A failed
    /// reload after a successful write is reported through the last error,
    /// the same as any other failed load.
    ///
    /// # Errors
    ///
    /// Returns [Error::CreateFailed] if the source did not accept the write.
    pub async fn create(&self, new_transaction: NewTransaction) -> Result<Transaction, Error> {
        let _write_guard = self.write_lock.lock().await;
        // Held across the write and the resync.
        let _busy = BusyGuard::new(&self.in_flight);

        let result = self.source.create_transaction(&new_transaction).await;

        match result {
            Ok(created) => {
                tracing::info!(
                    "Created transaction {}: {} lent {} ${}",
                    created.id,
                    created.lender,
                    created.borrower,
                    created.amount
                );

                if let Err(error) = self.load().await {
                    tracing::warn!(
                        "Transaction {} was created but the resync failed: {error}",
                        created.id
                    );
                }

                Ok(created)
            }
            Err(error) => {
                tracing::error!("Could not create transaction {new_transaction:?}: {error}");

                self.contents.write().await.last_error = Some(error.to_string());

                Err(error)
            }
        }
    }
}

/// Keep the first transaction for each ID.
fn drop_duplicate_ids(transactions: Vec<Transaction>) -> Vec<Transaction> {
    let mut seen = HashSet::with_capacity(transactions.len());

    transactions
        .into_iter()
        .filter(|transaction| {
            let is_new = seen.insert(transaction.id.clone());

            if !is_new {
                tracing::warn!(
                    "The loans service returned the transaction ID {} more than once, ignoring the duplicate",
                    transaction.id
                );
            }

            is_new
        })
        .collect()
}
