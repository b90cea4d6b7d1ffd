//! The loans service that owns the transactions, and its HTTP client.

use std::future::Future;

use reqwest::Client;

use crate::{
    Error,
    transaction::core::{NewTransaction, Transaction},
};

/// The source of truth for transactions.
///
/// Any failure, whether the service could not be reached, answered with a
/// non-2xx status, or sent a body that could not be decoded, is reported as a
/// single [Error::FetchFailed] or [Error::CreateFailed].
pub trait TransactionSource: Send + Sync {
    /// Fetch every transaction, in the order the source keeps them.
    fn fetch_transactions(&self) -> impl Future<Output = Result<Vec<Transaction>, Error>> + Send;

    /// Record a new transaction and return it as stored by the source.
    fn create_transaction(
        &self,
        new_transaction: &NewTransaction,
    ) -> impl Future<Output = Result<Transaction, Error>> + Send;
}

/// A [TransactionSource] backed by the loans REST API.
///
/// - `GET {base_url}/transactions` lists transactions.
/// - `POST {base_url}/transactions` creates a transaction from a JSON body
///   `{lender, borrower, amount}`.
#[derive(Debug, Clone)]
pub struct HttpTransactionSource {
    client: Client,
    transactions_url: String,
}

impl HttpTransactionSource {
    /// Create a client for the loans API at `base_url`, e.g. "http://localhost:8080/api".
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Create a client for the loans API at `base_url` that sends requests with `client`.
    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            transactions_url: format!("{}/transactions", base_url.trim_end_matches('/')),
        }
    }

    /// The URL of the transactions collection.
    pub fn transactions_url(&self) -> &str {
        &self.transactions_url
    }
}

impl TransactionSource for HttpTransactionSource {
    async fn fetch_transactions(&self) -> Result<Vec<Transaction>, Error> {
        tracing::debug!("GET {}", self.transactions_url);

        let response = self
            .client
            .get(&self.transactions_url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|error| Error::FetchFailed(error.to_string()))?;

        response
            .json::<Vec<Transaction>>()
            .await
            .map_err(|error| Error::FetchFailed(error.to_string()))
    }

    async fn create_transaction(
        &self,
        new_transaction: &NewTransaction,
    ) -> Result<Transaction, Error> {
        tracing::debug!("POST {} {new_transaction:?}", self.transactions_url);

        let response = self
            .client
            .post(&self.transactions_url)
            .json(new_transaction)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|error| Error::CreateFailed(error.to_string()))?;

        response
            .json::<Transaction>()
            .await
            .map_err(|error| Error::CreateFailed(error.to_string()))
    }
}
