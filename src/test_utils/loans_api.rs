//! An in-process stand-in for the remote loans API.

use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use tokio::{net::TcpListener, sync::oneshot, task::JoinHandle};

use crate::transaction::{Transaction, TransactionId};

/// Build a transaction without a creation date.
pub(crate) fn loan(id: &str, lender: &str, borrower: &str, amount: f64) -> Transaction {
    Transaction {
        id: TransactionId::new(id),
        lender: lender.to_owned(),
        borrower: borrower.to_owned(),
        amount,
        created_at: None,
    }
}

#[derive(Debug, Default)]
struct MockState {
    transactions: Vec<Transaction>,
    received_bodies: Vec<serde_json::Value>,
    fail_reads: bool,
    fail_writes: bool,
    get_count: usize,
}

/// A loans API served on an ephemeral localhost port.
///
/// `GET /transactions` returns the stored transactions and
/// `POST /transactions` appends a transaction with the next numeric ID.
pub(crate) struct MockLoansApi {
    pub(crate) base_url: String,
    state: Arc<Mutex<MockState>>,
    shutdown: Option<oneshot::Sender<()>>,
    server: Option<JoinHandle<()>>,
}

impl MockLoansApi {
    pub(crate) async fn spawn(transactions: Vec<Transaction>) -> Self {
        let state = Arc::new(Mutex::new(MockState {
            transactions,
            ..Default::default()
        }));

        let app = Router::new()
            .route("/transactions", get(list_transactions).post(create_transaction))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Could not bind mock loans API");
        let address = listener
            .local_addr()
            .expect("Could not get mock loans API address");

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let server = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
                .expect("Mock loans API crashed");
        });

        Self {
            base_url: format!("http://{address}"),
            state,
            shutdown: Some(shutdown_tx),
            server: Some(server),
        }
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().expect("Mock loans API state is poisoned")
    }

    /// Make `GET /transactions` respond with 500 Internal Server Error.
    pub(crate) fn fail_reads(&self, fail: bool) {
        self.lock().fail_reads = fail;
    }

    /// Make `POST /transactions` respond with 500 Internal Server Error.
    pub(crate) fn fail_writes(&self, fail: bool) {
        self.lock().fail_writes = fail;
    }

    /// Replace the transactions held by the API, e.g. to simulate another client.
    pub(crate) fn set_transactions(&self, transactions: Vec<Transaction>) {
        self.lock().transactions = transactions;
    }

    pub(crate) fn transactions(&self) -> Vec<Transaction> {
        self.lock().transactions.clone()
    }

    /// The JSON bodies of every `POST /transactions` request, in order.
    pub(crate) fn received_bodies(&self) -> Vec<serde_json::Value> {
        self.lock().received_bodies.clone()
    }

    /// The number of `GET /transactions` requests served.
    pub(crate) fn get_count(&self) -> usize {
        self.lock().get_count
    }

    /// Stop serving and wait for the server task to finish.
    pub(crate) async fn shutdown(mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }

        if let Some(server) = self.server.take() {
            server.await.expect("Mock loans API task panicked");
        }
    }
}

impl Drop for MockLoansApi {
    fn drop(&mut self) {
        if let Some(server) = self.server.take() {
            server.abort();
        }
    }
}

type SharedState = Arc<Mutex<MockState>>;

async fn list_transactions(State(state): State<SharedState>) -> Response {
    let mut state = state.lock().expect("Mock loans API state is poisoned");
    state.get_count += 1;

    if state.fail_reads {
        return (StatusCode::INTERNAL_SERVER_ERROR, "read failed").into_response();
    }

    Json(state.transactions.clone()).into_response()
}

async fn create_transaction(
    State(state): State<SharedState>,
    Json(body): Json<serde_json::Value>,
) -> Response {
    let mut state = state.lock().expect("Mock loans API state is poisoned");
    state.received_bodies.push(body.clone());

    if state.fail_writes {
        return (StatusCode::INTERNAL_SERVER_ERROR, "write failed").into_response();
    }

    let id = (state.transactions.len() + 1).to_string();
    let transaction = loan(
        &id,
        body["lender"].as_str().unwrap_or_default(),
        body["borrower"].as_str().unwrap_or_default(),
        body["amount"].as_f64().unwrap_or_default(),
    );
    state.transactions.push(transaction.clone());

    (StatusCode::CREATED, Json(transaction)).into_response()
}
