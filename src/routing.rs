//! Application router configuration.

use axum::{
    Router,
    response::Redirect,
    routing::{get, post},
};

use crate::{
    AppState,
    balance::get_balances_page,
    endpoints,
    error_page::get_404_not_found,
    transaction::{create_transaction_endpoint, get_ledger_page, get_new_transaction_page},
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::LEDGER_VIEW, get(get_ledger_page))
        .route(endpoints::BALANCES_VIEW, get(get_balances_page))
        .route(
            endpoints::NEW_TRANSACTION_VIEW,
            get(get_new_transaction_page),
        )
        .route(
            endpoints::TRANSACTIONS_API,
            post(create_transaction_endpoint),
        )
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the ledger page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::LEDGER_VIEW)
}
