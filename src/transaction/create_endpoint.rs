//! The endpoint for recording a new loan.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::Form;
use axum_htmx::{HxRedirect, HxRequest};
use serde::Deserialize;

use crate::{
    endpoints,
    transaction::{
        NewTransaction, TransactionState,
        create_page::{new_transaction_form_view, new_transaction_view},
    },
};

/// The form data for a new loan, as typed by the user.
///
/// The fields are kept as text so that an invalid submission can be shown
/// back to the user exactly as it was entered.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct CreateTransactionForm {
    pub lender: String,
    pub borrower: String,
    pub amount: String,
}

/// A route handler for recording a new loan, redirects to the ledger on success.
///
/// Invalid input is sent back as the form with an error message and never
/// reaches the loans service.
pub async fn create_transaction_endpoint(
    State(state): State<TransactionState>,
    HxRequest(is_htmx_request): HxRequest,
    Form(form): Form<CreateTransactionForm>,
) -> Response {
    let new_transaction = match NewTransaction::parse(&form.lender, &form.borrower, &form.amount)
    {
        Ok(new_transaction) => new_transaction,
        Err(error) => {
            tracing::debug!("Rejected new loan {form:?}: {error}");
            let error_message = error.to_string();

            return if is_htmx_request {
                new_transaction_form_view(&form, &error_message).into_response()
            } else {
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    new_transaction_view(&form, &error_message, None),
                )
                    .into_response()
            };
        }
    };

    match state.transaction_store.create(new_transaction).await {
        Ok(_) if is_htmx_request => (
            HxRedirect(endpoints::LEDGER_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Ok(_) => Redirect::to(endpoints::LEDGER_VIEW).into_response(),
        Err(error) if is_htmx_request => error.into_alert_response(),
        Err(error) => {
            let (status_code, alert) = error.into_alert();

            (
                status_code,
                new_transaction_view(&form, "", Some(alert.into_html())),
            )
                .into_response()
        }
    }
}
