//! The page for recording a new loan.

use axum::response::{IntoResponse, Response};
use maud::{Markup, html};

use crate::{
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, base,
        dollar_input_styles, loading_spinner,
    },
    navigation::NavBar,
    transaction::CreateTransactionForm,
};

/// Render the page for recording a new loan.
pub async fn get_new_transaction_page() -> Response {
    new_transaction_view(&CreateTransactionForm::default(), "", None).into_response()
}

/// The full page around the new loan form, optionally with an alert above it.
pub(super) fn new_transaction_view(
    values: &CreateTransactionForm,
    error_message: &str,
    alert: Option<Markup>,
) -> Markup {
    let nav_bar = NavBar::new(endpoints::NEW_TRANSACTION_VIEW).into_html();
    let form = new_transaction_form_view(values, error_message);

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            h1 class="text-xl font-bold mb-4" { "Record a Loan" }

            @if let Some(alert) = alert {
                (alert)
            }

            (form)
        }
    };

    base("Record a Loan", &[dollar_input_styles()], &content)
}

/// The new loan form filled in with `values`.
///
/// The form posts with htmx and replaces itself with the response, so an
/// invalid submission comes back as this form with `error_message` shown.
/// Without JavaScript it falls back to a plain form post.
pub(super) fn new_transaction_form_view(
    values: &CreateTransactionForm,
    error_message: &str,
) -> Markup {
    let create_transaction_route = endpoints::TRANSACTIONS_API;

    html! {
        form
            method="post"
            action=(create_transaction_route)
            hx-post=(create_transaction_route)
            hx-target="this"
            hx-swap="outerHTML"
            hx-target-error="#alert-container"
            hx-indicator="#indicator"
            hx-disabled-elt="find button"
            class="w-full space-y-4 md:space-y-6"
        {
            div
            {
                label for="lender" class=(FORM_LABEL_STYLE) { "Lender" }

                input
                    id="lender"
                    type="text"
                    name="lender"
                    placeholder="Who lent the money"
                    value=(values.lender)
                    required
                    autofocus
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="borrower" class=(FORM_LABEL_STYLE) { "Borrower" }

                input
                    id="borrower"
                    type="text"
                    name="borrower"
                    placeholder="Who borrowed the money"
                    value=(values.borrower)
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

                div class="input-wrapper w-full"
                {
                    input
                        id="amount"
                        type="number"
                        name="amount"
                        step="0.01"
                        min="0.01"
                        placeholder="0.00"
                        value=(values.amount)
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }
            }

            @if !error_message.is_empty() {
                p class="form-error text-red-600 dark:text-red-400"
                {
                    (error_message)
                }
            }

            button type="submit" id="indicator" class=(BUTTON_PRIMARY_STYLE)
            {
                span class="htmx-indicator" { (loading_spinner()) }
                "Record Loan"
            }
        }
    }
}
