//! The ledger page listing every loan.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use time::{format_description::BorrowedFormatItem, macros::format_description};

use crate::{
    alert::Alert,
    endpoints,
    html::{
        BUTTON_SECONDARY_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE,
        TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base, format_currency, loading_spinner,
    },
    navigation::NavBar,
    transaction::{StoreSnapshot, Transaction, TransactionState},
};

const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

/// Reload the transactions from the loans service and render the ledger.
///
/// A failed reload is not an error for this page, the store's last error is
/// shown above an empty ledger instead.
pub async fn get_ledger_page(State(state): State<TransactionState>) -> Response {
    let store = &state.transaction_store;
    let _ = store.load().await;
    let snapshot = store.snapshot().await;

    ledger_view(&snapshot).into_response()
}

fn format_created_at(transaction: &Transaction) -> Option<String> {
    transaction
        .created_at
        .and_then(|created_at| created_at.format(DATE_FORMAT).ok())
}

fn ledger_view(snapshot: &StoreSnapshot) -> Markup {
    let nav_bar = NavBar::new(endpoints::LEDGER_VIEW).into_html();
    let new_transaction_route = endpoints::NEW_TRANSACTION_VIEW;
    let transactions = snapshot.transactions.as_slice();
    let total_lent: f64 = transactions
        .iter()
        .map(|transaction| transaction.amount)
        .sum();
    let loan_count_text = match transactions.len() {
        1 => "1 loan".to_owned(),
        count => format!("{count} loans"),
    };

    let table_row = |transaction: &Transaction| {
        html!(
            tr class=(TABLE_ROW_STYLE)
            {
                td class=(TABLE_CELL_STYLE) { (transaction.lender) }
                td class=(TABLE_CELL_STYLE) { (transaction.borrower) }
                td class="px-6 py-4 text-right" { (format_currency(transaction.amount)) }
                td class=(TABLE_CELL_STYLE)
                {
                    @if let Some(date) = format_created_at(transaction) {
                        time datetime=(date) { (date) }
                    }
                }
            }
        )
    };

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-4 w-full lg:max-w-5xl"
            {
                header class="flex justify-between flex-wrap items-end gap-4"
                {
                    div
                    {
                        h1 class="text-xl font-bold" { "Ledger" }
                        p id="ledger-summary" class="text-sm text-gray-500 dark:text-gray-400"
                        {
                            (loan_count_text) " totalling " (format_currency(total_lent))
                        }
                    }

                    div class="flex gap-4 items-center"
                    {
                        @if snapshot.is_loading {
                            span class="text-sm" { (loading_spinner()) "Refreshing" }
                        }

                        a href=(endpoints::LEDGER_VIEW) class=(BUTTON_SECONDARY_STYLE) { "Refresh" }

                        a href=(new_transaction_route) class=(LINK_STYLE) { "Record a Loan" }
                    }
                }

                @if let Some(error) = &snapshot.last_error {
                    (Alert {
                        message: "Could not load the ledger".to_owned(),
                        details: error.clone(),
                    }.into_html())
                }

                section class="dark:bg-gray-800 w-full overflow-x-auto"
                {
                    table class="w-full text-sm text-left rtl:text-right
                        text-gray-500 dark:text-gray-400"
                    {
                        thead class=(TABLE_HEADER_STYLE)
                        {
                            tr
                            {
                                th scope="col" class=(TABLE_CELL_STYLE) { "Lender" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Borrower" }
                                th scope="col" class="px-6 py-4 text-right" { "Amount" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                            }
                        }

                        tbody
                        {
                            @for transaction in transactions {
                                (table_row(transaction))
                            }

                            @if transactions.is_empty() {
                                tr
                                {
                                    td
                                        colspan="4"
                                        class="px-6 py-4 text-center
                                            text-gray-500 dark:text-gray-400"
                                    {
                                        "No loans recorded yet. "
                                        a href=(new_transaction_route) class=(LINK_STYLE)
                                        {
                                            "Record the first loan"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    );

    base("Ledger", &[], &content)
}
