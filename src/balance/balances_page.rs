//! The page summarising who owes whom.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    alert::Alert,
    balance::{aggregate, sorted_balances},
    endpoints,
    html::{
        LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE,
        base, format_currency,
    },
    navigation::NavBar,
    transaction::{StoreSnapshot, TransactionState},
};

/// Balances closer to zero than half a cent are shown as settled.
const SETTLED_TOLERANCE: f64 = 0.005;

/// Reload the transactions from the loans service and render everyone's net
/// balance.
pub async fn get_balances_page(State(state): State<TransactionState>) -> Response {
    let store = &state.transaction_store;
    let _ = store.load().await;
    let snapshot = store.snapshot().await;

    balances_view(&snapshot).into_response()
}

fn balance_status(balance: f64) -> (&'static str, &'static str) {
    if balance.abs() < SETTLED_TOLERANCE {
        ("Settled", "text-gray-500 dark:text-gray-400")
    } else if balance > 0.0 {
        ("Owes", "text-red-600 dark:text-red-400")
    } else {
        ("Is owed", "text-green-600 dark:text-green-400")
    }
}

fn balances_view(snapshot: &StoreSnapshot) -> Markup {
    let nav_bar = NavBar::new(endpoints::BALANCES_VIEW).into_html();
    let balances = aggregate(&snapshot.transactions);
    let balances = sorted_balances(&balances);

    let table_row = |name: &str, balance: f64| {
        let (status, status_style) = balance_status(balance);
        let balance = if balance.abs() < SETTLED_TOLERANCE {
            0.0
        } else {
            balance
        };

        html!(
            tr class=(TABLE_ROW_STYLE)
            {
                th scope="row" class="px-6 py-4 font-medium text-gray-900 dark:text-white"
                {
                    (name)
                }
                td class="px-6 py-4 text-right" { (format_currency(balance)) }
                td class=(TABLE_CELL_STYLE)
                {
                    span class=(status_style) { (status) }
                }
            }
        )
    };

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-4 w-full lg:max-w-3xl"
            {
                header
                {
                    h1 class="text-xl font-bold" { "Balances" }
                    p class="text-sm text-gray-500 dark:text-gray-400"
                    {
                        "A positive balance is what that person owes, a negative balance is what they are owed."
                    }
                }

                @if let Some(error) = &snapshot.last_error {
                    (Alert {
                        message: "Could not load the balances".to_owned(),
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
                                th scope="col" class=(TABLE_CELL_STYLE) { "Person" }
                                th scope="col" class="px-6 py-4 text-right" { "Balance" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Status" }
                            }
                        }

                        tbody
                        {
                            @for &(name, balance) in &balances {
                                (table_row(name, balance))
                            }

                            @if balances.is_empty() {
                                tr
                                {
                                    td
                                        colspan="3"
                                        class="px-6 py-4 text-center
                                            text-gray-500 dark:text-gray-400"
                                    {
                                        "Nobody owes anything yet. "
                                        a href=(endpoints::NEW_TRANSACTION_VIEW) class=(LINK_STYLE)
                                        {
                                            "Record a loan"
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

    base("Balances", &[], &content)
}
