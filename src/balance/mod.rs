//! Net balances between everyone in the ledger.

mod aggregate;
mod balances_page;

pub use aggregate::{BalanceMap, aggregate, sorted_balances};
pub use balances_page::get_balances_page;
