//! The endpoint URIs served by the frontend.

/// The root route which redirects to the ledger.
pub const ROOT: &str = "/";
/// The page listing every loan.
pub const LEDGER_VIEW: &str = "/transactions";
/// The page for recording a new loan.
pub const NEW_TRANSACTION_VIEW: &str = "/transactions/new";
/// The page summarising who owes whom.
pub const BALANCES_VIEW: &str = "/balances";

/// The route for submitting a new loan.
pub const TRANSACTIONS_API: &str = "/api/transactions";
