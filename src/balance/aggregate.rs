//! Folds a list of loans into one signed balance per person.

use std::collections::HashMap;

use crate::transaction::Transaction;

/// Net balance per person, keyed by the trimmed name.
///
/// A positive balance means the person owes money overall, a negative balance
/// means they are owed money overall.
pub type BalanceMap = HashMap<String, f64>;

/// Compute each person's net balance from `transactions`.
///
/// Every lender and borrower gets an entry, even if their balance works out to
/// zero. Names are trimmed but otherwise compared exactly, so "bob" and "Bob"
/// are different people here.
pub fn aggregate(transactions: &[Transaction]) -> BalanceMap {
    let mut balances = BalanceMap::new();

    for transaction in transactions {
        *balances
            .entry(transaction.lender.trim().to_owned())
            .or_insert(0.0) -= transaction.amount;
        *balances
            .entry(transaction.borrower.trim().to_owned())
            .or_insert(0.0) += transaction.amount;
    }

    balances
}

/// The balances ordered by name.
pub fn sorted_balances(balances: &BalanceMap) -> Vec<(&str, f64)> {
    let mut sorted: Vec<(&str, f64)> = balances
        .iter()
        .map(|(name, balance)| (name.as_str(), *balance))
        .collect();
    sorted.sort_by(|(a, _), (b, _)| a.cmp(b));

    sorted
}
