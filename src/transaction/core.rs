//! Defines the loan records shown in the ledger and the validated request for
//! recording a new loan.

use std::fmt::Display;

use serde::{Deserialize, Deserializer, Serialize};
use time::OffsetDateTime;

use crate::Error;

// ============================================================================
// MODELS
// ============================================================================

/// The identifier the loans service assigns to a transaction.
///
/// It is opaque to the frontend: it is only ever compared and displayed.
/// Numeric IDs from the loans service are kept as their JSON text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl<'de> Deserialize<'de> for TransactionId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(id) => Self(id),
            RawId::Number(id) => Self(id.to_string()),
        })
    }
}

impl TransactionId {
    /// Wrap an ID from the loans service.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl AsRef<str> for TransactionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A loan of `amount` dollars from `lender` to `borrower`.
///
/// Transactions are created by the loans service and never modified by the
/// frontend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The ID assigned by the loans service.
    pub id: TransactionId,
    /// The person who is owed money.
    pub lender: String,
    /// The person who owes money.
    pub borrower: String,
    /// The amount of money lent in dollars.
    pub amount: f64,
    /// When the loan was recorded, if the loans service reports it.
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<OffsetDateTime>,
}

/// The request body for recording a new loan.
///
/// A `NewTransaction` can only be created through [NewTransaction::new] or
/// [NewTransaction::parse], so holding one means the loan has passed
/// validation:
/// - both names are non-empty after trimming whitespace,
/// - the amount is a finite number greater than zero,
/// - the lender and borrower differ when compared ignoring case.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTransaction {
    lender: String,
    borrower: String,
    amount: f64,
}

impl NewTransaction {
    /// Validate a new loan.
    ///
    /// Surrounding whitespace is trimmed from both names.
    ///
    /// # Errors
    ///
    /// Returns the first rule the loan breaks, checked in the order
    /// [Error::EmptyLender], [Error::EmptyBorrower], [Error::InvalidAmount]
    /// (for NaN or infinite amounts), [Error::NonPositiveAmount] and
    /// [Error::SameLenderAndBorrower].
    pub fn new(lender: &str, borrower: &str, amount: f64) -> Result<Self, Error> {
        let lender = lender.trim();
        let borrower = borrower.trim();

        if lender.is_empty() {
            return Err(Error::EmptyLender);
        }

        if borrower.is_empty() {
            return Err(Error::EmptyBorrower);
        }

        if !amount.is_finite() {
            return Err(Error::InvalidAmount(amount.to_string()));
        }

        if amount <= 0.0 {
            return Err(Error::NonPositiveAmount(amount));
        }

        if lender.to_lowercase() == borrower.to_lowercase() {
            return Err(Error::SameLenderAndBorrower);
        }

        Ok(Self {
            lender: lender.to_owned(),
            borrower: borrower.to_owned(),
            amount,
        })
    }

    /// Validate a new loan where the amount is text entered by a person.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidAmount] if `amount` is not a number, otherwise
    /// the same errors as [NewTransaction::new].
    pub fn parse(lender: &str, borrower: &str, amount: &str) -> Result<Self, Error> {
        if lender.trim().is_empty() {
            return Err(Error::EmptyLender);
        }

        if borrower.trim().is_empty() {
            return Err(Error::EmptyBorrower);
        }

        let amount_text = amount.trim();
        let amount: f64 = amount_text
            .parse()
            .map_err(|_| Error::InvalidAmount(amount_text.to_owned()))?;

        if !amount.is_finite() {
            return Err(Error::InvalidAmount(amount_text.to_owned()));
        }

        Self::new(lender, borrower, amount)
    }

    /// The trimmed name of the person lending the money.
    pub fn lender(&self) -> &str {
        &self.lender
    }

    /// The trimmed name of the person borrowing the money.
    pub fn borrower(&self) -> &str {
        &self.borrower
    }

    /// The amount lent in dollars, always greater than zero.
    pub fn amount(&self) -> f64 {
        self.amount
    }
}
