//! Defines the app level error type and its conversion to HTML alerts.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::alert::Alert;

/// The errors that may occur in the application.
///
/// The [Display](std::fmt::Display) text of each variant is written for
/// people, it is what the transaction store keeps as its last error and what
/// the pages show.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The lender name was empty or only whitespace.
    #[error("Lender name cannot be empty")]
    EmptyLender,

    /// The borrower name was empty or only whitespace.
    #[error("Borrower name cannot be empty")]
    EmptyBorrower,

    /// The amount could not be read as a number.
    #[error("\"{0}\" is not a valid amount")]
    InvalidAmount(String),

    /// The amount was zero or negative.
    ///
    /// A loan always moves a positive amount of money from the lender to the
    /// borrower.
    #[error("Amount must be greater than zero, got {0}")]
    NonPositiveAmount(f64),

    /// The lender and borrower are the same person, ignoring case.
    #[error("Lender and borrower must be different people")]
    SameLenderAndBorrower,

    /// The remote loans API could not be reached or rejected the request for
    /// the transaction list.
    #[error("Could not fetch transactions: {0}")]
    FetchFailed(String),

    /// The remote loans API could not be reached or rejected the request to
    /// create a transaction.
    #[error("Could not create transaction: {0}")]
    CreateFailed(String),
}

impl Error {
    /// Convert the error into an HTTP response with an HTML alert.
    pub fn into_alert_response(self) -> Response {
        let (status_code, alert) = self.into_alert();

        (status_code, alert.into_html()).into_response()
    }

    /// The status code and alert that describe this error to the user.
    pub fn into_alert(self) -> (StatusCode, Alert) {
        match self {
            Error::FetchFailed(reason) => (
                StatusCode::BAD_GATEWAY,
                Alert {
                    message: "Could not load transactions".to_owned(),
                    details: reason,
                },
            ),
            Error::CreateFailed(reason) => (
                StatusCode::BAD_GATEWAY,
                Alert {
                    message: "Could not record the loan".to_owned(),
                    details: format!(
                        "{reason}. Your ledger has not been changed, try submitting the loan again."
                    ),
                },
            ),
            error @ (Error::EmptyLender
            | Error::EmptyBorrower
            | Error::InvalidAmount(_)
            | Error::NonPositiveAmount(_)
            | Error::SameLenderAndBorrower) => (
                StatusCode::BAD_REQUEST,
                Alert {
                    message: "Invalid loan".to_owned(),
                    details: error.to_string(),
                },
            ),
        }
    }
}
