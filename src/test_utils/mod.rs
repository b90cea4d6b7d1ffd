#![allow(missing_docs)]

pub(crate) mod html;
pub(crate) mod loans_api;

pub(crate) use html::{
    assert_form_error_message, assert_form_input, assert_hx_redirect, assert_valid_html,
    must_get_form, parse_html_document, parse_html_fragment, table_rows,
};
pub(crate) use loans_api::{MockLoansApi, loan};
