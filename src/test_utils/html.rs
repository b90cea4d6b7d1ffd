use axum::{body::Body, response::Response};
use scraper::{ElementRef, Html, Selector};

async fn response_text(response: Response<Body>) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Could not get response body");

    String::from_utf8_lossy(&body).to_string()
}

pub(crate) async fn parse_html_document(response: Response<Body>) -> Html {
    Html::parse_document(&response_text(response).await)
}

pub(crate) async fn parse_html_fragment(response: Response<Body>) -> Html {
    Html::parse_fragment(&response_text(response).await)
}

#[track_caller]
pub(crate) fn assert_valid_html(html: &Html) {
    assert!(
        html.errors.is_empty(),
        "Got HTML parsing errors: {:?}",
        html.errors
    );
}

#[track_caller]
pub(crate) fn assert_hx_redirect(response: &Response<Body>, endpoint: &str) {
    let location = response
        .headers()
        .get("hx-redirect")
        .expect("expected response to have the header hx-redirect");

    assert_eq!(
        location, endpoint,
        "got redirect to {location:?}, want redirect to {endpoint}"
    );
}

#[track_caller]
pub(crate) fn must_get_form(html: &Html) -> ElementRef<'_> {
    html.select(&Selector::parse("form").unwrap())
        .next()
        .expect("No form found")
}

/// Assert that `form` has a required input called `name` of type `type_`
/// with the value `value`.
#[track_caller]
pub(crate) fn assert_form_input(form: &ElementRef<'_>, name: &str, type_: &str, value: &str) {
    let selector = Selector::parse(&format!("input[name={name}]")).unwrap();
    let input = form
        .select(&selector)
        .next()
        .unwrap_or_else(|| panic!("No input found with name \"{name}\""));

    let input_type = input.value().attr("type").unwrap_or_default();
    assert_eq!(
        input_type, type_,
        "want input {name} with type \"{type_}\", got {input_type:?}"
    );

    let input_value = input.value().attr("value").unwrap_or_default();
    assert_eq!(
        input_value, value,
        "want input {name} with value \"{value}\", got {input_value:?}"
    );

    assert!(
        input.value().attr("required").is_some(),
        "want input with name {name} to have the required attribute but got none"
    );
}

#[track_caller]
pub(crate) fn assert_form_error_message(form: &ElementRef<'_>, want_error_message: &str) {
    let error_message = form
        .select(&Selector::parse("p.form-error").unwrap())
        .next()
        .expect("No error message found")
        .text()
        .collect::<String>();

    assert_eq!(want_error_message, error_message.trim());
}

/// The trimmed text of each cell, for every row in the body of the first table.
pub(crate) fn table_rows(html: &Html) -> Vec<Vec<String>> {
    let row_selector = Selector::parse("table tbody tr").unwrap();
    let cell_selector = Selector::parse("th, td").unwrap();

    html.select(&row_selector)
        .map(|row| {
            row.select(&cell_selector)
                .map(|cell| cell.text().collect::<String>().trim().to_owned())
                .collect()
        })
        .collect()
}
