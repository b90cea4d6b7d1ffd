//! Alerts for telling users that something went wrong.
//!
//! Alerts are either rendered in place on a page, or returned as a fragment
//! that htmx swaps into the `#alert-container` element of the base layout.

use maud::{Markup, html};

/// An error message with a short summary and a longer explanation.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub message: String,
    pub details: String,
}

impl Alert {
    pub fn into_html(self) -> Markup {
        html! {
            div
                role="alert"
                class="flex items-start gap-3 p-4 mb-4 text-red-800 rounded-lg \
                    bg-red-50 dark:bg-gray-800 dark:text-red-400"
            {
                div class="flex-1 text-sm"
                {
                    p class="font-medium" { (self.message) }

                    @if !self.details.is_empty() {
                        p { (self.details) }
                    }
                }

                button
                    type="button"
                    aria-label="Dismiss"
                    onclick="this.closest('[role=alert]').remove()"
                    class="text-sm font-bold"
                {
                    "×"
                }
            }
        }
    }
}
