//! Alert system for displaying success and error messages to users.
//!
//! Alerts are rendered into the fixed alert container in the page shell via
//! an out-of-band swap, or inline when a form re-renders with an error.

use maud::{Markup, html};

/// Alert message types for styling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertType {
    /// A green "it worked" notice.
    Success,
    /// A red non-fatal error notice.
    Error,
}

/// Renders alert messages with appropriate styling
#[derive(Debug, Clone)]
pub struct AlertTemplate {
    alert_type: AlertType,
    message: String,
    details: String,
}

impl AlertTemplate {
    /// Create a new success alert
    pub fn success(message: &str, details: &str) -> Self {
        Self {
            alert_type: AlertType::Success,
            message: message.to_owned(),
            details: details.to_owned(),
        }
    }

    /// Create a new error alert
    pub fn error(message: &str, details: &str) -> Self {
        Self {
            alert_type: AlertType::Error,
            message: message.to_owned(),
            details: details.to_owned(),
        }
    }

    /// Render the alert as markup.
    pub fn into_html(self) -> Markup {
        let container_style = match self.alert_type {
            AlertType::Success => {
                "flex items-start gap-3 p-4 mb-4 rounded-lg border \
                border-green-300 bg-green-50 text-green-800 \
                dark:border-green-800 dark:bg-gray-800 dark:text-green-400"
            }
            AlertType::Error => {
                "flex items-start gap-3 p-4 mb-4 rounded-lg border \
                border-red-300 bg-red-50 text-red-800 \
                dark:border-red-800 dark:bg-gray-800 dark:text-red-400"
            }
        };

        html! {
            div class=(container_style) role="alert" {
                div {
                    p class="font-medium" { (self.message) }

                    @if !self.details.is_empty() {
                        p class="text-sm" { (self.details) }
                    }
                }
            }
        }
    }

    /// Render the alert wrapped for an out-of-band swap into the page's
    /// alert container.
    pub fn into_oob_html(self) -> Markup {
        html! {
            div id="alert-container" hx-swap-oob="innerHTML" {
                (self.into_html())
            }
        }
    }
}
