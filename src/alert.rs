//! Alert system for displaying success and error messages to users.
//!
//! Alerts render as the `#alert-container` element so that they can replace
//! the empty container in the base page, either as the target of an htmx
//! error response or as an out-of-band swap next to a normal response.

use maud::{Markup, PreEscaped, html};

/// How long success alerts stay on screen.
const SUCCESS_DISMISS_MILLIS: u32 = 2000;

const CONTAINER_STYLE: &str = "w-full max-w-md px-4";
const CONTAINER_POSITION: &str =
    "position: fixed; bottom: 1rem; left: 50%; transform: translateX(-50%); z-index: 9999;";

/// A message to show the user in the alert container.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// A confirmation that disappears by itself.
    Success { message: String },
    /// A failure with an explanation that stays until dismissed.
    Error { message: String, details: String },
}

impl Alert {
    fn is_success(&self) -> bool {
        matches!(self, Alert::Success { .. })
    }

    fn message_and_details(&self) -> (&str, &str) {
        match self {
            Alert::Success { message } => (message.as_str(), ""),
            Alert::Error { message, details } => (message.as_str(), details.as_str()),
        }
    }

    /// Render the alert inside the alert container.
    pub fn into_html(self) -> Markup {
        self.render(false)
    }

    /// Render the alert for an out-of-band swap into the alert container.
    pub fn into_oob_html(self) -> Markup {
        self.render(true)
    }

    fn render(self, out_of_band: bool) -> Markup {
        let is_success = self.is_success();
        let (message, details) = self.message_and_details();
        let alert_style = if is_success {
            "p-4 text-sm text-green-800 rounded-lg bg-green-50 dark:bg-gray-800 \
            dark:text-green-400 border border-green-300 dark:border-green-800 shadow"
        } else {
            "p-4 text-sm text-red-800 rounded-lg bg-red-50 dark:bg-gray-800 \
            dark:text-red-400 border border-red-300 dark:border-red-800 shadow"
        };

        html! {
            div
                id="alert-container"
                hx-swap-oob=[out_of_band.then_some("true")]
                class=(CONTAINER_STYLE)
                style=(CONTAINER_POSITION)
            {
                div role="alert" class=(alert_style)
                {
                    div class="flex justify-between items-start gap-4"
                    {
                        div
                        {
                            p class="font-medium" { (message) }

                            @if !details.is_empty() {
                                p class="mt-1" { (details) }
                            }
                        }

                        button
                            type="button"
                            aria-label="Dismiss"
                            onclick="this.closest('#alert-container').classList.add('hidden')"
                        {
                            "×"
                        }
                    }
                }

                @if is_success {
                    script
                    {
                        (PreEscaped(format!(
                            "(() => {{ const container = document.currentScript.parentElement; \
                            setTimeout(() => container.classList.add('hidden'), {SUCCESS_DISMISS_MILLIS}); }})();"
                        )))
                    }
                }
            }
        }
    }
}
