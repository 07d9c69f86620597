use dioxus::prelude::*;

/// Inline error message; renders nothing when `message` is `None`.
#[component]
pub fn ErrorBanner(message: Option<String>) -> Element {
    match message {
        Some(message) => rsx! {
            div { class: "error-banner", role: "alert", "{message}" }
        },
        None => rsx! {},
    }
}
