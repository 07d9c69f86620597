//! Registration page view with username/email/password form.

use dioxus::prelude::*;
use store::{RegisterOutcome, RegisterRequest};
use ui::{use_auth, ErrorBanner};

use crate::Route;

/// Register page component.
#[component]
pub fn Register() -> Element {
    let auth = use_auth();
    let nav = use_navigator();
    let mut username = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut confirm_password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut notice = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    // If already logged in, go to the dashboard
    if auth.session().authenticated_user().is_some() {
        nav.replace(Route::Dashboard {});
    }

    let handle_register = move |evt: FormEvent| {
        evt.prevent_default();
        let auth = auth.clone();
        spawn(async move {
            error.set(None);
            notice.set(None);

            if password() != confirm_password() {
                error.set(Some("Passwords do not match".to_string()));
                return;
            }

            let request = RegisterRequest::new(username(), email(), password());
            loading.set(true);
            let result = auth.register(&request).await;
            loading.set(false);
            match result {
                Ok(RegisterOutcome::Authenticated(_)) => {
                    nav.replace(Route::Dashboard {});
                }
                Ok(RegisterOutcome::LoginRequired) => {
                    password.set(String::new());
                    confirm_password.set(String::new());
                    notice.set(Some("Account created. You can now log in.".to_string()));
                }
                Err(e) => error.set(Some(e.user_message())),
            }
        });
    };

    rsx! {
        div {
            class: "auth-page",

            h1 { "Create account" }

            form {
                onsubmit: handle_register,
                class: "auth-form",

                ErrorBanner { message: error() }

                if let Some(message) = notice() {
                    div {
                        class: "notice",
                        "{message} "
                        Link { to: Route::Login {}, "Log in" }
                    }
                }

                input {
                    r#type: "text",
                    placeholder: "Username",
                    value: username(),
                    oninput: move |evt: FormEvent| username.set(evt.value()),
                }

                input {
                    r#type: "email",
                    placeholder: "Email",
                    value: email(),
                    oninput: move |evt: FormEvent| email.set(evt.value()),
                }

                input {
                    r#type: "password",
                    placeholder: "Password (min 6 characters)",
                    value: password(),
                    oninput: move |evt: FormEvent| password.set(evt.value()),
                }

                input {
                    r#type: "password",
                    placeholder: "Confirm password",
                    value: confirm_password(),
                    oninput: move |evt: FormEvent| confirm_password.set(evt.value()),
                }

                button {
                    r#type: "submit",
                    disabled: loading(),
                    if loading() { "Creating account..." } else { "Register" }
                }
            }

            p {
                "Already registered? "
                Link { to: Route::Login {}, "Log in" }
            }
        }
    }
}
