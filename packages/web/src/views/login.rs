//! Login page view with email/password form.

use dioxus::prelude::*;
use ui::{use_auth, ErrorBanner};

use crate::Route;

/// Login page component.
#[component]
pub fn Login() -> Element {
    let auth = use_auth();
    let nav = use_navigator();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    // If already logged in, go to the dashboard
    if auth.session().authenticated_user().is_some() {
        nav.replace(Route::Dashboard {});
    }

    let handle_login = move |evt: FormEvent| {
        evt.prevent_default();
        let auth = auth.clone();
        spawn(async move {
            error.set(None);

            let e = email().trim().to_string();
            let p = password();
            if e.is_empty() || p.is_empty() {
                error.set(Some("Email and password are required".to_string()));
                return;
            }

            loading.set(true);
            match auth.login(&e, &p).await {
                Ok(user) => {
                    tracing::info!(user_id = user.id, "logged in");
                    nav.replace(Route::Dashboard {});
                }
                Err(e) => {
                    loading.set(false);
                    error.set(Some(e.user_message()));
                }
            }
        });
    };

    rsx! {
        div {
            class: "auth-page",

            h1 { "Log in" }

            form {
                onsubmit: handle_login,
                class: "auth-form",

                ErrorBanner { message: error() }

                input {
                    r#type: "email",
                    placeholder: "Email",
                    value: email(),
                    oninput: move |evt: FormEvent| email.set(evt.value()),
                }

                input {
                    r#type: "password",
                    placeholder: "Password",
                    value: password(),
                    oninput: move |evt: FormEvent| password.set(evt.value()),
                }

                button {
                    r#type: "submit",
                    disabled: loading(),
                    if loading() { "Logging in..." } else { "Log in" }
                }
            }

            p {
                "No account yet? "
                Link { to: Route::Register {}, "Register" }
            }
        }
    }
}
