use dioxus::prelude::*;

use crate::auth::{use_auth, LogoutButton};
use crate::notifications::NotificationBadge;

#[component]
pub fn Navbar() -> Element {
    let auth = use_auth();
    let session = auth.session();

    rsx! {
        nav {
            class: "navbar",
            Link { class: "navbar__brand", to: "/", "Ajali!" }
            div {
                class: "navbar__links",
                match session.authenticated_user() {
                    Some(user) => rsx! {
                        Link { to: "/dashboard", "Dashboard" }
                        if user.is_admin {
                            Link { to: "/admin", "Admin" }
                        }
                        NotificationBadge {}
                        span { class: "navbar__user", "{user.username}" }
                        LogoutButton { class: "navbar__logout" }
                    },
                    None if session.loading => rsx! {},
                    None => rsx! {
                        Link { to: "/login", "Login" }
                        Link { to: "/register", "Register" }
                    },
                }
            }
        }
    }
}
