//! Route protection components.

use dioxus::prelude::*;
use store::{GuardDecision, RouteGuard};

use crate::auth::use_auth;

/// Renders `children` only for logged-in users; others go to `/login`.
#[component]
pub fn PrivateRoute(children: Element) -> Element {
    guarded(RouteGuard::Authenticated, children)
}

/// Renders `children` only for administrators; others go to `/dashboard`.
#[component]
pub fn AdminRoute(children: Element) -> Element {
    guarded(RouteGuard::Admin, children)
}

fn guarded(guard: RouteGuard, children: Element) -> Element {
    let auth = use_auth();
    let nav = use_navigator();

    match guard.evaluate(&auth.session()) {
        GuardDecision::Loading => rsx! { LoadingSpinner {} },
        GuardDecision::Allow => rsx! { {children} },
        GuardDecision::Deny(target) => {
            nav.replace(target);
            rsx! {}
        }
    }
}

#[component]
pub fn LoadingSpinner(#[props(default = "Loading...".to_string())] label: String) -> Element {
    rsx! {
        div {
            class: "loading",
            div { class: "loading__spinner" }
            span { "{label}" }
        }
    }
}
