use dioxus::prelude::*;
use ui::use_auth;

use crate::Route;

#[component]
pub fn Landing() -> Element {
    let auth = use_auth();
    let signed_in = auth.session().authenticated_user().is_some();

    rsx! {
        section {
            class: "hero",
            h1 { "Ajali!" }
            p {
                "Report accidents and emergencies with their exact location, photos and video, "
                "so responders and your community know what is happening."
            }
            div {
                class: "hero__actions",
                if signed_in {
                    Link { class: "button", to: Route::Dashboard {}, "Go to dashboard" }
                } else {
                    Link { class: "button", to: Route::Register {}, "Create an account" }
                    Link { class: "button button--secondary", to: Route::Login {}, "Log in" }
                }
            }
        }
    }
}
