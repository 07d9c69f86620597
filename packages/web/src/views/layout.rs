use dioxus::prelude::*;
use ui::Navbar;

use crate::Route;

#[component]
pub fn AppLayout() -> Element {
    rsx! {
        Navbar {}
        main {
            class: "page",
            Outlet::<Route> {}
        }
    }
}
