use dioxus::prelude::*;

use api::ApiClient;
use store::ClientConfig;
use ui::{AuthProvider, NotificationProvider};
use views::{Admin, AppLayout, Dashboard, Landing, Login, Register};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(AppLayout)]
        #[route("/")]
        Landing {},
        #[route("/login")]
        Login {},
        #[route("/register")]
        Register {},
        #[route("/dashboard")]
        Dashboard {},
        #[route("/admin")]
        Admin {},
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

/// Settings compiled into the app; see `store::config` for the format.
const CLIENT_CONFIG: &str = include_str!("../ajali.toml");

fn main() {
    dioxus::logger::initialize_default();
    dioxus::launch(App);
}

/// `AJALI_API_URL`, when set at build time, overrides `[api] base_url`.
fn client_config() -> ClientConfig {
    ClientConfig::resolve(Some(CLIENT_CONFIG), option_env!("AJALI_API_URL"))
}

#[component]
fn App() -> Element {
    let config = use_context_provider(client_config);
    use_context_provider(|| ApiClient::new(&config));

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        AuthProvider {
            NotificationProvider {
                Router::<Route> {}
            }
        }
    }
}
