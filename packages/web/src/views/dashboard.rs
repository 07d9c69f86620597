use api::{ApiClient, Incident};
use dioxus::prelude::*;
use ui::{CreateIncidentForm, ErrorBanner, IncidentList, LoadingSpinner, PrivateRoute};

use super::use_periodic_reload;

#[component]
pub fn Dashboard() -> Element {
    rsx! {
        PrivateRoute {
            IncidentFeed {}
        }
    }
}

/// Report form plus every incident, refetched after each change.
#[component]
fn IncidentFeed() -> Element {
    let client = use_context::<ApiClient>();
    let mut incidents = use_signal(|| Option::<Vec<Incident>>::None);
    let mut error = use_signal(|| Option::<String>::None);
    let mut reload = use_signal(|| 0u32);
    use_periodic_reload(reload);

    let _loader = use_resource(move || {
        let client = client.clone();
        let _ = reload();
        async move {
            match client.list_incidents().await {
                Ok(list) => {
                    incidents.set(Some(list));
                    error.set(None);
                }
                Err(e) => error.set(Some(e.user_message())),
            }
        }
    });

    rsx! {
        div {
            class: "dashboard",
            CreateIncidentForm {
                on_created: move |incident: Incident| {
                    tracing::info!(incident_id = incident.id, "incident created");
                    reload += 1;
                },
            }
            ErrorBanner { message: error() }
            match incidents() {
                Some(list) => rsx! {
                    IncidentList { incidents: list, on_changed: move |_| reload += 1 }
                },
                None => rsx! { LoadingSpinner { label: "Loading incidents..." } },
            }
        }
    }
}
