use api::{ApiClient, Incident, IncidentStatus};
use dioxus::prelude::*;
use ui::{AdminRoute, ErrorBanner, IncidentList, LoadingSpinner, UserManagement};

use super::use_periodic_reload;

#[component]
pub fn Admin() -> Element {
    rsx! {
        AdminRoute {
            AdminPanel {}
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Tab {
    Incidents,
    Users,
}

#[component]
fn AdminPanel() -> Element {
    let mut tab = use_signal(|| Tab::Incidents);

    rsx! {
        div {
            class: "admin",
            h1 { "Administration" }
            nav {
                class: "tabs",
                button {
                    class: tab_class(tab() == Tab::Incidents),
                    onclick: move |_| tab.set(Tab::Incidents),
                    "Incidents"
                }
                button {
                    class: tab_class(tab() == Tab::Users),
                    onclick: move |_| tab.set(Tab::Users),
                    "Users"
                }
            }
            match tab() {
                Tab::Incidents => rsx! { IncidentTriage {} },
                Tab::Users => rsx! { UserManagement {} },
            }
        }
    }
}

fn tab_class(active: bool) -> &'static str {
    if active {
        "tab tab--active"
    } else {
        "tab"
    }
}

/// All incidents with a status filter; status changes go through each card.
#[component]
fn IncidentTriage() -> Element {
    let client = use_context::<ApiClient>();
    let mut incidents = use_signal(|| Option::<Vec<Incident>>::None);
    let mut filter = use_signal(|| Option::<IncidentStatus>::None);
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

    let visible = incidents().map(|list| filter_by_status(list, filter()));

    rsx! {
        ErrorBanner { message: error() }
        select {
            class: "status-filter",
            onchange: move |evt: FormEvent| {
                let value = evt.value();
                filter.set(if value.is_empty() { None } else { Some(IncidentStatus::parse(&value)) });
            },
            option { value: "", "All statuses" }
            for status in IncidentStatus::ALL {
                option { value: status.as_str(), "{status.as_str()}" }
            }
        }
        match visible {
            Some(list) => rsx! {
                IncidentList { incidents: list, on_changed: move |_| reload += 1 }
            },
            None => rsx! { LoadingSpinner { label: "Loading incidents..." } },
        }
    }
}

fn filter_by_status(list: Vec<Incident>, status: Option<IncidentStatus>) -> Vec<Incident> {
    match status {
        Some(status) => list.into_iter().filter(|i| i.status == status).collect(),
        None => list,
    }
}
