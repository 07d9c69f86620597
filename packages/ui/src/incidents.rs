//! Incident widgets: report form, cards, edit form and admin triage.
//!
//! Widgets call the [`ApiClient`] from context and report success through an
//! event handler; the owning view refetches its list in response, so every
//! list shows server state after a mutation.

use api::{
    ApiClient, Attachment, Incident, IncidentId, IncidentStatus, IncidentUpdate, NewIncident,
    ALLOWED_EXTENSIONS,
};
use dioxus::prelude::*;

use crate::auth::use_auth;
use crate::error_banner::ErrorBanner;
use crate::feedback::{CommentSection, ReactionBar, ReviewSection};
use crate::format::{format_timestamp, parse_coordinate};
use crate::icons::{FaLocationDot, FaPenToSquare, FaTrashCan};
use crate::Icon;

#[component]
pub fn IncidentList(incidents: Vec<Incident>, on_changed: EventHandler<()>) -> Element {
    if incidents.is_empty() {
        return rsx! {
            p { class: "incident-list__empty", "No incidents reported yet." }
        };
    }

    rsx! {
        div {
            class: "incident-list",
            for incident in incidents {
                IncidentCard { key: "{incident.id}", incident: incident.clone(), on_changed }
            }
        }
    }
}

#[component]
pub fn IncidentCard(incident: Incident, on_changed: EventHandler<()>) -> Element {
    let client = use_context::<ApiClient>();
    let auth = use_auth();
    let session = auth.session();
    let mut editing = use_signal(|| false);
    let mut error = use_signal(|| Option::<String>::None);

    let id = incident.id;
    let can_modify = session
        .authenticated_user()
        .is_some_and(|user| incident.can_modify(user));

    let media = client.clone();
    let delete = move |_| {
        let client = client.clone();
        async move {
            if !confirm("Delete this incident report?") {
                return;
            }
            match client.delete_incident(id).await {
                Ok(()) => on_changed.call(()),
                Err(e) => error.set(Some(e.user_message())),
            }
        }
    };

    if editing() {
        return rsx! {
            EditIncidentForm {
                incident: incident.clone(),
                on_saved: move |_| {
                    editing.set(false);
                    on_changed.call(());
                },
                on_cancel: move |_| editing.set(false),
            }
        };
    }

    let location = format!("{:.5}, {:.5}", incident.latitude, incident.longitude);
    let rating = incident
        .average_rating()
        .map(|r| format!("{r:.1} / 5"))
        .unwrap_or_else(|| "No ratings".to_string());

    rsx! {
        article {
            class: "incident-card",
            header {
                class: "incident-card__header",
                span { class: status_class(incident.status), "{incident.status.as_str()}" }
                small { "{incident.reporter()} · {format_timestamp(&incident.created_at)}" }
            }
            p { class: "incident-card__description", "{incident.description}" }
            p {
                class: "incident-card__location",
                Icon { icon: FaLocationDot, width: 12, height: 12 }
                " {location}"
            }
            small { class: "incident-card__status-help", "{incident.status.describe()}" }

            div {
                class: "incident-card__media",
                for image in incident.images.iter() {
                    img { key: "img-{image.id}", src: media.upload_url(&image.url), alt: "Incident photo" }
                }
                for video in incident.videos.iter() {
                    video { key: "vid-{video.id}", src: media.upload_url(&video.url), controls: true }
                }
            }

            ErrorBanner { message: error() }

            div {
                class: "incident-card__actions",
                ReactionBar { incident: incident.clone(), on_changed }
                span { class: "incident-card__rating", "{rating}" }
                if session.is_admin() {
                    StatusSelect { incident_id: id, status: incident.status, on_changed }
                }
                if can_modify {
                    button {
                        title: "Edit",
                        onclick: move |_| editing.set(true),
                        Icon { icon: FaPenToSquare, width: 14, height: 14 }
                    }
                    button {
                        title: "Delete",
                        onclick: delete,
                        Icon { icon: FaTrashCan, width: 14, height: 14 }
                    }
                }
            }

            CommentSection { incident_id: id, comments: incident.comments.clone(), on_changed }
            ReviewSection { incident_id: id, reviews: incident.reviews.clone(), on_changed }
        }
    }
}

/// Administrator triage control.
#[component]
pub fn StatusSelect(
    incident_id: IncidentId,
    status: IncidentStatus,
    on_changed: EventHandler<()>,
) -> Element {
    let client = use_context::<ApiClient>();
    let mut error = use_signal(|| Option::<String>::None);

    let onchange = move |evt: FormEvent| {
        let client = client.clone();
        async move {
            let next = IncidentStatus::parse(&evt.value());
            match client.update_incident_status(incident_id, next).await {
                Ok(_) => {
                    error.set(None);
                    on_changed.call(());
                }
                Err(e) => error.set(Some(e.user_message())),
            }
        }
    };

    rsx! {
        select {
            class: "status-select",
            value: status.as_str(),
            onchange: onchange,
            for choice in IncidentStatus::ALL {
                option {
                    value: choice.as_str(),
                    selected: choice == status,
                    "{choice.as_str()}"
                }
            }
        }
        ErrorBanner { message: error() }
    }
}

#[component]
pub fn CreateIncidentForm(on_created: EventHandler<Incident>) -> Element {
    let client = use_context::<ApiClient>();
    let mut description = use_signal(String::new);
    let mut latitude = use_signal(String::new);
    let mut longitude = use_signal(String::new);
    let mut attachments = use_signal(Vec::<Attachment>::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut submitting = use_signal(|| false);

    let pick_files = move |evt: FormEvent| async move {
        let mut picked = Vec::new();
        for file in evt.files() {
            let name = file.name();
            let bytes = match file.read_bytes().await {
                Ok(bytes) => bytes,
                Err(e) => {
                    error.set(Some(format!("Could not read {name}: {e}")));
                    return;
                }
            };
            match Attachment::new(name, bytes.to_vec()) {
                Ok(attachment) => picked.push(attachment),
                Err(e) => {
                    error.set(Some(e.user_message()));
                    return;
                }
            }
        }
        error.set(None);
        attachments.set(picked);
    };

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        let client = client.clone();
        async move {
            let report = NewIncident {
                description: description(),
                latitude: parse_coordinate(&latitude()),
                longitude: parse_coordinate(&longitude()),
                attachments: attachments(),
            };
            submitting.set(true);
            match client.create_incident(&report).await {
                Ok(incident) => {
                    description.set(String::new());
                    latitude.set(String::new());
                    longitude.set(String::new());
                    attachments.set(Vec::new());
                    error.set(None);
                    on_created.call(incident);
                }
                Err(e) => error.set(Some(e.user_message())),
            }
            submitting.set(false);
        }
    };

    let accept = ALLOWED_EXTENSIONS
        .iter()
        .map(|ext| format!(".{ext}"))
        .collect::<Vec<_>>()
        .join(",");

    rsx! {
        form {
            class: "incident-form",
            onsubmit: submit,
            h2 { "Report an incident" }
            ErrorBanner { message: error() }
            textarea {
                placeholder: "What happened?",
                value: description(),
                oninput: move |evt: FormEvent| description.set(evt.value()),
            }
            div {
                class: "incident-form__location",
                input {
                    r#type: "text",
                    inputmode: "decimal",
                    placeholder: "Latitude",
                    value: latitude(),
                    oninput: move |evt: FormEvent| latitude.set(evt.value()),
                }
                input {
                    r#type: "text",
                    inputmode: "decimal",
                    placeholder: "Longitude",
                    value: longitude(),
                    oninput: move |evt: FormEvent| longitude.set(evt.value()),
                }
            }
            input {
                r#type: "file",
                multiple: true,
                accept: "{accept}",
                onchange: pick_files,
            }
            if !attachments().is_empty() {
                ul {
                    class: "incident-form__files",
                    for attachment in attachments() {
                        li { key: "{attachment.file_name}", "{attachment.file_name}" }
                    }
                }
            }
            button {
                r#type: "submit",
                disabled: submitting(),
                if submitting() { "Submitting..." } else { "Submit report" }
            }
        }
    }
}

#[component]
pub fn EditIncidentForm(
    incident: Incident,
    on_saved: EventHandler<Incident>,
    on_cancel: EventHandler<()>,
) -> Element {
    let client = use_context::<ApiClient>();
    let original = incident.clone();
    let mut description = use_signal(|| incident.description.clone());
    let mut latitude = use_signal(|| incident.latitude.to_string());
    let mut longitude = use_signal(|| incident.longitude.to_string());
    let mut error = use_signal(|| Option::<String>::None);

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        let client = client.clone();
        let original = original.clone();
        async move {
            let update = match changes(&original, &description(), &latitude(), &longitude()) {
                Ok(update) => update,
                Err(message) => {
                    error.set(Some(message));
                    return;
                }
            };
            if update == IncidentUpdate::default() {
                on_cancel.call(());
                return;
            }
            match client.update_incident(original.id, &update).await {
                Ok(incident) => on_saved.call(incident),
                Err(e) => error.set(Some(e.user_message())),
            }
        }
    };

    rsx! {
        form {
            class: "incident-form incident-form--edit",
            onsubmit: submit,
            ErrorBanner { message: error() }
            textarea {
                value: description(),
                oninput: move |evt: FormEvent| description.set(evt.value()),
            }
            div {
                class: "incident-form__location",
                input {
                    r#type: "text",
                    value: latitude(),
                    oninput: move |evt: FormEvent| latitude.set(evt.value()),
                }
                input {
                    r#type: "text",
                    value: longitude(),
                    oninput: move |evt: FormEvent| longitude.set(evt.value()),
                }
            }
            div {
                class: "incident-form__buttons",
                button { r#type: "submit", "Save" }
                button { r#type: "button", onclick: move |_| on_cancel.call(()), "Cancel" }
            }
        }
    }
}

fn status_class(status: IncidentStatus) -> &'static str {
    match status {
        IncidentStatus::Pending => "status status--pending",
        IncidentStatus::UnderInvestigation => "status status--investigating",
        IncidentStatus::Rejected => "status status--rejected",
        IncidentStatus::Resolved => "status status--resolved",
        IncidentStatus::Unknown => "status",
    }
}

/// Build an update carrying only the fields the user changed.
fn changes(
    original: &Incident,
    description: &str,
    latitude: &str,
    longitude: &str,
) -> Result<IncidentUpdate, String> {
    let (Some(lat), Some(lon)) = (parse_coordinate(latitude), parse_coordinate(longitude)) else {
        return Err("Latitude and longitude must be numbers".to_string());
    };

    let mut update = IncidentUpdate::default();
    if description.trim() != original.description {
        update.description = Some(description.trim().to_string());
    }
    if lat != original.latitude || lon != original.longitude {
        update.latitude = Some(lat);
        update.longitude = Some(lon);
    }
    Ok(update)
}

#[cfg(target_arch = "wasm32")]
fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

#[cfg(not(target_arch = "wasm32"))]
fn confirm(_message: &str) -> bool {
    true
}
