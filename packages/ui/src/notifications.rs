//! Notification polling bound to the session, plus the bell and dropdown.

use api::ApiClient;
use dioxus::prelude::*;
use store::{
    ClientConfig, ClientError, NotificationCenter, NotificationId, NotificationKind,
    NotificationState, UserId,
};

use crate::auth::use_auth;
use crate::error_banner::ErrorBanner;
use crate::format::format_timestamp;
use crate::icons::FaBell;
use crate::Icon;

/// Poller plus the signal the bell and dropdown render from.
#[derive(Clone)]
pub struct NotificationContext {
    center: NotificationCenter<ApiClient>,
    state: Signal<NotificationState>,
}

impl NotificationContext {
    pub fn state(&self) -> NotificationState {
        (self.state)()
    }

    pub async fn mark_as_read(&self, id: NotificationId) -> Result<(), ClientError> {
        let result = self.center.mark_as_read(id).await;
        let mut state = self.state;
        state.set(self.center.state());
        result
    }
}

pub fn use_notifications() -> NotificationContext {
    use_context::<NotificationContext>()
}

/// Starts polling when a user is logged in and stops it (clearing the cache)
/// on logout. Must sit inside [`AuthProvider`](crate::AuthProvider).
#[component]
pub fn NotificationProvider(children: Element) -> Element {
    let client = use_context::<ApiClient>();
    let config = use_context::<ClientConfig>();
    let auth = use_auth();
    let state = use_signal(NotificationState::default);
    let ctx = use_context_provider(|| NotificationContext {
        center: NotificationCenter::new(client, &config.notifications),
        state,
    });
    let mut polling_for = use_signal(|| Option::<UserId>::None);

    let session = auth.signal();
    let center = ctx.center.clone();
    use_effect(move || {
        let session = session();
        if session.loading {
            return;
        }
        let user_id = session.user.as_ref().map(|u| u.id);
        if *polling_for.peek() == user_id {
            return;
        }
        polling_for.set(user_id);

        // A different user must not see the previous user's cache.
        center.clear();
        let mut state = state;
        match center.start(&session) {
            Some(handle) => {
                let center = center.clone();
                spawn(async move {
                    center
                        .run(handle, move |snapshot| state.set(snapshot.clone()))
                        .await;
                });
            }
            None => state.set(NotificationState::default()),
        }
    });

    let center = ctx.center.clone();
    use_drop(move || center.stop());

    rsx! {
        {children}
    }
}

/// Bell icon with the unread count; toggles the dropdown.
#[component]
pub fn NotificationBadge() -> Element {
    let notifications = use_notifications();
    let mut open = use_signal(|| false);
    let unread = notifications.state().unread_count();

    rsx! {
        div {
            class: "notification-bell",
            button {
                class: "notification-bell__button",
                title: "Notifications",
                onclick: move |_| open.toggle(),
                Icon { icon: FaBell, width: 16, height: 16 }
                if unread > 0 {
                    span { class: "notification-bell__count", "{unread}" }
                }
            }
            if open() {
                NotificationDropdown {}
            }
        }
    }
}

/// List of cached notifications, newest last as received.
#[component]
pub fn NotificationDropdown() -> Element {
    let notifications = use_notifications();
    let state = notifications.state();
    let mut error = use_signal(|| Option::<String>::None);

    rsx! {
        div {
            class: "notification-dropdown",
            if state.last_error.is_some() {
                div { class: "notification-dropdown__stale", "Could not refresh notifications." }
            }
            ErrorBanner { message: error() }
            if state.items.is_empty() {
                p { class: "notification-dropdown__empty", "No notifications" }
            }
            for record in state.items.iter().cloned() {
                div {
                    key: "{record.id}",
                    class: notification_class(record.read),
                    span { class: "notification__kind {kind_class(record.kind)}" }
                    div {
                        class: "notification__body",
                        p { "{record.message}" }
                        small { "{format_timestamp(&record.created_at)}" }
                    }
                    if !record.read {
                        button {
                            class: "notification__mark",
                            onclick: {
                                let notifications = notifications.clone();
                                move |_| {
                                    let notifications = notifications.clone();
                                    async move {
                                        match notifications.mark_as_read(record.id).await {
                                            Ok(()) => error.set(None),
                                            Err(e) => error.set(Some(e.user_message())),
                                        }
                                    }
                                }
                            },
                            "Mark as read"
                        }
                    }
                }
            }
        }
    }
}

fn notification_class(read: bool) -> &'static str {
    if read {
        "notification notification--read"
    } else {
        "notification"
    }
}

fn kind_class(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::Success => "notification__kind--success",
        NotificationKind::Warning => "notification__kind--warning",
        NotificationKind::Error => "notification__kind--error",
        NotificationKind::Info | NotificationKind::Other => "notification__kind--info",
    }
}
