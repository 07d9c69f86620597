//! Administrator user management table.

use api::{ApiClient, User, UserId};
use dioxus::prelude::*;

use crate::auth::use_auth;
use crate::error_banner::ErrorBanner;
use crate::guards::LoadingSpinner;

#[derive(Clone, Copy, Debug, PartialEq)]
enum UserAction {
    Ban(bool),
    Admin(bool),
    Delete,
}

#[component]
pub fn UserManagement() -> Element {
    let client = use_context::<ApiClient>();
    let auth = use_auth();
    let me = auth.session().user.map(|u| u.id);
    let mut users = use_signal(|| Option::<Vec<User>>::None);
    let mut error = use_signal(|| Option::<String>::None);
    let mut reload = use_signal(|| 0u32);

    let loader = client.clone();
    let _loader = use_resource(move || {
        let client = loader.clone();
        // Re-run whenever an action bumps the counter
        let _ = reload();
        async move {
            match client.list_users().await {
                Ok(list) => users.set(Some(list)),
                Err(e) => error.set(Some(e.user_message())),
            }
        }
    });

    let act = move |id: UserId, action: UserAction| {
        let client = client.clone();
        async move {
            let result = match action {
                UserAction::Ban(banned) => client.set_banned(id, banned).await.map(|_| ()),
                UserAction::Admin(admin) => client.set_admin(id, admin).await.map(|_| ()),
                UserAction::Delete => client.delete_user(id).await,
            };
            match result {
                Ok(()) => {
                    error.set(None);
                    reload += 1;
                }
                Err(e) => error.set(Some(e.user_message())),
            }
        }
    };

    let Some(list) = users() else {
        return rsx! {
            ErrorBanner { message: error() }
            LoadingSpinner { label: "Loading users..." }
        };
    };

    rsx! {
        section {
            class: "user-management",
            h2 { "Users" }
            ErrorBanner { message: error() }
            table {
                thead {
                    tr {
                        th { "Username" }
                        th { "Email" }
                        th { "Role" }
                        th { "Status" }
                        th { "" }
                    }
                }
                tbody {
                    for user in list {
                        tr {
                            key: "{user.id}",
                            td { "{user.username}" }
                            td { "{user.email}" }
                            td { if user.is_admin { "admin" } else { "user" } }
                            td { if user.is_banned { "banned" } else { "active" } }
                            td {
                                // Administrators cannot demote, ban or delete themselves.
                                if Some(user.id) != me {
                                    button {
                                        onclick: {
                                            let act = act.clone();
                                            move |_| act(user.id, UserAction::Ban(!user.is_banned))
                                        },
                                        if user.is_banned { "Unban" } else { "Ban" }
                                    }
                                    button {
                                        onclick: {
                                            let act = act.clone();
                                            move |_| act(user.id, UserAction::Admin(!user.is_admin))
                                        },
                                        if user.is_admin { "Revoke admin" } else { "Make admin" }
                                    }
                                    button {
                                        class: "danger",
                                        onclick: {
                                            let act = act.clone();
                                            move |_| act(user.id, UserAction::Delete)
                                        },
                                        "Delete"
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
