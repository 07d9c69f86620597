use api::{ApiClient, Comment, Incident, IncidentId, NewReview, ReactionType, Review};
use dioxus::prelude::*;

use crate::auth::use_auth;
use crate::error_banner::ErrorBanner;
use crate::format::format_timestamp;
use crate::icons::{FaShareNodes, FaStar, FaThumbsUp, FaTrashCan};
use crate::Icon;

/// Like is a toggle for the current user; share always adds.
#[component]
pub fn ReactionBar(incident: Incident, on_changed: EventHandler<()>) -> Element {
    let client = use_context::<ApiClient>();
    let mut error = use_signal(|| Option::<String>::None);
    let counts = incident.reactions;
    let liked = incident.has_reacted(ReactionType::Like);
    let like_title = if liked { "Unlike" } else { "Like" };

    let react = move |reaction: ReactionType| {
        let client = client.clone();
        let incident = incident.clone();
        async move {
            match client.toggle_reaction(&incident, reaction).await {
                Ok(_) => {
                    error.set(None);
                    on_changed.call(());
                }
                Err(e) => error.set(Some(e.user_message())),
            }
        }
    };

    let like = react.clone();
    rsx! {
        div {
            class: "reaction-bar",
            button {
                class: like_class(liked),
                title: like_title,
                onclick: move |_| like(ReactionType::Like),
                Icon { icon: FaThumbsUp, width: 14, height: 14 }
                " {counts.get(ReactionType::Like)}"
            }
            button {
                title: "Share",
                onclick: move |_| react(ReactionType::Share),
                Icon { icon: FaShareNodes, width: 14, height: 14 }
                " {counts.get(ReactionType::Share)}"
            }
            ErrorBanner { message: error() }
        }
    }
}

#[component]
pub fn CommentSection(
    incident_id: IncidentId,
    comments: Vec<Comment>,
    on_changed: EventHandler<()>,
) -> Element {
    let client = use_context::<ApiClient>();
    let auth = use_auth();
    let session = auth.session();
    let mut draft = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);

    let post = {
        let client = client.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            let client = client.clone();
            async move {
                match client.create_comment(incident_id, &draft()).await {
                    Ok(_) => {
                        draft.set(String::new());
                        error.set(None);
                        on_changed.call(());
                    }
                    Err(e) => error.set(Some(e.user_message())),
                }
            }
        }
    };

    let remove = move |comment_id: i64| {
        let client = client.clone();
        async move {
            match client.delete_comment(incident_id, comment_id).await {
                Ok(()) => on_changed.call(()),
                Err(e) => error.set(Some(e.user_message())),
            }
        }
    };

    rsx! {
        section {
            class: "comments",
            h4 { "Comments ({comments.len()})" }
            for comment in comments.iter().cloned() {
                div {
                    key: "{comment.id}",
                    class: "comment",
                    strong { {comment.user.as_ref().map(|u| u.username.clone()).unwrap_or_default()} }
                    small { " {format_timestamp(&comment.created_at)}" }
                    p { "{comment.content}" }
                    if owns(&session, comment.user.as_ref()) {
                        button {
                            title: "Delete comment",
                            onclick: {
                                let remove = remove.clone();
                                move |_| remove(comment.id)
                            },
                            Icon { icon: FaTrashCan, width: 12, height: 12 }
                        }
                    }
                }
            }
            ErrorBanner { message: error() }
            if session.authenticated_user().is_some() {
                form {
                    class: "comments__form",
                    onsubmit: post,
                    input {
                        r#type: "text",
                        placeholder: "Add a comment",
                        value: draft(),
                        oninput: move |evt: FormEvent| draft.set(evt.value()),
                    }
                    button { r#type: "submit", "Post" }
                }
            }
        }
    }
}

#[component]
pub fn ReviewSection(
    incident_id: IncidentId,
    reviews: Vec<Review>,
    on_changed: EventHandler<()>,
) -> Element {
    let client = use_context::<ApiClient>();
    let auth = use_auth();
    let session = auth.session();
    let mut rating = use_signal(|| 5u8);
    let mut content = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);

    let post = {
        let client = client.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            let client = client.clone();
            async move {
                let review = NewReview {
                    rating: rating(),
                    content: content().trim().to_string(),
                };
                match client.create_review(incident_id, &review).await {
                    Ok(_) => {
                        content.set(String::new());
                        error.set(None);
                        on_changed.call(());
                    }
                    Err(e) => error.set(Some(e.user_message())),
                }
            }
        }
    };

    let remove = move |review_id: i64| {
        let client = client.clone();
        async move {
            match client.delete_review(incident_id, review_id).await {
                Ok(()) => on_changed.call(()),
                Err(e) => error.set(Some(e.user_message())),
            }
        }
    };

    rsx! {
        section {
            class: "reviews",
            h4 { "Reviews ({reviews.len()})" }
            for review in reviews.iter().cloned() {
                div {
                    key: "{review.id}",
                    class: "review",
                    span {
                        class: "review__stars",
                        for n in 0..review.stars() {
                            Icon { key: "{n}", icon: FaStar, width: 12, height: 12 }
                        }
                    }
                    strong { {review.user.as_ref().map(|u| u.username.clone()).unwrap_or_default()} }
                    p { "{review.content}" }
                    if owns(&session, review.user.as_ref()) {
                        button {
                            title: "Delete review",
                            onclick: {
                                let remove = remove.clone();
                                move |_| remove(review.id)
                            },
                            Icon { icon: FaTrashCan, width: 12, height: 12 }
                        }
                    }
                }
            }
            ErrorBanner { message: error() }
            if session.authenticated_user().is_some() {
                form {
                    class: "reviews__form",
                    onsubmit: post,
                    select {
                        value: "{rating}",
                        onchange: move |evt: FormEvent| {
                            if let Ok(value) = evt.value().parse() {
                                rating.set(value);
                            }
                        },
                        for n in 1..=5u8 {
                            option { key: "{n}", value: "{n}", "{n}" }
                        }
                    }
                    input {
                        r#type: "text",
                        placeholder: "Share your assessment",
                        value: content(),
                        oninput: move |evt: FormEvent| content.set(evt.value()),
                    }
                    button { r#type: "submit", "Review" }
                }
            }
        }
    }
}

fn like_class(liked: bool) -> &'static str {
    if liked {
        "reaction reaction--active"
    } else {
        "reaction"
    }
}

/// Authors and administrators may delete feedback.
fn owns(session: &store::Session, author: Option<&store::User>) -> bool {
    match session.authenticated_user() {
        Some(user) => user.is_admin || author.is_some_and(|a| a.id == user.id),
        None => false,
    }
}
