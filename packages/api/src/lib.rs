//! # API crate: HTTP adapter for the Ajali backend
//!
//! Everything that talks to the backend lives here. [`ApiClient`] implements
//! the `store` crate's [`AuthBackend`] and [`NotificationBackend`] traits, so
//! the session store and notification poller run against it unchanged, and
//! adds plain async methods for the incident workflow.
//!
//! ## Modules
//!
//! | Module | Endpoints | Purpose |
//! |--------|-----------|---------|
//! | [`client`] | - | Base URL, credentials, status → [`ClientError`] mapping |
//! | `auth` | `/check_session`, `/login`, `/register`, `/logout` | [`AuthBackend`] impl |
//! | `notifications` | `/notifications` | [`NotificationBackend`] impl |
//! | `incidents` | `/incidents` | Report (multipart), list, edit, triage, delete |
//! | `comments` | `/incidents/{id}/comments` | Discussion on a report |
//! | `reactions` | `/incidents/{id}/reactions` | Like toggle and shares |
//! | `reviews` | `/incidents/{id}/reviews` | 1–5 star ratings |
//! | `users` | `/users` | Administrator user management |
//! | [`models`] | - | Request/response types with local validation |
//!
//! Every request validates what it can locally first; a report without a
//! location or a review rated 0 fails with [`ErrorKind::Validation`] and never
//! reaches the network.

pub mod client;
pub mod models;

mod auth;
mod comments;
mod incidents;
mod notifications;
mod reactions;
mod reviews;
mod users;

pub use client::ApiClient;
pub use models::*;

pub use store::{
    AuthBackend, ClientConfig, ClientError, ErrorKind, NotificationBackend, NotificationRecord,
    Session, User, UserId,
};
