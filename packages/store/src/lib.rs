//! # Store crate: client state for Ajali!
//!
//! Framework-free core of the client: the data model, the error taxonomy,
//! configuration, and the two owned stores the views read from.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`session`] | [`SessionStore`]: who is logged in; login/register/logout. |
//! | [`notifications`] | [`NotificationCenter`]: polling, set-union merge, confirmed mark-as-read. |
//! | [`guard`] | [`RouteGuard`]: pure access decisions for protected routes. |
//! | [`backend`] | Traits the `api` crate implements over HTTP. |
//! | [`config`] | `ajali.toml` settings. |
//! | [`timer`] | Platform sleep shared by the polling loops. |

pub mod backend;
pub mod config;
pub mod error;
pub mod guard;
pub mod models;
pub mod notifications;
pub mod session;
pub mod timer;

#[cfg(test)]
mod memory;

pub use backend::{AuthBackend, NotificationBackend};
pub use config::{ApiConfig, ClientConfig, IncidentsConfig, NotificationsConfig};
pub use error::{ClientError, ErrorKind};
pub use guard::{GuardDecision, RouteGuard};
pub use models::{
    NotificationId, NotificationKind, NotificationRecord, RegisterRequest, Session, User, UserId,
};
pub use notifications::{NotificationCenter, NotificationState, PollHandle, TickOutcome};
pub use session::{RegisterOutcome, SessionStore};
