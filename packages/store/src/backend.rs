//! Backend collaborators consumed by the stores.
//!
//! The HTTP implementation lives in the `api` crate. Tests use an in-memory
//! backend that implements both traits.

use std::future::Future;

use crate::error::ClientError;
use crate::models::{NotificationId, NotificationRecord, RegisterRequest, User};

/// Session endpoints: `/check_session`, `/login`, `/register`, `/logout`.
pub trait AuthBackend {
    /// The user owning the current backend session. `Auth` when there is none.
    fn check_session(&self) -> impl Future<Output = Result<User, ClientError>>;

    fn login(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<User, ClientError>>;

    /// `Some(user)` when the backend also opened a session, `None` when it
    /// only created the account.
    fn register(
        &self,
        request: &RegisterRequest,
    ) -> impl Future<Output = Result<Option<User>, ClientError>>;

    fn logout(&self) -> impl Future<Output = Result<(), ClientError>>;
}

/// Notification endpoints: `GET /notifications`, `PUT /notifications/{id}`.
pub trait NotificationBackend {
    fn fetch_notifications(
        &self,
    ) -> impl Future<Output = Result<Vec<NotificationRecord>, ClientError>>;

    /// Persist the read flag; resolves to the updated record.
    fn mark_read(
        &self,
        id: NotificationId,
    ) -> impl Future<Output = Result<NotificationRecord, ClientError>>;
}
