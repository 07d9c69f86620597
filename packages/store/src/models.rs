//! # Session and notification models
//!
//! The data shared between the backend, the stores and the views. The JSON
//! shapes follow the backend's `to_dict` output, so every optional or
//! later-added field carries a serde default.
//!
//! | Type | Represents |
//! |------|-----------|
//! | [`User`] | An account as returned by `/login`, `/check_session` and `/users`. |
//! | [`Session`] | The client's belief about who is logged in. `loading` means "unknown". |
//! | [`NotificationRecord`] | One notification addressed to the current user. |
//! | [`RegisterRequest`] | Payload for `POST /register`, with local validation. |

use serde::{Deserialize, Serialize};

use crate::error::ClientError;

pub type UserId = i64;
pub type NotificationId = i64;

/// An account known to the backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub is_banned: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Who, if anyone, is authenticated.
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    pub user: Option<User>,
    /// While `true`, `user` is unknown and must not drive authorization.
    pub loading: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            user: None,
            loading: true,
        }
    }
}

impl Session {
    /// A settled session for `user`.
    pub fn authenticated(user: User) -> Self {
        Self {
            user: Some(user),
            loading: false,
        }
    }

    /// A settled session with nobody logged in.
    pub fn anonymous() -> Self {
        Self {
            user: None,
            loading: false,
        }
    }

    /// The logged-in user, or `None` while loading or logged out.
    pub fn authenticated_user(&self) -> Option<&User> {
        if self.loading {
            None
        } else {
            self.user.as_ref()
        }
    }

    pub fn is_admin(&self) -> bool {
        self.authenticated_user().is_some_and(|u| u.is_admin)
    }
}

/// Severity the backend attaches to a notification.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    #[default]
    Info,
    Success,
    Warning,
    Error,
    #[serde(other)]
    Other,
}

/// A notification addressed to the current user.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NotificationRecord {
    pub id: NotificationId,
    pub message: String,
    #[serde(rename = "type", default)]
    pub kind: NotificationKind,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub read: bool,
}

/// Payload for `POST /register`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Minimum password length accepted before contacting the backend.
pub const MIN_PASSWORD_LEN: usize = 6;

impl RegisterRequest {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    /// Trim the text fields and reject obviously malformed input.
    pub fn validated(&self) -> Result<Self, ClientError> {
        let username = self.username.trim().to_string();
        let email = self.email.trim().to_lowercase();

        if username.is_empty() {
            return Err(ClientError::validation("Username is required"));
        }
        if email.is_empty() || !email.contains('@') {
            return Err(ClientError::validation("Invalid email address"));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ClientError::validation(format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }

        Ok(Self {
            username,
            email,
            password: self.password.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_user_from_backend_json() {
        let user: User = serde_json::from_str(
            r#"{"id": 1, "username": "ana", "email": "ana@example.com", "is_admin": false}"#,
        )
        .unwrap();
        assert_eq!(user.id, 1);
        assert!(!user.is_admin);
        assert!(!user.is_banned);
        assert!(user.created_at.is_none());
    }

    #[test]
    fn test_loading_session_has_no_authenticated_user() {
        let user: User = serde_json::from_str(r#"{"id": 2, "username": "root", "is_admin": true}"#)
            .unwrap();
        let session = Session {
            user: Some(user.clone()),
            loading: true,
        };
        assert!(session.authenticated_user().is_none());
        assert!(!session.is_admin());

        let settled = Session::authenticated(user);
        assert!(settled.is_admin());
    }

    #[test]
    fn test_notification_defaults() {
        let record: NotificationRecord =
            serde_json::from_str(r#"{"id": 5, "message": "hello"}"#).unwrap();
        assert_eq!(record.kind, NotificationKind::Info);
        assert!(!record.read);

        let record: NotificationRecord = serde_json::from_str(
            r#"{"id": 6, "message": "x", "type": "warning", "read": true, "created_at": "2024-05-01T10:00:00", "user_id": 3}"#,
        )
        .unwrap();
        assert_eq!(record.kind, NotificationKind::Warning);
        assert!(record.read);

        let record: NotificationRecord =
            serde_json::from_str(r#"{"id": 7, "message": "x", "type": "urgent"}"#).unwrap();
        assert_eq!(record.kind, NotificationKind::Other);
    }

    #[test]
    fn test_register_validation() {
        let ok = RegisterRequest::new(" ana ", "Ana@Example.com ", "secret1")
            .validated()
            .unwrap();
        assert_eq!(ok.username, "ana");
        assert_eq!(ok.email, "ana@example.com");

        let err = RegisterRequest::new("", "a@b.c", "secret1").validated().unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let err = RegisterRequest::new("ana", "not-an-email", "secret1")
            .validated()
            .unwrap_err();
        assert_eq!(err.message, "Invalid email address");

        let err = RegisterRequest::new("ana", "a@b.c", "short").validated().unwrap_err();
        assert!(err.message.contains("at least 6"));
    }
}
