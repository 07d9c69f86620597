//! Error taxonomy shared by the stores and the HTTP layer.

use std::fmt;

use thiserror::Error;

/// Broad category of a failed backend interaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Backend unreachable or the request never completed.
    Network,
    /// Invalid credentials or no/expired session.
    Auth,
    /// Malformed request, rejected before or by the backend.
    Validation,
    /// The referenced id no longer exists.
    NotFound,
    /// Authenticated but not allowed (e.g. non-admin on admin data).
    Permission,
    /// Backend error or an undecodable response.
    Server,
}

impl ErrorKind {
    /// Classify a non-success HTTP status.
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => Self::Auth,
            403 => Self::Permission,
            404 | 410 => Self::NotFound,
            400..=499 => Self::Validation,
            _ => Self::Server,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Network => "network error",
            Self::Auth => "authentication error",
            Self::Validation => "validation error",
            Self::NotFound => "not found",
            Self::Permission => "permission denied",
            Self::Server => "server error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed client operation: its [`ErrorKind`] plus a human-readable message.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct ClientError {
    pub kind: ErrorKind,
    pub message: String,
}

impl ClientError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Network, message)
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Auth, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    pub fn permission(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Permission, message)
    }

    pub fn server(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Server, message)
    }

    /// Build from a non-success HTTP status and the backend's message, if any.
    pub fn from_status(status: u16, message: Option<String>) -> Self {
        let kind = ErrorKind::from_status(status);
        let message = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| format!("request failed with status {status}"));
        Self::new(kind, message)
    }

    /// Message suitable for showing to the user.
    pub fn user_message(&self) -> String {
        match self.kind {
            ErrorKind::Network => {
                "Cannot reach the server. Check your connection and try again.".to_string()
            }
            ErrorKind::Auth if self.message.is_empty() => {
                "Invalid email or password.".to_string()
            }
            ErrorKind::Permission => "You do not have permission to do that.".to_string(),
            ErrorKind::Server => "The server ran into a problem. Please try again later.".to_string(),
            _ => self.message.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert_eq!(ErrorKind::from_status(400), ErrorKind::Validation);
        assert_eq!(ErrorKind::from_status(401), ErrorKind::Auth);
        assert_eq!(ErrorKind::from_status(403), ErrorKind::Permission);
        assert_eq!(ErrorKind::from_status(404), ErrorKind::NotFound);
        assert_eq!(ErrorKind::from_status(413), ErrorKind::Validation);
        assert_eq!(ErrorKind::from_status(500), ErrorKind::Server);
        assert_eq!(ErrorKind::from_status(503), ErrorKind::Server);
    }

    #[test]
    fn test_backend_message_is_kept() {
        let err = ClientError::from_status(401, Some("Invalid credentials".to_string()));
        assert_eq!(err.kind, ErrorKind::Auth);
        assert_eq!(err.message, "Invalid credentials");
        assert_eq!(err.user_message(), "Invalid credentials");
        assert_eq!(err.to_string(), "authentication error: Invalid credentials");
    }

    #[test]
    fn test_missing_message_falls_back_to_status() {
        let err = ClientError::from_status(500, Some("  ".to_string()));
        assert_eq!(err.message, "request failed with status 500");
    }

    #[test]
    fn test_network_user_message_is_actionable() {
        let err = ClientError::network("connection refused");
        assert!(err.user_message().contains("Cannot reach the server"));
    }
}
