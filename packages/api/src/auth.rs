//! Session endpoints over HTTP.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use store::{AuthBackend, ClientError, RegisterRequest, User};

use crate::client::ApiClient;

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

/// `/login` and `/check_session` answer `{"user": {...}}`; some deployments
/// return the bare user object.
#[derive(Deserialize)]
#[serde(untagged)]
enum UserEnvelope {
    Wrapped { user: User },
    Bare(User),
}

impl UserEnvelope {
    fn into_user(self) -> User {
        match self {
            Self::Wrapped { user } | Self::Bare(user) => user,
        }
    }
}

/// `/register` answers `{"message": ...}` (account only) or `{"user": {...}}`
/// when it also logged the new user in.
#[derive(Deserialize)]
struct RegisterResponse {
    #[serde(default)]
    user: Option<User>,
}

impl AuthBackend for ApiClient {
    async fn check_session(&self) -> Result<User, ClientError> {
        let envelope: UserEnvelope = self.send(self.request(Method::GET, "/check_session")).await?;
        Ok(envelope.into_user())
    }

    async fn login(&self, email: &str, password: &str) -> Result<User, ClientError> {
        let request = self
            .request(Method::POST, "/login")
            .json(&Credentials { email, password });
        let envelope: UserEnvelope = self.send(request).await?;
        Ok(envelope.into_user())
    }

    async fn register(&self, request: &RegisterRequest) -> Result<Option<User>, ClientError> {
        let response: Option<RegisterResponse> =
            self.send(self.request(Method::POST, "/register").json(request)).await?;
        Ok(response.and_then(|r| r.user))
    }

    async fn logout(&self) -> Result<(), ClientError> {
        self.send_empty(self.request(Method::POST, "/logout")).await
    }
}
