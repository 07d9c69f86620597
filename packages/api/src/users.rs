//! Administrator-only user management.

use reqwest::Method;
use serde::Serialize;
use store::{ClientError, User, UserId};

use crate::client::ApiClient;

#[derive(Serialize)]
struct BanUpdate {
    is_banned: bool,
}

#[derive(Serialize)]
struct RoleUpdate {
    is_admin: bool,
}

impl ApiClient {
    pub async fn list_users(&self) -> Result<Vec<User>, ClientError> {
        self.send(self.request(Method::GET, "/users")).await
    }

    pub async fn delete_user(&self, id: UserId) -> Result<(), ClientError> {
        self.send_empty(self.request(Method::DELETE, &format!("/users/{id}")))
            .await
    }

    pub async fn set_banned(&self, id: UserId, is_banned: bool) -> Result<User, ClientError> {
        let user = self
            .send(
                self.request(Method::PUT, &format!("/users/{id}/ban"))
                    .json(&BanUpdate { is_banned }),
            )
            .await?;
        tracing::info!(user_id = id, is_banned, "ban status changed");
        Ok(user)
    }

    pub async fn set_admin(&self, id: UserId, is_admin: bool) -> Result<User, ClientError> {
        let user = self
            .send(
                self.request(Method::PUT, &format!("/users/{id}"))
                    .json(&RoleUpdate { is_admin }),
            )
            .await?;
        tracing::info!(user_id = id, is_admin, "admin role changed");
        Ok(user)
    }
}
