//! Notification endpoints over HTTP.

use reqwest::Method;
use store::{ClientError, NotificationBackend, NotificationId, NotificationRecord};

use crate::client::ApiClient;

impl NotificationBackend for ApiClient {
    async fn fetch_notifications(&self) -> Result<Vec<NotificationRecord>, ClientError> {
        self.send(self.request(Method::GET, "/notifications")).await
    }

    async fn mark_read(&self, id: NotificationId) -> Result<NotificationRecord, ClientError> {
        self.send(self.request(Method::PUT, &format!("/notifications/{id}")))
            .await
    }
}
