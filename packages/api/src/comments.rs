use reqwest::Method;
use serde::Serialize;
use store::ClientError;

use crate::client::ApiClient;
use crate::models::{Comment, IncidentId};

#[derive(Serialize)]
struct NewComment<'a> {
    content: &'a str,
}

impl ApiClient {
    pub async fn create_comment(
        &self,
        incident: IncidentId,
        content: &str,
    ) -> Result<Comment, ClientError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(ClientError::validation("Comment cannot be empty"));
        }
        self.send(
            self.request(Method::POST, &format!("/incidents/{incident}/comments"))
                .json(&NewComment { content }),
        )
        .await
    }

    pub async fn delete_comment(
        &self,
        incident: IncidentId,
        comment: i64,
    ) -> Result<(), ClientError> {
        self.send_empty(self.request(
            Method::DELETE,
            &format!("/incidents/{incident}/comments/{comment}"),
        ))
        .await
    }
}
