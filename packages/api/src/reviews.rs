use reqwest::Method;
use store::ClientError;

use crate::client::ApiClient;
use crate::models::{IncidentId, NewReview, Review};

impl ApiClient {
    pub async fn create_review(
        &self,
        incident: IncidentId,
        review: &NewReview,
    ) -> Result<Review, ClientError> {
        review.validate()?;
        self.send(
            self.request(Method::POST, &format!("/incidents/{incident}/reviews"))
                .json(review),
        )
        .await
    }

    pub async fn delete_review(&self, incident: IncidentId, review: i64) -> Result<(), ClientError> {
        self.send_empty(self.request(
            Method::DELETE,
            &format!("/incidents/{incident}/reviews/{review}"),
        ))
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::ErrorKind;

    #[tokio::test]
    async fn test_out_of_range_rating_is_rejected_locally() {
        let client = ApiClient::with_base_url("http://127.0.0.1:9");
        let review = NewReview {
            rating: 9,
            content: "Great".to_string(),
        };
        let err = client.create_review(1, &review).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }
}
