//! # HTTP client adapter
//!
//! [`ApiClient`] is the only place that talks HTTP. It owns the base URL,
//! attaches session credentials to every request and turns failures into
//! [`ClientError`]s:
//!
//! - the backend session is a cookie, so native builds keep a cookie jar and
//!   wasm builds send `credentials: include` on each fetch;
//! - transport failures become [`ErrorKind::Network`](store::ErrorKind::Network);
//! - non-2xx statuses are classified with [`ClientError::from_status`], using
//!   the backend's `{"message": ...}` body when there is one;
//! - bodies that do not decode become `Server` errors.

use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use store::{ClientConfig, ClientError};

/// Shared HTTP client for every backend endpoint.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_base_url(&config.api.base_url)
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            http: build_http_client(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a backend path such as `/incidents/3`.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Public URL of an uploaded attachment.
    pub fn upload_url(&self, file_name: &str) -> String {
        self.url(&format!("/uploads/{file_name}"))
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        with_credentials(self.http.request(method, self.url(path)))
    }

    /// Send and decode a JSON body.
    pub(crate) async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = execute(request).await?;
        let body = response.text().await.map_err(transport_error)?;
        decode(&body)
    }

    /// Send and ignore any body.
    pub(crate) async fn send_empty(&self, request: RequestBuilder) -> Result<(), ClientError> {
        execute(request).await.map(|_| ())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn build_http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .unwrap_or_else(|e| {
            tracing::warn!("falling back to a client without cookie store: {e}");
            reqwest::Client::new()
        })
}

#[cfg(target_arch = "wasm32")]
fn build_http_client() -> reqwest::Client {
    reqwest::Client::new()
}

#[cfg(target_arch = "wasm32")]
fn with_credentials(request: RequestBuilder) -> RequestBuilder {
    request.fetch_credentials_include()
}

#[cfg(not(target_arch = "wasm32"))]
fn with_credentials(request: RequestBuilder) -> RequestBuilder {
    request
}

async fn execute(request: RequestBuilder) -> Result<Response, ClientError> {
    let response = request.send().await.map_err(transport_error)?;
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let err = error_from_body(status.as_u16(), &body);
    tracing::debug!(status = status.as_u16(), "backend rejected request: {err}");
    Err(err)
}

fn transport_error(e: reqwest::Error) -> ClientError {
    if e.is_decode() {
        ClientError::server(format!("malformed response: {e}"))
    } else {
        ClientError::network(e.to_string())
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

/// Classify a failed response from its status and raw body.
pub(crate) fn error_from_body(status: u16, body: &str) -> ClientError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message.or(b.error));
    ClientError::from_status(status, message)
}

pub(crate) fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ClientError> {
    // Empty 2xx bodies decode as JSON null so `()`/`Option` targets still work.
    let body = if body.trim().is_empty() { "null" } else { body };
    serde_json::from_str(body).map_err(|e| ClientError::server(format!("malformed response: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::ErrorKind;

    #[test]
    fn test_url_joining() {
        let client = ApiClient::with_base_url("http://localhost:5000/");
        assert_eq!(client.base_url(), "http://localhost:5000");
        assert_eq!(client.url("/incidents/3"), "http://localhost:5000/incidents/3");
        assert_eq!(client.url("login"), "http://localhost:5000/login");
        assert_eq!(client.upload_url("a.png"), "http://localhost:5000/uploads/a.png");
    }

    #[test]
    fn test_client_uses_configured_base_url() {
        let config = ClientConfig::default().with_base_url("https://ajali.example");
        assert_eq!(ApiClient::new(&config).base_url(), "https://ajali.example");
    }

    #[test]
    fn test_error_body_message() {
        let err = error_from_body(401, r#"{"message": "Invalid credentials"}"#);
        assert_eq!(err.kind, ErrorKind::Auth);
        assert_eq!(err.message, "Invalid credentials");

        let err = error_from_body(403, r#"{"error": "Admin privileges required"}"#);
        assert_eq!(err.kind, ErrorKind::Permission);
        assert_eq!(err.message, "Admin privileges required");
    }

    #[test]
    fn test_error_body_not_json() {
        let err = error_from_body(404, "<html>Not Found</html>");
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert_eq!(err.message, "request failed with status 404");

        let err = error_from_body(502, "");
        assert_eq!(err.kind, ErrorKind::Server);
    }

    #[test]
    fn test_decode_empty_and_malformed() {
        assert!(decode::<()>("").is_ok());
        let nothing: Option<u32> = decode("  ").unwrap();
        assert_eq!(nothing, None);

        let err = decode::<Vec<u32>>("{not json").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Server);
    }
}
