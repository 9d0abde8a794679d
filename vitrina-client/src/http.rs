//! HTTP client for the document store and upload endpoints

use crate::{ClientConfig, ClientError, ClientResult};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

/// Thin JSON-over-HTTP client bound to one base URL
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            token: config.token.clone(),
        })
    }

    /// Set the authentication token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Absolute URL for `path`; an empty path is the base URL itself
    pub fn url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        if path.is_empty() {
            base.to_string()
        } else {
            format!("{base}/{path}")
        }
    }

    /// Build authorization header value
    fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    fn authorized(&self, mut request: RequestBuilder) -> RequestBuilder {
        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }
        request
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.authorized(self.client.get(self.url(path)));
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let request = self.authorized(self.client.post(self.url(path)).json(body));
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request with a JSON body, ignoring the response body
    pub async fn post_no_content<B: serde::Serialize>(&self, path: &str, body: &B) -> ClientResult<()> {
        let request = self.authorized(self.client.post(self.url(path)).json(body));
        let response = request.send().await?;
        Self::handle_empty(response).await
    }

    /// Make a PATCH request with JSON body, ignoring the response body
    pub async fn patch<B: serde::Serialize>(&self, path: &str, body: &B) -> ClientResult<()> {
        let request = self.authorized(self.client.patch(self.url(path)).json(body));
        let response = request.send().await?;
        Self::handle_empty(response).await
    }

    /// Make a DELETE request
    pub async fn delete(&self, path: &str) -> ClientResult<()> {
        let request = self.authorized(self.client.delete(self.url(path)));
        let response = request.send().await?;
        Self::handle_empty(response).await
    }

    /// Make a multipart POST request
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> ClientResult<T> {
        let request = self.authorized(self.client.post(self.url(path)).multipart(form));
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    async fn check_status(response: reqwest::Response) -> ClientResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await?;
        Err(match status {
            StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
            StatusCode::FORBIDDEN => ClientError::Forbidden(text),
            StatusCode::NOT_FOUND => ClientError::NotFound(text),
            StatusCode::BAD_REQUEST => ClientError::Validation(text),
            _ => ClientError::Internal(format!("{status}: {text}")),
        })
    }

    /// Handle the HTTP response
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let response = Self::check_status(response).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(Into::into)
    }

    async fn handle_empty(response: reqwest::Response) -> ClientResult<()> {
        Self::check_status(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_without_double_slashes() {
        let client = HttpClient::new(&ClientConfig::new("http://localhost:8080/")).unwrap();
        assert_eq!(
            client.url("/collections/p/documents"),
            "http://localhost:8080/collections/p/documents"
        );
        assert_eq!(client.url(""), "http://localhost:8080");
    }

    #[test]
    fn test_auth_header_uses_bearer() {
        let client = HttpClient::new(&ClientConfig::default())
            .unwrap()
            .with_token("abc");
        assert_eq!(client.auth_header().as_deref(), Some("Bearer abc"));
    }
}
