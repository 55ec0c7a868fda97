//! Shared REST plumbing for the algod and indexer clients

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::ports::models::{ApiErrorBody, LedgerError, LedgerResult};

/// Base URL, auth header and HTTP client for one Algorand REST service
#[derive(Debug, Clone)]
pub(crate) struct RestClient {
    base_url: String,
    token_header: &'static str,
    token: String,
    http: Client,
}

impl RestClient {
    pub(crate) fn new(
        base_url: &str,
        token_header: &'static str,
        token: &str,
        timeout: Duration,
    ) -> LedgerResult<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LedgerError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token_header,
            token: token.to_string(),
            http,
        })
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        // Public endpoints take no token; an empty header is rejected by some proxies
        if self.token.is_empty() {
            req
        } else {
            req.header(self.token_header, &self.token)
        }
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> LedgerResult<T> {
        tracing::debug!("GET {}{}", self.base_url, path);

        let response = self
            .authorize(self.http.get(self.url(path)).query(query))
            .send()
            .await?;

        Self::handle_response(response).await
    }

    /// POST raw bytes. Non-2xx answers are reported through `on_reject`.
    pub(crate) async fn post_bytes<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Vec<u8>,
        on_reject: fn(String) -> LedgerError,
    ) -> LedgerResult<T> {
        tracing::debug!("POST {}{} ({} bytes)", self.base_url, path, body.len());

        let response = self
            .authorize(
                self.http
                    .post(self.url(path))
                    .header("Content-Type", "application/x-binary")
                    .body(body),
            )
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(on_reject(Self::error_message(status, response).await));
        }

        Self::parse_body(response).await
    }

    async fn handle_response<T: DeserializeOwned>(response: Response) -> LedgerResult<T> {
        let status = response.status();

        if !status.is_success() {
            return Err(LedgerError::Network(Self::error_message(status, response).await));
        }

        Self::parse_body(response).await
    }

    async fn parse_body<T: DeserializeOwned>(response: Response) -> LedgerResult<T> {
        response
            .json()
            .await
            .map_err(|e| LedgerError::Network(format!("Failed to parse response: {}", e)))
    }

    async fn error_message(status: StatusCode, response: Response) -> String {
        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&text)
            .map(|body| body.message)
            .unwrap_or(text);

        if status == StatusCode::TOO_MANY_REQUESTS {
            return format!("Rate limit exceeded: {}", message);
        }
        format!("API error {}: {}", status, message)
    }
}
