//! Outbound HTTP client for GA4GH-style genomics backends.

use crate::{Error, Result, registry::Backend};
use reqwest::{Client, Method};
use serde::Serialize;
use serde_json::Value;
use std::time::{Duration, Instant};

const GENERIC_BACKEND_FAILURE: &str = "Something went wrong with the API call!";

/// How much of an unparsable body ends up in the log.
const LOGGED_BODY_LIMIT: usize = 1000;

/// Shared client; cloning reuses the same connection pool.
#[derive(Clone)]
pub struct BackendClient {
    http: Client,
}

impl BackendClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Internal(format!("failed to create HTTP client: {}", e)))?;
        Ok(Self { http })
    }

    /// Call `path` on `backend` and return the parsed JSON reply.
    ///
    /// The body is parsed before the status is inspected, so an error page
    /// that is not JSON is reported as [`Error::MalformedResponse`]. Replies
    /// with a status of 300 or above become [`Error::Backend`] carrying the
    /// backend's own `error.message` when it sent one.
    pub async fn fetch(
        &self,
        backend: &Backend,
        method: Method,
        path: &str,
        body: Option<&Value>,
        params: &[(&str, &str)],
    ) -> Result<Value> {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(params)
            .finish();
        let url = backend.url_template.render(path, &query);
        // The rendered url can carry an API key; only the path is logged.
        tracing::debug!(backend = %backend.id, path, "backend request");

        let started = Instant::now();
        let mut request = self.http.request(method, &url);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await.map_err(|e| e.without_url())?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(|e| e.without_url())?;

        let content: Value = serde_json::from_slice(&bytes).map_err(|e| {
            let excerpt = String::from_utf8_lossy(&bytes[..bytes.len().min(LOGGED_BODY_LIMIT)]);
            tracing::error!(
                backend = %backend.id,
                path,
                error = %e,
                content = %excerpt,
                "non-json api content"
            );
            Error::MalformedResponse
        })?;

        if status.as_u16() >= 300 {
            tracing::error!(backend = %backend.id, path, %status, %content, "error api response");
            let message = content
                .pointer("/error/message")
                .and_then(Value::as_str)
                .unwrap_or(GENERIC_BACKEND_FAILURE);
            return Err(Error::Backend(message.to_string()));
        }

        tracing::info!(
            backend = %backend.id,
            path,
            kb = bytes.len() / 1024,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "backend call complete"
        );
        Ok(content)
    }

    pub async fn get(&self, backend: &Backend, path: &str) -> Result<Value> {
        self.fetch(backend, Method::GET, path, None, &[]).await
    }

    /// POST a GA4GH search request.
    pub async fn search<B: Serialize>(
        &self,
        backend: &Backend,
        path: &str,
        body: &B,
        params: &[(&str, &str)],
    ) -> Result<Value> {
        let body = serde_json::to_value(body)
            .map_err(|e| Error::Internal(format!("failed to serialize search body: {}", e)))?;
        self.fetch(backend, Method::POST, path, Some(&body), params)
            .await
    }
}
