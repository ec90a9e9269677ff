use super::WikiSource;
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// [`WikiSource`] backed by the SNPedia MediaWiki API.
pub struct SnpediaClient {
    client: Client,
    api_url: String,
    page_url: String,
}

impl SnpediaClient {
    pub fn new(api_url: String, page_url: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Internal(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_url,
            page_url: page_url.trim_end_matches('/').to_string(),
        })
    }

    async fn query_page(&self, title: &str) -> std::result::Result<Value, reqwest::Error> {
        self.client
            .get(&self.api_url)
            .query(&[
                ("action", "query"),
                ("prop", "revisions"),
                ("format", "json"),
                ("rvprop", "content"),
                ("titles", title),
            ])
            .send()
            .await?
            .json()
            .await
    }
}

/// Markup of the latest revision in a `action=query&prop=revisions` reply.
fn revision_content(reply: &Value) -> Option<String> {
    reply
        .pointer("/query/pages")?
        .as_object()?
        .values()
        .next()?
        .pointer("/revisions/0/*")?
        .as_str()
        .map(str::to_string)
}

#[async_trait]
impl WikiSource for SnpediaClient {
    async fn page_content(&self, title: &str) -> Option<String> {
        match self.query_page(title).await {
            Ok(reply) => {
                let content = revision_content(&reply);
                if content.is_none() {
                    tracing::debug!(page = title, "SNPedia page has no content");
                }
                content
            }
            Err(e) => {
                tracing::warn!(page = title, error = %e, "SNPedia request failed");
                None
            }
        }
    }

    fn page_link(&self, title: &str) -> String {
        format!("{}/{}", self.page_url, title)
    }
}
