//! HTTP client for the remote quote collection.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;

use super::{decode_remote_quotes, QuoteRemote};
use crate::error::{Error, Result};
use crate::models::Quote;
use crate::util::{compact_text, is_http_url, normalize_text_option};

/// Mock quote endpoint used when nothing else is configured.
pub const DEFAULT_SERVER_URL: &str = "https://jsonplaceholder.typicode.com/posts";

/// `GET`/`POST` JSON client for a single quote collection URL.
#[derive(Clone, Debug)]
pub struct HttpQuoteRemote {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpQuoteRemote {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        Self::with_timeout(endpoint, None)
    }

    /// Build a client; `timeout` bounds each request when set.
    pub fn with_timeout(endpoint: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let endpoint = normalize_endpoint(endpoint.into())?;
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            endpoint,
            client: builder.build()?,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl QuoteRemote for HttpQuoteRemote {
    async fn fetch_quotes(&self) -> Result<Vec<Quote>> {
        let response = self
            .client
            .get(&self.endpoint)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(Error::Remote(describe_status(status, &body)));
        }

        decode_remote_quotes(&body)
    }

    async fn post_quote(&self, quote: &Quote) -> Result<()> {
        let response = self.client.post(&self.endpoint).json(quote).send().await?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!("Quote server accepted post ({})", status.as_u16());
        } else {
            tracing::warn!("Quote server answered post with HTTP {}", status.as_u16());
        }
        Ok(())
    }
}

fn describe_status(status: StatusCode, body: &str) -> String {
    let trimmed = compact_text(body);
    if trimmed.is_empty() {
        format!("HTTP {}", status.as_u16())
    } else {
        format!("{} ({})", trimmed, status.as_u16())
    }
}

fn normalize_endpoint(raw: String) -> Result<String> {
    let endpoint = normalize_text_option(Some(raw))
        .ok_or_else(|| Error::Config("server URL must not be empty".to_string()))?;
    if is_http_url(&endpoint) {
        Ok(endpoint.trim_end_matches('/').to_string())
    } else {
        Err(Error::Config(
            "server URL must include http:// or https://".to_string(),
        ))
    }
}
