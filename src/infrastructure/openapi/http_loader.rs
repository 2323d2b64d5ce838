//! HTTP-based OpenAPI spec loader

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use std::time::Duration;
use url::Url;

use super::parser::{DocumentFormat, OpenApiParser};
use crate::generation::{ApiSpecification, GenerationError, OpenApiLoader};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Loads OpenAPI specifications from HTTP/HTTPS URLs, typically a running
/// node's `/swagger.json` endpoint
pub struct HttpOpenApiLoader {
    client: Client,
}

impl HttpOpenApiLoader {
    pub fn new() -> Result<Self, GenerationError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(|e| GenerationError::spec_load(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self::with_client(client))
    }

    /// Use a preconfigured client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl OpenApiLoader for HttpOpenApiLoader {
    async fn load(&self, source: &str) -> Result<ApiSpecification, GenerationError> {
        let url = Url::parse(source)
            .ok()
            .filter(|url| matches!(url.scheme(), "http" | "https"))
            .ok_or_else(|| {
                GenerationError::spec_load(format!("Not an HTTP(S) document URL: {source}"))
            })?;

        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json, application/yaml;q=0.9")
            .send()
            .await
            .map_err(|e| GenerationError::spec_load(format!("Failed to fetch {source}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GenerationError::spec_load(format!(
                "HTTP {status} when fetching {source}"
            )));
        }

        let format = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|content_type| DocumentFormat::from_content_type(content_type, source))
            .unwrap_or_else(|| DocumentFormat::from_source(source));
        let body = response.text().await.map_err(|e| {
            GenerationError::spec_load(format!("Failed to read body of {source}: {e}"))
        })?;

        tracing::debug!(url = %source, bytes = body.len(), format = ?format, "Fetched node OpenAPI document");
        OpenApiParser::from_text(&body, format)?.parse()
    }
}
