//! Request dispatcher - one logical operation, one HTTP call

use std::time::{Duration, Instant};

use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use tracing::debug;

use restprobe_common::HttpStatus;

use crate::endpoint::{Endpoint, PathParams};
use crate::error::Result;

/// Raw response of a dispatched call. The body is kept unparsed.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub endpoint: Endpoint,
    pub url: String,
    pub status: u16,
    pub body: String,
    pub elapsed: Duration,
}

impl ApiResponse {
    /// Parse the body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_str(&self.body)?)
    }

    pub fn is(&self, status: HttpStatus) -> bool {
        self.status == status.code()
    }
}

/// Resolves endpoints against a base URL and performs the calls
#[derive(Debug, Clone)]
pub struct Dispatcher {
    client: reqwest::Client,
    base_url: String,
}

impl Dispatcher {
    /// Create a dispatcher with the transport's default settings
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for an endpoint and its parameters
    pub fn url_for(&self, endpoint: Endpoint, params: &PathParams) -> String {
        format!("{}{}", self.base_url, endpoint.render(params))
    }

    /// Perform exactly one request. Error statuses are returned, not raised;
    /// only transport failures become errors.
    pub async fn dispatch(
        &self,
        endpoint: Endpoint,
        params: &PathParams,
        headers: Option<HeaderMap>,
    ) -> Result<ApiResponse> {
        let url = self.url_for(endpoint, params);

        let mut request = self.client.request(endpoint.method(), &url);
        if let Some(headers) = headers {
            request = request.headers(headers);
        }

        let started = Instant::now();
        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        let elapsed = started.elapsed();

        debug!(
            "{} {} -> {} ({} ms)",
            endpoint.method(),
            url,
            status,
            elapsed.as_millis()
        );

        Ok(ApiResponse {
            endpoint,
            url,
            status,
            body,
            elapsed,
        })
    }

    /// Dispatch by registry key; an unknown key fails before any I/O
    pub async fn dispatch_named(
        &self,
        name: &str,
        params: &PathParams,
        headers: Option<HeaderMap>,
    ) -> Result<ApiResponse> {
        let endpoint: Endpoint = name.parse()?;
        self.dispatch(endpoint, params, headers).await
    }
}
