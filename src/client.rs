//! HTTP client for conversational search against an OpenSearch cluster
//!
//! The client owns a single [`reqwest::Client`] session for the configured
//! endpoint. The underlying client pools connections internally and is safe
//! for concurrent calls; this module adds no synchronization of its own.
//! Sockets are released when the client is dropped, on every exit path.

use std::time::Duration;

use reqwest::{Method, Url};
use serde_json::Value;
use tracing::{debug, info};

use crate::config::OpenSearchConfig;
use crate::error::{Error, Result};
use crate::request::{SearchOverrides, SearchParameters, SearchRequest};

/// Client-side timeout for a whole request
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client-side timeout for establishing a connection
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Conversational search client bound to one OpenSearch endpoint.
///
/// Created once from an [`OpenSearchConfig`] and reused across calls.
/// Optional basic-auth credentials are sent with every request to the
/// configured endpoint only, never to any other host.
///
/// # Example
///
/// ```no_run
/// use opensearch_rag::{OpenSearchClient, OpenSearchConfig, SearchOverrides};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = OpenSearchClient::connect(OpenSearchConfig::default())?;
///     let response = client
///         .search("What is OpenSearch?", SearchOverrides::default())
///         .await?;
///     println!("{response}");
///     Ok(())
/// }
/// ```
pub struct OpenSearchClient {
    http: reqwest::Client,
    base_url: Url,
    credentials: Option<(String, String)>,
    config: OpenSearchConfig,
}

impl OpenSearchClient {
    /// Connect to the endpoint described by `config` without authentication.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Connection`] if the configured scheme/host/port do
    /// not form a valid URL or the HTTP client cannot be built.
    pub fn connect(config: OpenSearchConfig) -> Result<Self> {
        Self::build(config, None)
    }

    /// Connect with HTTP basic-auth credentials attached to every request.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Connection`] if the configured scheme/host/port do
    /// not form a valid URL or the HTTP client cannot be built.
    pub fn connect_with_auth(
        config: OpenSearchConfig,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self> {
        Self::build(config, Some((username.into(), password.into())))
    }

    fn build(config: OpenSearchConfig, credentials: Option<(String, String)>) -> Result<Self> {
        let base = format!("{}://{}:{}", config.scheme(), config.host(), config.port());
        let base_url = Url::parse(&base)
            .map_err(|e| Error::Connection(format!("invalid OpenSearch URL '{base}': {e}")))?;

        let http = reqwest::Client::builder()
            .timeout(DEFAULT_REQUEST_TIMEOUT)
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
            .build()
            .map_err(|e| Error::Connection(format!("failed to build HTTP client: {e}")))?;

        info!(endpoint = %base_url, "created OpenSearch client");

        Ok(Self {
            http,
            base_url,
            credentials,
            config,
        })
    }

    /// The configuration this client was created from
    #[must_use]
    pub fn config(&self) -> &OpenSearchConfig {
        &self.config
    }

    /// Execute a raw request against the cluster and return the response
    /// body text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] on network failure or timeout and
    /// [`Error::HttpStatus`] on a non-2xx response.
    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&Value>,
    ) -> Result<String> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| Error::Connection(format!("invalid request path '{path}': {e}")))?;

        let mut request = self.http.request(method, url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some((username, password)) = &self.credentials {
            request = request.basic_auth(username, Some(password));
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(Error::HttpStatus { status, body });
        }

        Ok(response.text().await?)
    }

    /// Perform a conversational search for `question`.
    ///
    /// Unset override fields fall back to configuration defaults. The
    /// response tree is returned unmodified; use
    /// [`crate::response::extract_answer`] and
    /// [`crate::response::extract_hits`] to read it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Search`] wrapping the transport-class cause when
    /// the request fails.
    pub async fn search(&self, question: &str, overrides: SearchOverrides) -> Result<Value> {
        let params = SearchParameters::from_config(&self.config, question).apply(overrides);
        self.search_with_params(&params).await
    }

    /// Perform a conversational search with fully-resolved parameters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Search`] wrapping the transport-class cause when
    /// the request fails.
    pub async fn search_with_params(&self, params: &SearchParameters) -> Result<Value> {
        info!(index = %params.index_name, "performing conversational search");
        debug!(question = %params.question);

        let body = serde_json::to_value(SearchRequest::build(params))?;
        debug!(body = %body, "search request body");

        let path = format!("/{}/_search", params.index_name);
        let raw = self
            .execute(
                Method::GET,
                &path,
                &[("search_pipeline", params.search_pipeline.as_str())],
                Some(&body),
            )
            .await
            .map_err(Error::search)?;

        let response: Value = serde_json::from_str(&raw)?;
        debug!("search completed");
        Ok(response)
    }
}
