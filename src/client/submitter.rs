//! Document submission over HTTP.

use std::sync::Arc;
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;
use url::Url;

use crate::Result;
use crate::auth::{CredentialsProvider, StaticCredentials};
use crate::client::config::{ClientConfig, parse_endpoint};
use crate::codec::{decode_response, encode_document};
use crate::error::SubmitError;
use crate::rate_limit::{Clock, FixedWindowLimiter, MonotonicClock, RateLimitConfig};
use crate::types::{Document, SubmissionResult, TimeUnit};

/// Client for the document registration endpoint.
///
/// Every call to [`submit`](Self::submit) first takes a permit from the
/// client's rate limiter. Denied calls fail with
/// [`SubmitError::RateLimitExceeded`] and send nothing. Clones share the
/// same limiter, so the budget holds across tasks and threads.
///
/// # Example
///
/// ```rust,no_run
/// use document_submit_client::client::DocumentClient;
/// use document_submit_client::types::{Document, TimeUnit};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = DocumentClient::new(
///         TimeUnit::Seconds,
///         9,
///         "http://localhost:8080/api/v3/lk/documents/create",
///     )?;
///
///     let result = client.submit(&Document::default()).await?;
///     println!("Registered: {}", result.doc_id);
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct DocumentClient {
    http_client: ClientWithMiddleware,
    endpoint: Url,
    limiter: Arc<FixedWindowLimiter>,
    credentials: Arc<dyn CredentialsProvider>,
}

impl DocumentClient {
    /// Create a client admitting `request_limit` submissions per `time_unit`.
    ///
    /// Uses the placeholder credential; see [`DocumentClient::builder()`]
    /// to supply a real one.
    pub fn new(
        time_unit: TimeUnit,
        request_limit: u32,
        endpoint: impl Into<String>,
    ) -> Result<Self> {
        Self::from_config(ClientConfig::new(time_unit, request_limit, endpoint))
    }

    /// Create a client from a [`ClientConfig`].
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        Self::builder()
            .endpoint(config.endpoint)
            .rate_limit(RateLimitConfig::per(config.time_unit, config.request_limit))
            .build()
    }

    /// Create a new client builder.
    pub fn builder() -> DocumentClientBuilder {
        DocumentClientBuilder::new()
    }

    /// The endpoint documents are posted to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// The shared rate limiter.
    pub fn limiter(&self) -> &Arc<FixedWindowLimiter> {
        &self.limiter
    }

    /// Submit one document.
    ///
    /// Fails with [`SubmitError::RateLimitExceeded`] without any network
    /// traffic if no permit is available. Nothing is retried.
    pub async fn submit(&self, document: &Document) -> Result<SubmissionResult> {
        if !self.limiter.try_acquire() {
            let retry_after_ms = self
                .limiter
                .time_until_reset()
                .map(|wait| u64::try_from(wait.as_millis()).unwrap_or(u64::MAX));
            tracing::debug!(?retry_after_ms, "submission denied by rate limiter");
            return Err(SubmitError::RateLimitExceeded { retry_after_ms });
        }

        let body = encode_document(document)?;

        let credential = self.credentials.credential()?;
        let mut authorization = HeaderValue::from_str(credential.expose_secret())
            .map_err(|e| SubmitError::Auth(format!("invalid authorization value: {e}")))?;
        authorization.set_sensitive(true);

        let response = self
            .http_client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, authorization)
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status != StatusCode::OK {
            tracing::debug!(status = status.as_u16(), "document rejected by service");
            return Err(SubmitError::RemoteRejected {
                status: status.as_u16(),
                body,
            });
        }

        let result = decode_response(&body)?;
        tracing::debug!(doc_id = %result.doc_id, "document registered");
        Ok(result)
    }
}

impl std::fmt::Debug for DocumentClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("limiter", &self.limiter)
            .finish()
    }
}

/// Builder for [`DocumentClient`].
pub struct DocumentClientBuilder {
    endpoint: Option<String>,
    rate_limit: RateLimitConfig,
    limiter: Option<Arc<FixedWindowLimiter>>,
    credentials: Option<Arc<dyn CredentialsProvider>>,
    clock: Option<Arc<dyn Clock>>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
}

impl DocumentClientBuilder {
    /// Create a new builder with default settings.
    ///
    /// The default rate limit is one request per second.
    pub fn new() -> Self {
        Self {
            endpoint: None,
            rate_limit: RateLimitConfig::default(),
            limiter: None,
            credentials: None,
            clock: None,
            user_agent: None,
            timeout: None,
        }
    }

    /// Set the document creation endpoint URL. Required.
    pub fn endpoint(mut self, url: impl Into<String>) -> Self {
        self.endpoint = Some(url.into());
        self
    }

    /// Set the interval unit, keeping the current limit.
    pub fn time_unit(mut self, unit: TimeUnit) -> Self {
        self.rate_limit.interval = RateLimitConfig::per(unit, self.rate_limit.limit).interval;
        self
    }

    /// Set the maximum number of requests per interval.
    pub fn request_limit(mut self, limit: u32) -> Self {
        self.rate_limit.limit = limit;
        self
    }

    /// Set limit and interval at once.
    pub fn rate_limit(mut self, config: RateLimitConfig) -> Self {
        self.rate_limit = config;
        self
    }

    /// Use an existing limiter, sharing its budget with other clients.
    ///
    /// Overrides the rate limit and clock settings.
    pub fn limiter(mut self, limiter: Arc<FixedWindowLimiter>) -> Self {
        self.limiter = Some(limiter);
        self
    }

    /// Set the credentials provider.
    pub fn credentials(mut self, credentials: Arc<dyn CredentialsProvider>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set the time source of the rate limiter.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set a timeout for each HTTP request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the client.
    ///
    /// Fails with [`SubmitError::InvalidConfiguration`] if the endpoint is
    /// missing or malformed, or the rate limit is not positive.
    pub fn build(self) -> Result<DocumentClient> {
        let endpoint = self.endpoint.ok_or_else(|| {
            SubmitError::InvalidConfiguration("endpoint URL is required".to_string())
        })?;
        let endpoint = parse_endpoint(&endpoint)?;

        let limiter = match self.limiter {
            Some(limiter) => limiter,
            None => {
                let clock = self
                    .clock
                    .unwrap_or_else(|| Arc::new(MonotonicClock::new()));
                Arc::new(FixedWindowLimiter::with_clock(self.rate_limit, clock)?)
            }
        };

        // Build default headers.
        let mut headers = HeaderMap::new();
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("document-submit-client/{}", env!("CARGO_PKG_VERSION")));
        let header_value = HeaderValue::from_str(&user_agent)
            .unwrap_or_else(|_| HeaderValue::from_static("document-submit-client"));
        headers.insert(USER_AGENT, header_value);

        let mut reqwest_builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = self.timeout {
            reqwest_builder = reqwest_builder.timeout(timeout);
        }
        let reqwest_client = reqwest_builder.build().map_err(|e| {
            SubmitError::InvalidConfiguration(format!("failed to build HTTP client: {e}"))
        })?;

        let http_client = ClientBuilder::new(reqwest_client)
            .with(TracingMiddleware::default())
            .build();

        let credentials = self
            .credentials
            .unwrap_or_else(|| Arc::new(StaticCredentials::placeholder()));

        Ok(DocumentClient {
            http_client,
            endpoint,
            limiter,
            credentials,
        })
    }
}

impl Default for DocumentClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
