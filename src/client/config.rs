//! Client configuration.

use url::Url;

use crate::Result;
use crate::error::SubmitError;
use crate::rate_limit::RateLimitConfig;
use crate::types::TimeUnit;

/// Environment variable holding the endpoint URL.
pub const ENDPOINT_ENV_VAR: &str = "DOCUMENT_API_ENDPOINT";

/// Environment variable holding the request limit per interval.
pub const REQUEST_LIMIT_ENV_VAR: &str = "DOCUMENT_API_REQUEST_LIMIT";

/// Environment variable holding the interval unit (defaults to seconds).
pub const TIME_UNIT_ENV_VAR: &str = "DOCUMENT_API_TIME_UNIT";

/// Everything needed to construct a [`DocumentClient`](crate::client::DocumentClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Interval unit; the limit applies per one unit.
    pub time_unit: TimeUnit,
    /// Maximum requests per interval.
    pub request_limit: u32,
    /// Full URL of the document creation endpoint.
    pub endpoint: String,
}

impl ClientConfig {
    /// Create a configuration.
    pub fn new(time_unit: TimeUnit, request_limit: u32, endpoint: impl Into<String>) -> Self {
        Self {
            time_unit,
            request_limit,
            endpoint: endpoint.into(),
        }
    }

    /// Load the configuration from environment variables.
    ///
    /// Reads `DOCUMENT_API_ENDPOINT`, `DOCUMENT_API_REQUEST_LIMIT` and
    /// the optional `DOCUMENT_API_TIME_UNIT`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load the configuration through a variable lookup function.
    ///
    /// Uses the same variable names and defaults as [`from_env`](Self::from_env).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let endpoint = required_var(&lookup, ENDPOINT_ENV_VAR)?;
        let request_limit = required_var(&lookup, REQUEST_LIMIT_ENV_VAR)?
            .trim()
            .parse::<u32>()
            .map_err(|e| {
                SubmitError::InvalidConfiguration(format!("{REQUEST_LIMIT_ENV_VAR}: {e}"))
            })?;
        let time_unit = match lookup(TIME_UNIT_ENV_VAR) {
            Some(value) => value.parse()?,
            None => TimeUnit::default(),
        };

        let config = Self::new(time_unit, request_limit, endpoint);
        config.validate()?;
        Ok(config)
    }

    /// The rate limit this configuration describes.
    pub fn rate_limit(&self) -> RateLimitConfig {
        RateLimitConfig::per(self.time_unit, self.request_limit)
    }

    /// Parse the endpoint as an absolute http(s) URL.
    pub fn endpoint_url(&self) -> Result<Url> {
        parse_endpoint(&self.endpoint)
    }

    /// Check the limit and the endpoint.
    pub fn validate(&self) -> Result<()> {
        self.rate_limit().validate()?;
        self.endpoint_url()?;
        Ok(())
    }
}

pub(crate) fn parse_endpoint(endpoint: &str) -> Result<Url> {
    let url = Url::parse(endpoint).map_err(|e| {
        SubmitError::InvalidConfiguration(format!("invalid endpoint URL {endpoint:?}: {e}"))
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(SubmitError::InvalidConfiguration(format!(
            "unsupported endpoint scheme: {other}"
        ))),
    }
}

fn required_var(lookup: impl Fn(&str) -> Option<String>, name: &str) -> Result<String> {
    lookup(name).ok_or_else(|| {
        SubmitError::InvalidConfiguration(format!("environment variable {name} not set"))
    })
}
