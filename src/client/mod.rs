//! Rate-limited document submission client.

mod config;
mod submitter;

pub use config::{ClientConfig, ENDPOINT_ENV_VAR, REQUEST_LIMIT_ENV_VAR, TIME_UNIT_ENV_VAR};
pub use submitter::{DocumentClient, DocumentClientBuilder};
