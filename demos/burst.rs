//! Example: Two bursts of submissions against a rate-limited endpoint.
//!
//! Sends ten documents, waits, then sends ten more. With the default limit of
//! nine per second, one submission in each burst is rejected locally.
//!
//! Run with: cargo run --example burst
//!
//! Configuration is read from the environment (a `.env` file works too):
//! `DOCUMENT_API_ENDPOINT`, `DOCUMENT_API_REQUEST_LIMIT`, `DOCUMENT_API_TIME_UNIT`
//! and `DOCUMENT_API_TOKEN`.

use std::sync::Arc;
use std::time::Duration;

use document_submit_client::auth::{CredentialsProvider, EnvCredentials, StaticCredentials};
use document_submit_client::client::{ClientConfig, DocumentClient};
use document_submit_client::types::{Document, TimeUnit};
use tracing_subscriber::EnvFilter;

const DEFAULT_ENDPOINT: &str = "http://localhost:8080/api/v3/lk/documents/create";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ClientConfig::from_env()
        .unwrap_or_else(|_| ClientConfig::new(TimeUnit::Seconds, 9, DEFAULT_ENDPOINT));
    let credentials: Arc<dyn CredentialsProvider> = match EnvCredentials::try_from_env() {
        Some(env) => Arc::new(env),
        None => Arc::new(StaticCredentials::placeholder()),
    };

    let client = DocumentClient::builder()
        .endpoint(config.endpoint.clone())
        .rate_limit(config.rate_limit())
        .credentials(credentials)
        .timeout(Duration::from_secs(10))
        .build()?;

    println!(
        "Submitting to {} ({} per {})",
        client.endpoint(),
        config.request_limit,
        config.time_unit
    );

    for burst in 1..=2 {
        for i in 1..=10 {
            match client.submit(&Document::default()).await {
                Ok(result) => println!("[burst {burst}] #{i}: registered {}", result.doc_id),
                Err(e) if e.is_rate_limited() => println!("[burst {burst}] #{i}: {e}"),
                Err(e) => println!("[burst {burst}] #{i}: failed: {e}"),
            }
        }
        if burst == 1 {
            tokio::time::sleep(Duration::from_secs(5)).await;
        }
    }

    Ok(())
}
