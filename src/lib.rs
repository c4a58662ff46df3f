//! # Document Submit Client
//!
//! An async client for a document registration API that caps the number of
//! requests sent per time interval.
//!
//! ## Features
//!
//! - Lock-free fixed window rate limiting shared across tasks and threads
//! - Immediate rejection of over-limit submissions, with no network traffic
//! - Pluggable authorization credentials with redacted secrets
//! - Typed errors for every failure mode; nothing is retried behind your back
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use document_submit_client::client::DocumentClient;
//! use document_submit_client::types::{Document, TimeUnit};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = DocumentClient::new(
//!         TimeUnit::Seconds,
//!         9,
//!         "http://localhost:8080/api/v3/lk/documents/create",
//!     )?;
//!     let document = Document::new(
//!         "MANUAL",
//!         "<payload>",
//!         "milk",
//!         "<signature>",
//!         "LP_INTRODUCE_GOODS",
//!     );
//!     let result = client.submit(&document).await?;
//!     println!("Document id: {}", result.doc_id);
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod codec;
pub mod error;
pub mod rate_limit;
pub mod types;

// Re-export commonly used types at crate root
pub use client::{ClientConfig, DocumentClient};
pub use error::SubmitError;
pub use types::{Document, SubmissionResult, TimeUnit};

/// Result type alias using SubmitError
pub type Result<T> = std::result::Result<T, SubmitError>;
