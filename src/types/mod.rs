//! Payload and configuration types.

pub mod document;
pub mod time_unit;

pub use document::{Document, SubmissionResult};
pub use time_unit::TimeUnit;
