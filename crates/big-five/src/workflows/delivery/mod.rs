//! Hands finalized submissions to the spreadsheet that collects results.

pub mod sheets;

pub use sheets::{GoogleSheetsSink, SheetsConnector};

use crate::workflows::assessment::SubmissionRecord;

/// Outbound destination for finalized submissions.
///
/// Delivery is a single blocking attempt: no retry, no queueing. A failed record is
/// reported to the caller and dropped.
pub trait SubmissionSink: Send + Sync {
    fn deliver(&self, record: &SubmissionRecord) -> Result<(), DeliveryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("spreadsheet append failed: {0}")]
    Backend(String),
    #[error("spreadsheet credentials unavailable: {0}")]
    Credentials(String),
    #[error("delivery runtime unavailable: {0}")]
    Runtime(String),
}
