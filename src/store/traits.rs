//! Trait abstraction for the document store to enable mocking in tests

use super::StoreError;
use crate::state::AppointmentRecord;
use async_trait::async_trait;

/// Collection appointments are written to
pub const APPOINTMENTS_COLLECTION: &str = "appointments";

/// Document store operations, enabling mocking in tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AppointmentStore: Send + Sync {
    /// Add a new document to `collection`.
    ///
    /// Returns the resource name the store assigned to the document.
    async fn add_document(
        &self,
        collection: &str,
        record: &AppointmentRecord,
    ) -> Result<String, StoreError>;
}
