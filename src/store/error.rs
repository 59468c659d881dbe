//! Document store errors

use thiserror::Error;

/// A failed write to the document store
#[derive(Debug, Error)]
pub enum StoreError {
    /// The request never produced an HTTP response
    #[error("request to document store failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The store answered with a non-success status
    #[error("document store rejected write ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// The store answered with a body we could not understand
    #[error("unexpected response from document store: {0}")]
    InvalidResponse(String),

    /// The write task ended without reporting a result
    #[error("submission ended without a result")]
    Interrupted,
}
