//! Appointment submission workflow
//!
//! A submit attempt moves `Idle -> Submitting -> Settled -> Idle`. Drafts that
//! fail validation are turned away while still `Idle`, and a request made
//! while `Submitting` is refused, so at most one write is in flight.

use super::notifications::NotificationSink;
use super::{AppointmentDraft, AppointmentRecord};
use crate::store::{AppointmentStore, StoreError, APPOINTMENTS_COLLECTION};
use chrono::{DateTime, Utc};
use tracing::Instrument;
use uuid::Uuid;

pub const SUCCESS_MESSAGE: &str = "Appointment booked successfully!";
pub const FAILURE_MESSAGE: &str = "Failed to book appointment";

/// Terminal result of one submit attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Booked,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitPhase {
    #[default]
    Idle,
    Submitting,
    Settled(SubmitOutcome),
}

/// Tracks the submit state machine for one open modal
#[derive(Debug, Default)]
pub struct SubmitWorkflow {
    phase: SubmitPhase,
}

impl SubmitWorkflow {
    /// Whether a write is in flight; the submit trigger is disabled while true
    pub fn is_submitting(&self) -> bool {
        matches!(self.phase, SubmitPhase::Submitting)
    }

    /// Validate `draft` and, if complete, enter `Submitting`.
    ///
    /// Returns the record to persist. A rejected draft emits one error
    /// notification and leaves the workflow `Idle`; a request while already
    /// `Submitting` is ignored.
    pub fn try_begin(
        &mut self,
        draft: &AppointmentDraft,
        created_at: DateTime<Utc>,
        sink: &mut impl NotificationSink,
    ) -> Option<AppointmentRecord> {
        if self.is_submitting() {
            tracing::debug!("submit ignored, a booking is already in flight");
            return None;
        }

        match draft.to_record(created_at) {
            Ok(record) => {
                self.phase = SubmitPhase::Submitting;
                Some(record)
            }
            Err(reason) => {
                tracing::debug!(%reason, "draft rejected");
                sink.notify_error(&reason.to_string());
                None
            }
        }
    }

    /// Report the result of the persistence call and return to `Idle`.
    ///
    /// `close` runs only when the record was written.
    pub fn settle(
        &mut self,
        result: Result<String, StoreError>,
        sink: &mut impl NotificationSink,
        close: impl FnOnce(),
    ) -> SubmitOutcome {
        let outcome = match &result {
            Ok(_) => SubmitOutcome::Booked,
            Err(_) => SubmitOutcome::Failed,
        };
        self.phase = SubmitPhase::Settled(outcome);

        match result {
            Ok(document) => {
                tracing::info!(%document, "appointment booked");
                sink.notify_success(SUCCESS_MESSAGE);
                close();
            }
            Err(err) => {
                tracing::error!(error = %err, "error booking appointment");
                sink.notify_error(FAILURE_MESSAGE);
            }
        }

        // Settled always falls back to Idle
        if let SubmitPhase::Settled(settled) = std::mem::take(&mut self.phase) {
            tracing::debug!(outcome = ?settled, "submit attempt settled");
        }
        outcome
    }
}

/// Write `record` to the appointments collection inside an attempt span
pub async fn persist(
    store: &dyn AppointmentStore,
    record: &AppointmentRecord,
) -> Result<String, StoreError> {
    store
        .add_document(APPOINTMENTS_COLLECTION, record)
        .instrument(tracing::info_span!("submit_attempt", attempt = %Uuid::new_v4()))
        .await
}
