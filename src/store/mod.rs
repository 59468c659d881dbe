//! Document store module for persisting appointments

mod error;
mod firestore;
mod traits;

pub use error::StoreError;
pub use firestore::FirestoreClient;
pub use traits::{AppointmentStore, APPOINTMENTS_COLLECTION};

#[cfg(test)]
pub use traits::MockAppointmentStore;
