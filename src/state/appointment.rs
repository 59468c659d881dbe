//! Appointment draft and record definitions

use chrono::{DateTime, NaiveDate, Utc};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Status every new record is written with
pub const INITIAL_STATUS: &str = "pending";

/// First bookable hour (inclusive)
const FIRST_HOUR: u8 = 9;
/// Last bookable hour (inclusive)
const LAST_HOUR: u8 = 16;

/// An hourly slot between 9:00 and 16:00
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeSlot(u8);

impl TimeSlot {
    /// Create a slot for the given hour, `None` outside 9..=16
    pub fn new(hour: u8) -> Option<Self> {
        (FIRST_HOUR..=LAST_HOUR).contains(&hour).then_some(Self(hour))
    }

    pub fn first() -> Self {
        Self(FIRST_HOUR)
    }

    pub fn last() -> Self {
        Self(LAST_HOUR)
    }

    /// All slots in ascending order
    pub fn all() -> impl Iterator<Item = TimeSlot> {
        (FIRST_HOUR..=LAST_HOUR).map(Self)
    }

    /// Next slot, wrapping from 16:00 back to 9:00
    pub fn next(&self) -> Self {
        if self.0 >= LAST_HOUR {
            Self::first()
        } else {
            Self(self.0 + 1)
        }
    }

    /// Previous slot, wrapping from 9:00 to 16:00
    pub fn prev(&self) -> Self {
        if self.0 <= FIRST_HOUR {
            Self::last()
        } else {
            Self(self.0 - 1)
        }
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:00", self.0)
    }
}

/// Error returned when a string is not one of the bookable slots
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("not a bookable time slot: {0:?}")]
pub struct InvalidTimeSlot(String);

impl FromStr for TimeSlot {
    type Err = InvalidTimeSlot;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_suffix(":00")
            .and_then(|hour| hour.parse::<u8>().ok())
            .and_then(TimeSlot::new)
            .ok_or_else(|| InvalidTimeSlot(s.to_string()))
    }
}

/// Reasons a draft cannot be submitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please select both date and time")]
    MissingSchedule,
    #[error("Please enter your name")]
    MissingName,
    #[error("Please enter your email")]
    MissingEmail,
}

/// In-memory appointment input, not yet persisted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentDraft {
    pub name: String,
    pub email: String,
    pub date: Option<NaiveDate>,
    pub time: Option<TimeSlot>,
    pub notes: String,
}

impl AppointmentDraft {
    /// Check the required fields.
    ///
    /// Name and email are checked first, the way a browser form's
    /// `required` attribute would stop it; any non-empty value passes. Date
    /// and time are checked last.
    pub fn validate(&self) -> Result<(NaiveDate, TimeSlot), ValidationError> {
        if self.name.is_empty() {
            return Err(ValidationError::MissingName);
        }
        if self.email.is_empty() {
            return Err(ValidationError::MissingEmail);
        }
        let (Some(date), Some(time)) = (self.date, self.time) else {
            return Err(ValidationError::MissingSchedule);
        };
        Ok((date, time))
    }

    /// Build the record to persist. This is the only way to obtain an
    /// [`AppointmentRecord`], so partial drafts can never be written.
    pub fn to_record(
        &self,
        created_at: DateTime<Utc>,
    ) -> Result<AppointmentRecord, ValidationError> {
        let (date, time) = self.validate()?;
        Ok(AppointmentRecord {
            name: self.name.clone(),
            email: self.email.clone(),
            date,
            time,
            notes: self.notes.clone(),
            status: INITIAL_STATUS.to_string(),
            created_at,
        })
    }
}

/// An appointment as written to the document store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentRecord {
    pub name: String,
    pub email: String,
    pub date: NaiveDate,
    pub time: TimeSlot,
    pub notes: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}
