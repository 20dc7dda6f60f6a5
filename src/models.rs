//! Data models for the volunteer events API.
//!
//! These structures match the JSON records served at `/events`.
//! Fields this screen never reads are still carried so a record
//! round-trips through the crate unchanged.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::EventMapError;

/// A volunteering opportunity.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Unique event ID (marker key and navigation parameter)
    pub id: String,

    /// Display name
    #[serde(default)]
    pub name: String,

    /// Display text
    #[serde(default)]
    pub description: String,

    /// Organizer user ID (pass-through)
    #[serde(default)]
    pub organizer_id: String,

    /// Scheduled time, ISO-8601
    pub date_time: String,

    /// Where the event takes place
    pub position: Position,

    /// Volunteers still needed (pass-through)
    #[serde(default)]
    pub volunteers_needed: u32,

    /// IDs of volunteers already signed up (pass-through)
    #[serde(default)]
    pub volunteers_ids: Vec<String>,
}

impl Event {
    /// Validate the event structure.
    ///
    /// # Errors
    ///
    /// Returns an error if the ID is empty or a coordinate is not finite.
    pub fn validate(&self) -> Result<(), EventMapError> {
        if self.id.is_empty() {
            return Err(EventMapError::Validation("empty event ID".into()));
        }
        if !self.position.is_finite() {
            return Err(EventMapError::Validation(format!(
                "event {} has non-finite position ({}, {})",
                self.id, self.position.latitude, self.position.longitude
            )));
        }
        Ok(())
    }

    /// Get the scheduled time as a `DateTime<Utc>`.
    ///
    /// Accepts RFC 3339, an ISO 8601 date-time without offset, or a bare
    /// `YYYY-MM-DD` date. Values without an offset are read as UTC, so a
    /// bare date means midnight UTC.
    ///
    /// Returns `None` when `dateTime` is none of these.
    #[must_use]
    pub fn scheduled_at(&self) -> Option<DateTime<Utc>> {
        let s = self.date_time.trim();
        if let Ok(t) = DateTime::parse_from_rfc3339(s) {
            return Some(t.with_timezone(&Utc));
        }
        if let Ok(t) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(t.and_utc());
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|t| t.and_utc())
    }
}

/// Geographic position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

impl Position {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}
