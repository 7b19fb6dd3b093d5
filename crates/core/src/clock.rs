// crates/core/src/clock.rs

//! Injected time source for timestamps written by tools.

use chrono::{NaiveDate, NaiveDateTime, Utc};

use crate::error::ToolError;

/// Timestamp layout used in every record.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Date layout used for date-valued fields.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Instant used by fixtures and tests.
pub const DEFAULT_FIXTURE_TIMESTAMP: &str = "2025-12-12T12:00:00";

pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;

    fn timestamp(&self) -> String {
        self.now().format(TIMESTAMP_FORMAT).to_string()
    }

    fn today(&self) -> NaiveDate {
        self.now().date()
    }

    fn today_string(&self) -> String {
        self.today().format(DATE_FORMAT).to_string()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(NaiveDateTime);

impl FixedClock {
    pub fn new(at: NaiveDateTime) -> Self {
        Self(at)
    }

    /// Parse `YYYY-MM-DDTHH:MM:SS`.
    pub fn parse(s: &str) -> Result<Self, ToolError> {
        NaiveDateTime::parse_from_str(s.trim(), TIMESTAMP_FORMAT)
            .map(Self)
            .map_err(|e| ToolError::malformed(format!("Invalid timestamp '{}': {}", s, e)))
    }

    pub fn fixture() -> Self {
        // The constant is known to parse.
        Self::parse(DEFAULT_FIXTURE_TIMESTAMP).unwrap_or_else(|_| Self(NaiveDateTime::default()))
    }
}

impl Default for FixedClock {
    fn default() -> Self {
        Self::fixture()
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Wall-clock time in UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Utc::now().naive_utc()
    }
}
