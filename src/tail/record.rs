use std::fmt;

use chrono::{DateTime, Local, Timelike};

/// Display format for record timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A translated line stamped with the wall-clock time it was read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRecord {
    pub timestamp: DateTime<Local>,
    pub text: String,
}

impl DisplayRecord {
    /// Creates a record, truncating the timestamp to whole seconds.
    pub fn new(timestamp: DateTime<Local>, text: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.with_nanosecond(0).unwrap_or(timestamp),
            text: text.into(),
        }
    }

    /// Creates a record stamped with the current local time.
    pub fn now(text: impl Into<String>) -> Self {
        Self::new(Local::now(), text)
    }
}

impl fmt::Display for DisplayRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.text
        )
    }
}
