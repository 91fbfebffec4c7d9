//! Completion summary text.

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::value_object::ValueObject;

/// `M/D/YYYY, h:mm:ss AM` rendering used for the summary timestamp.
const TIMESTAMP_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Summary of one dispatched batch, published once every send has settled.
///
/// Always reports the batch size, not the number of successful sends.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    batch_size: usize,
}

impl ValueObject for BatchSummary {}

impl BatchSummary {
    pub fn new(batch_size: usize) -> Self {
        Self { batch_size }
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn headline(&self) -> String {
        format!("Sent {} Messages To Queue", self.batch_size)
    }

    /// Notification message stamped with the given local time.
    pub fn message_at(&self, timestamp: NaiveDateTime) -> String {
        format!("{}: {}", self.headline(), timestamp.format(TIMESTAMP_FORMAT))
    }

    /// Notification message stamped with the current local time.
    pub fn message_now(&self) -> String {
        self.message_at(Local::now().naive_local())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 7)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn headline_reports_batch_size() {
        assert_eq!(BatchSummary::new(3).headline(), "Sent 3 Messages To Queue");
        assert_eq!(BatchSummary::new(0).headline(), "Sent 0 Messages To Queue");
    }

    #[test]
    fn afternoon_timestamp_uses_twelve_hour_clock() {
        assert_eq!(
            BatchSummary::new(3).message_at(at(15, 4, 5)),
            "Sent 3 Messages To Queue: 3/7/2026, 3:04:05 PM"
        );
    }

    #[test]
    fn midnight_renders_as_twelve_am() {
        assert_eq!(
            BatchSummary::new(12).message_at(at(0, 0, 9)),
            "Sent 12 Messages To Queue: 3/7/2026, 12:00:09 AM"
        );
    }

    #[test]
    fn message_now_has_headline_prefix() {
        let msg = BatchSummary::new(7).message_now();
        assert!(msg.starts_with("Sent 7 Messages To Queue: "));
        assert!(msg.ends_with("AM") || msg.ends_with("PM"));
    }
}
