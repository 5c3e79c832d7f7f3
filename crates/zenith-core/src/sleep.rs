//! Sleep log entries, kept in memory for the session.

use chrono::{Duration, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::checkin::check_scale;
use crate::error::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SleepEntry {
    pub night_of: NaiveDate,
    pub bed_time: NaiveTime,
    pub wake_time: NaiveTime,
    /// 1 = poor, 5 = great
    pub quality: u8,
}

impl SleepEntry {
    /// # Errors
    ///
    /// Returns a validation error when `quality` is outside 1..=5.
    pub fn new(
        night_of: NaiveDate,
        bed_time: NaiveTime,
        wake_time: NaiveTime,
        quality: u8,
    ) -> Result<Self, ValidationError> {
        check_scale("quality", quality)?;
        Ok(Self {
            night_of,
            bed_time,
            wake_time,
            quality,
        })
    }

    /// Time asleep. A wake time at or before the bed time means the next day.
    pub fn duration(&self) -> Duration {
        let span = self.wake_time - self.bed_time;
        if span <= Duration::zero() {
            span + Duration::days(1)
        } else {
            span
        }
    }

    /// "7h 45m"
    pub fn duration_label(&self) -> String {
        let minutes = self.duration().num_minutes();
        format!("{}h {:02}m", minutes / 60, minutes % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn night() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    #[test]
    fn duration_spans_midnight() {
        let entry = SleepEntry::new(night(), t(23, 30), t(7, 15), 4).unwrap();
        assert_eq!(entry.duration(), Duration::minutes(7 * 60 + 45));
        assert_eq!(entry.duration_label(), "7h 45m");
    }

    #[test]
    fn duration_same_day() {
        let entry = SleepEntry::new(night(), t(1, 0), t(9, 5), 3).unwrap();
        assert_eq!(entry.duration_label(), "8h 05m");
    }

    #[test]
    fn quality_out_of_range() {
        assert!(SleepEntry::new(night(), t(23, 0), t(7, 0), 0).is_err());
        assert!(SleepEntry::new(night(), t(23, 0), t(7, 0), 6).is_err());
    }
}
