//! Daily mood/stress check-ins, kept in memory for the session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Both scales run 1..=5.
pub const SCALE_MIN: u8 = 1;
pub const SCALE_MAX: u8 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckIn {
    /// 1 = low, 5 = great
    pub mood: u8,
    /// 1 = low, 5 = high
    pub stress: u8,
    pub tags: Vec<String>,
    pub logged_at: DateTime<Utc>,
}

impl CheckIn {
    /// Build a check-in, validating both scales and every tag against
    /// `known_tags`. Repeated tags are collapsed.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the first offending field.
    pub fn new(
        mood: u8,
        stress: u8,
        tags: &[String],
        known_tags: &[String],
        logged_at: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        check_scale("mood", mood)?;
        check_scale("stress", stress)?;

        let mut picked: Vec<String> = Vec::with_capacity(tags.len());
        for tag in tags {
            if !known_tags.contains(tag) {
                return Err(ValidationError::invalid("tags", format!("unknown tag '{tag}'")));
            }
            if !picked.contains(tag) {
                picked.push(tag.clone());
            }
        }

        Ok(Self {
            mood,
            stress,
            tags: picked,
            logged_at,
        })
    }

    pub fn summary(&self) -> String {
        format!(
            "Logged: Mood {}/{SCALE_MAX}, Stress {}/{SCALE_MAX}",
            self.mood, self.stress
        )
    }
}

pub(crate) fn check_scale(field: &str, value: u8) -> Result<u8, ValidationError> {
    if (SCALE_MIN..=SCALE_MAX).contains(&value) {
        Ok(value)
    } else {
        Err(ValidationError::invalid(
            field,
            format!("must be between {SCALE_MIN} and {SCALE_MAX} (got {value})"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags() -> Vec<String> {
        ["Exams", "Homework", "Sleep"].map(String::from).to_vec()
    }

    #[test]
    fn valid_check_in() {
        let picked = vec!["Exams".to_string(), "Sleep".to_string(), "Exams".to_string()];
        let check_in = CheckIn::new(3, 2, &picked, &tags(), Utc::now()).unwrap();
        assert_eq!(check_in.tags, vec!["Exams", "Sleep"]);
        assert_eq!(check_in.summary(), "Logged: Mood 3/5, Stress 2/5");
    }

    #[test]
    fn scale_bounds_enforced() {
        assert!(CheckIn::new(0, 2, &[], &tags(), Utc::now()).is_err());
        assert!(CheckIn::new(3, 6, &[], &tags(), Utc::now()).is_err());
        assert!(CheckIn::new(5, 1, &[], &tags(), Utc::now()).is_ok());
    }

    #[test]
    fn unknown_tag_rejected() {
        let err = CheckIn::new(3, 2, &["Chess".to_string()], &tags(), Utc::now()).unwrap_err();
        assert!(err.to_string().contains("Chess"));
    }
}
