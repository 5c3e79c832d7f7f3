//! Immutable content seed: events, resources and the static copy each page
//! shows. Parsed from TOML once at startup.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::coach::ChatMessage;
use crate::config::ContentConfig;
use crate::error::{ConfigError, CoreError, ValidationError};

const BUILTIN_SEED: &str = include_str!("seed.toml");

/// A campus event. Never mutated after seeding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub time_label: String,
    pub location: String,
    pub distance_label: String,
    pub cost_label: String,
    pub short_description: String,
    pub long_description: String,
}

/// A curated article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub id: String,
    pub category: String,
    pub title: String,
    pub read_time_label: String,
    pub image_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckInSeed {
    pub tags: Vec<String>,
    #[serde(default)]
    pub default_tags: Vec<String>,
    pub default_mood: u8,
    pub default_stress: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodaySeed {
    pub breathing_prompt: String,
    pub coach_insight: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreathingSeed {
    pub title: String,
    pub instructions: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub day: String,
    pub hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepSeed {
    pub score: u32,
    pub score_label: String,
    pub duration_label: String,
    pub target_label: String,
    pub consistency_label: String,
    pub consistency_caption: String,
    pub target_hours: f64,
    pub wind_down_insight: String,
    pub trend: Vec<TrendPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindDownSeed {
    pub title: String,
    pub intro: String,
    pub steps: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoachSeed {
    pub weekly_insight: Vec<String>,
    pub canned_reply: String,
    #[serde(default)]
    pub transcript: Vec<ChatMessage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileStat {
    pub label: String,
    pub value: String,
    pub delta: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSeed {
    pub name: String,
    pub program: String,
    pub joined: String,
    #[serde(default)]
    pub goals: Vec<String>,
    #[serde(default)]
    pub stats: Vec<ProfileStat>,
}

/// The whole seed document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub resources: Vec<Resource>,
    pub checkin: CheckInSeed,
    pub today: TodaySeed,
    pub breathing: BreathingSeed,
    pub sleep: SleepSeed,
    pub wind_down: WindDownSeed,
    pub coach: CoachSeed,
    pub profile: ProfileSeed,
}

impl Catalog {
    /// The seed compiled into the binary.
    ///
    /// # Errors
    ///
    /// Returns an error only if the embedded document is malformed.
    pub fn builtin() -> Result<Self, CoreError> {
        Self::from_toml_str(BUILTIN_SEED)
    }

    /// Parse and validate a seed document.
    ///
    /// # Errors
    ///
    /// Returns a config error for malformed TOML and a validation error for
    /// duplicate ids or default tags missing from the tag list.
    pub fn from_toml_str(content: &str) -> Result<Self, CoreError> {
        let catalog: Catalog = toml::from_str(content).map_err(ConfigError::from)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Read a replacement seed from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }

    /// The seed named by `content.seed_path`, or the built-in one.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured seed cannot be loaded.
    pub fn configured(content: &ContentConfig) -> Result<Self, CoreError> {
        match &content.seed_path {
            Some(path) => Self::load(path),
            None => Self::builtin(),
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        let mut seen = HashSet::new();
        for event in &self.events {
            if !seen.insert(event.id.as_str()) {
                return Err(ValidationError::invalid(
                    "events.id",
                    format!("duplicate id '{}'", event.id),
                ));
            }
        }
        let mut seen = HashSet::new();
        for resource in &self.resources {
            if !seen.insert(resource.id.as_str()) {
                return Err(ValidationError::invalid(
                    "resources.id",
                    format!("duplicate id '{}'", resource.id),
                ));
            }
        }
        if let Some(tag) = self
            .checkin
            .default_tags
            .iter()
            .find(|tag| !self.checkin.tags.contains(tag))
        {
            return Err(ValidationError::invalid(
                "checkin.default_tags",
                format!("'{tag}' is not a known tag"),
            ));
        }
        Ok(())
    }

    pub fn event(&self, id: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    pub fn resource(&self, id: &str) -> Option<&Resource> {
        self.resources.iter().find(|r| r.id == id)
    }

    /// Distinct resource categories, sorted.
    pub fn resource_categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = self.resources.iter().map(|r| r.category.as_str()).collect();
        categories.sort_unstable();
        categories.dedup();
        categories
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_seed_parses() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.events.len(), 5);
        assert_eq!(catalog.resources.len(), 6);
        assert_eq!(catalog.events[0].id, "evt1");
        assert_eq!(catalog.events[0].title, "Wellness Week Yoga");
        assert_eq!(catalog.sleep.trend.len(), 7);
        assert_eq!(catalog.wind_down.steps.len(), 4);
        assert_eq!(catalog.coach.transcript.len(), 5);
        assert_eq!(catalog.profile.goals, vec!["Meditate 5 mins/day", "Sleep 8 hours"]);
    }

    #[test]
    fn lookup_by_id() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.event("evt4").map(|e| e.cost_label.as_str()), Some("Free"));
        assert_eq!(catalog.resource("res5").map(|r| r.category.as_str()), Some("Sleep"));
        assert!(catalog.event("evt99").is_none());
    }

    #[test]
    fn resource_categories_sorted_and_distinct() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(
            catalog.resource_categories(),
            vec!["Campus", "Mental Health", "Sleep", "Study"]
        );
    }

    #[test]
    fn duplicate_event_ids_rejected() {
        let mut doc = BUILTIN_SEED.to_string();
        doc = doc.replacen("id = \"evt2\"", "id = \"evt1\"", 1);
        let err = Catalog::from_toml_str(&doc).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn unknown_default_tag_rejected() {
        let doc = BUILTIN_SEED.replacen("default_tags = [\"Exams\"]", "default_tags = [\"Chess\"]", 1);
        assert!(Catalog::from_toml_str(&doc).is_err());
    }

    #[test]
    fn malformed_seed_is_config_error() {
        let err = Catalog::from_toml_str("events = 3").unwrap_err();
        assert!(matches!(err, CoreError::Config(ConfigError::ParseFailed(_))));
    }
}
