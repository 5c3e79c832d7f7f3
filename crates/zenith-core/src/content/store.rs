//! Content store: the seeded catalog plus the two user rosters.
//!
//! Invariants:
//! - The schedule holds catalog event ids only, each at most once, in RSVP
//!   order.
//! - The goal list never holds the same text twice.

use tracing::info;

use super::catalog::{Catalog, Event, Resource};
use crate::error::ContentError;

#[derive(Debug, Clone)]
pub struct ContentStore {
    catalog: Catalog,
    schedule: Vec<String>,
    goals: Vec<String>,
}

impl ContentStore {
    /// Seed the goal list from the catalog's profile, dropping repeats.
    pub fn new(catalog: Catalog) -> Self {
        let mut goals: Vec<String> = Vec::with_capacity(catalog.profile.goals.len());
        for goal in &catalog.profile.goals {
            if !goals.contains(goal) {
                goals.push(goal.clone());
            }
        }
        Self {
            catalog,
            schedule: Vec::new(),
            goals,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn list_events(&self) -> &[Event] {
        &self.catalog.events
    }

    pub fn list_resources(&self) -> &[Resource] {
        &self.catalog.resources
    }

    pub fn event(&self, id: &str) -> Option<&Event> {
        self.catalog.event(id)
    }

    pub fn resource(&self, id: &str) -> Option<&Resource> {
        self.catalog.resource(id)
    }

    /// Resources in `category`, or all of them for `None`.
    pub fn resources_in(&self, category: Option<&str>) -> Vec<&Resource> {
        self.catalog
            .resources
            .iter()
            .filter(|r| category.map_or(true, |c| r.category == c))
            .collect()
    }

    // ── Schedule ─────────────────────────────────────────────────────

    pub fn schedule(&self) -> &[String] {
        &self.schedule
    }

    pub fn is_scheduled(&self, event_id: &str) -> bool {
        self.schedule.iter().any(|id| id == event_id)
    }

    /// Scheduled events in RSVP order.
    pub fn scheduled_events(&self) -> impl Iterator<Item = &Event> + '_ {
        self.schedule.iter().filter_map(|id| self.catalog.event(id))
    }

    /// Add an event to the schedule. Returns `true` if it was newly added;
    /// repeating an RSVP succeeds without duplicating the entry.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the id is not in the catalog.
    pub fn rsvp(&mut self, event_id: &str) -> Result<bool, ContentError> {
        let event = self.catalog.event(event_id).ok_or_else(|| ContentError::NotFound {
            id: event_id.to_string(),
        })?;
        if self.is_scheduled(event_id) {
            return Ok(false);
        }
        self.schedule.push(event.id.clone());
        info!(event_id, "rsvp added");
        Ok(true)
    }

    /// # Errors
    ///
    /// Returns `NotInSchedule` when the id was never RSVP'd.
    pub fn cancel_rsvp(&mut self, event_id: &str) -> Result<(), ContentError> {
        let pos = self
            .schedule
            .iter()
            .position(|id| id == event_id)
            .ok_or_else(|| ContentError::NotInSchedule {
                id: event_id.to_string(),
            })?;
        self.schedule.remove(pos);
        info!(event_id, "rsvp cancelled");
        Ok(())
    }

    // ── Goals ────────────────────────────────────────────────────────

    pub fn goals(&self) -> &[String] {
        &self.goals
    }

    /// # Errors
    ///
    /// Returns `EmptyGoal` for blank text and `DuplicateGoal` when the exact
    /// text is already listed.
    pub fn add_goal(&mut self, text: &str) -> Result<(), ContentError> {
        if text.trim().is_empty() {
            return Err(ContentError::EmptyGoal);
        }
        if self.goals.iter().any(|g| g == text) {
            return Err(ContentError::DuplicateGoal {
                goal: text.to_string(),
            });
        }
        self.goals.push(text.to_string());
        Ok(())
    }

    /// Remove and return the goal at `index`.
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` when `index` is past the end.
    pub fn remove_goal(&mut self, index: usize) -> Result<String, ContentError> {
        if index >= self.goals.len() {
            return Err(ContentError::OutOfRange {
                index,
                len: self.goals.len(),
            });
        }
        Ok(self.goals.remove(index))
    }
}
