//! Top-level navigation tabs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    #[default]
    Today,
    Focus,
    Sleep,
    Events,
    MySchedule,
    Resources,
    Coach,
    Profile,
}

impl Tab {
    /// Sidebar order.
    pub const ALL: [Tab; 8] = [
        Tab::Today,
        Tab::Focus,
        Tab::Sleep,
        Tab::Events,
        Tab::MySchedule,
        Tab::Resources,
        Tab::Coach,
        Tab::Profile,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Today => "Today",
            Tab::Focus => "Focus",
            Tab::Sleep => "Sleep",
            Tab::Events => "Events",
            Tab::MySchedule => "My Schedule",
            Tab::Resources => "Resources",
            Tab::Coach => "AI Coach",
            Tab::Profile => "Profile",
        }
    }

    pub fn index(self) -> usize {
        Tab::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    pub fn next(self) -> Tab {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    pub fn prev(self) -> Tab {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Tab {
    type Err = ValidationError;

    /// Accepts the label or the snake_case name, case-insensitively
    /// ("My Schedule", "my_schedule", "my-schedule", "ai coach", "coach").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| c.is_alphanumeric())
            .flat_map(char::to_lowercase)
            .collect();
        Tab::ALL
            .into_iter()
            .find(|tab| {
                let name: String = tab
                    .label()
                    .chars()
                    .filter(|c| c.is_alphanumeric())
                    .flat_map(char::to_lowercase)
                    .collect();
                name == wanted || (*tab == Tab::Coach && wanted == "coach")
            })
            .ok_or_else(|| ValidationError::invalid("tab", format!("unknown tab '{s}'")))
    }
}
