//! Profile toggles. In-memory only; nothing is delivered or synced.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingKey {
    PushNotifications,
    CalendarSync,
    PersonalizeCoach,
    ShareAnonymizedData,
}

impl SettingKey {
    pub const ALL: [SettingKey; 4] = [
        SettingKey::PushNotifications,
        SettingKey::CalendarSync,
        SettingKey::PersonalizeCoach,
        SettingKey::ShareAnonymizedData,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SettingKey::PushNotifications => "Enable Push Notifications",
            SettingKey::CalendarSync => "Sync with Calendar",
            SettingKey::PersonalizeCoach => "Personalize AI Coach",
            SettingKey::ShareAnonymizedData => "Share Anonymized Data for Research",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSettings {
    pub push_notifications: bool,
    pub calendar_sync: bool,
    pub personalize_coach: bool,
    pub share_anonymized_data: bool,
}

impl Default for ProfileSettings {
    fn default() -> Self {
        Self {
            push_notifications: true,
            calendar_sync: true,
            personalize_coach: true,
            share_anonymized_data: true,
        }
    }
}

impl ProfileSettings {
    pub fn get(&self, key: SettingKey) -> bool {
        match key {
            SettingKey::PushNotifications => self.push_notifications,
            SettingKey::CalendarSync => self.calendar_sync,
            SettingKey::PersonalizeCoach => self.personalize_coach,
            SettingKey::ShareAnonymizedData => self.share_anonymized_data,
        }
    }

    /// Flip `key` and return its new value.
    pub fn toggle(&mut self, key: SettingKey) -> bool {
        let slot = match key {
            SettingKey::PushNotifications => &mut self.push_notifications,
            SettingKey::CalendarSync => &mut self.calendar_sync,
            SettingKey::PersonalizeCoach => &mut self.personalize_coach,
            SettingKey::ShareAnonymizedData => &mut self.share_anonymized_data,
        };
        *slot = !*slot;
        *slot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_on_by_default() {
        let settings = ProfileSettings::default();
        assert!(SettingKey::ALL.iter().all(|k| settings.get(*k)));
    }

    #[test]
    fn toggle_flips_one_key() {
        let mut settings = ProfileSettings::default();
        assert!(!settings.toggle(SettingKey::CalendarSync));
        assert!(!settings.calendar_sync);
        assert!(settings.push_notifications);
        assert!(settings.toggle(SettingKey::CalendarSync));
    }
}
