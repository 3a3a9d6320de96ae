use chrono::NaiveDate;
use std::collections::HashMap;
use std::path::Path;

use super::entry::{date_key, encode_media, DayEntry, MediaKind};
use super::mood::MoodType;
use super::settings::{SettingsCommand, UserSettings};
use crate::affirmation::{Affirmation, AffirmationClient};

/// One pass through select mood → write note → request affirmation → confirm.
#[derive(Debug, Clone)]
pub struct CheckIn {
    date: NaiveDate,
    mood: Option<MoodType>,
    note: String,
    media: Option<(String, MediaKind)>,
    active_goals: HashMap<String, bool>,
    affirmation: Option<Affirmation>,
}

impl CheckIn {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            mood: None,
            note: String::new(),
            media: None,
            active_goals: HashMap::new(),
            affirmation: None,
        }
    }

    pub fn date_key(&self) -> String {
        date_key(self.date)
    }

    pub fn select_mood(&mut self, mood: MoodType) -> &mut Self {
        self.mood = Some(mood);
        self
    }

    pub fn write_note(&mut self, note: impl Into<String>) -> &mut Self {
        self.note = note.into();
        self
    }

    pub fn attach_media(&mut self, path: &Path, bytes: &[u8]) -> &mut Self {
        self.media = Some(encode_media(path, bytes));
        self
    }

    /// Flip today's mark for a goal. Goals disabled in `settings` are not offered.
    pub fn toggle_goal(&mut self, settings: &UserSettings, goal_id: &str) -> bool {
        if !settings.enabled_goals().any(|g| g.id == goal_id) {
            return false;
        }
        let mark = self.active_goals.entry(goal_id.to_string()).or_insert(false);
        *mark = !*mark;
        true
    }

    /// Create a custom goal and mark it done for this day. Returns the updated settings,
    /// or `None` for a blank label.
    pub fn add_goal(
        &mut self,
        settings: &UserSettings,
        label: &str,
        icon: &str,
    ) -> Option<UserSettings> {
        let updated = settings.clone().apply(SettingsCommand::AddGoal {
            label: label.to_string(),
            icon: icon.to_string(),
        });
        if updated.goals.len() == settings.goals.len() {
            return None;
        }
        // New goals are appended.
        let goal = updated.goals.last()?;
        self.active_goals.insert(goal.id.clone(), true);
        Some(updated)
    }

    pub fn affirmation(&self) -> Option<&Affirmation> {
        self.affirmation.as_ref()
    }

    /// Request the affirmation for the chosen mood and note. Without a mood this does nothing.
    pub async fn plant(&mut self, client: &AffirmationClient) -> Option<&Affirmation> {
        let mood = self.mood?;
        let affirmation = client.affirm(mood, &self.note).await;
        self.affirmation = Some(affirmation);
        self.affirmation.as_ref()
    }

    /// The finished entry, or `None` while the mood or the affirmation is still missing.
    pub fn finish(&self) -> Option<DayEntry> {
        let mood = self.mood?;
        let affirmation = self.affirmation.as_ref()?;
        Some(DayEntry {
            date: date_key(self.date),
            mood,
            note: self.note.clone(),
            affirmation: Some(affirmation.text().to_string()),
            media: self.media.as_ref().map(|(uri, _)| uri.clone()),
            media_type: self.media.as_ref().map(|(_, kind)| *kind),
            goals: Some(self.active_goals.clone()),
        })
    }
}
