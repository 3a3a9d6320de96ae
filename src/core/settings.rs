use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use tracing::warn;
use uuid::Uuid;

/// Prefix marking a goal the user created (and may delete).
pub const CUSTOM_GOAL_PREFIX: &str = "custom-";

pub const DEFAULT_GOAL_ICON: &str = "✨";

fn default_goal_icon() -> String {
    DEFAULT_GOAL_ICON.to_string()
}

/// A daily ritual shown on the check-in checklist while enabled.
///
/// Only `id` is required when reading a stored goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserGoal {
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_goal_icon")]
    pub icon: String,
}

impl UserGoal {
    fn builtin(id: &str, label: &str, icon: &str, enabled: bool) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            enabled,
            icon: icon.to_string(),
        }
    }

    /// A new enabled goal with a generated `custom-` id.
    pub fn custom(label: &str, icon: &str) -> Self {
        Self {
            id: format!("{}{}", CUSTOM_GOAL_PREFIX, Uuid::new_v4().simple()),
            label: label.trim().to_string(),
            enabled: true,
            icon: icon.to_string(),
        }
    }

    pub fn is_custom(&self) -> bool {
        self.id.starts_with(CUSTOM_GOAL_PREFIX)
    }
}

pub fn default_goals() -> Vec<UserGoal> {
    vec![
        UserGoal::builtin("water", "Drank Water", "💧", true),
        UserGoal::builtin("fruit", "Ate Fruits", "🍎", true),
        UserGoal::builtin("outside", "Step Outside", "🌲", true),
        UserGoal::builtin("move", "Gentle Movement", "🧘", true),
        UserGoal::builtin("period", "It's my period today", "🩸", false),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Palette {
    #[default]
    Classic,
    Rose,
    Forest,
}

impl fmt::Display for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Palette::Classic => "classic",
            Palette::Rose => "rose",
            Palette::Forest => "forest",
        };
        f.write_str(name)
    }
}

impl FromStr for Palette {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "classic" => Ok(Palette::Classic),
            "rose" => Ok(Palette::Rose),
            "forest" => Ok(Palette::Forest),
            other => Err(format!("unknown palette '{}' (classic, rose, forest)", other)),
        }
    }
}

/// Every field defaults on its own, so a partial settings document still loads. A field
/// holding the wrong kind of value falls back alone, and an unreadable goal is skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserSettings {
    #[serde(deserialize_with = "lenient_goals")]
    pub goals: Vec<UserGoal>,
    #[serde(deserialize_with = "lenient")]
    pub palette: Palette,
    #[serde(deserialize_with = "lenient")]
    pub is_dark_mode: bool,
    #[serde(deserialize_with = "lenient")]
    pub is_high_contrast: bool,
    #[serde(deserialize_with = "lenient")]
    pub is_large_text: bool,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_else(|e| {
        warn!(error = %e, "ignoring unreadable setting");
        T::default()
    }))
}

fn lenient_goals<'de, D>(deserializer: D) -> Result<Vec<UserGoal>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        other => {
            warn!(value = %other, "stored goals are not a list, ignoring them");
            return Ok(Vec::new());
        }
    };
    Ok(items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<UserGoal>(item.clone()) {
            Ok(goal) => Some(goal),
            Err(e) => {
                warn!(error = %e, goal = %item, "skipping unreadable goal");
                None
            }
        })
        .collect())
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            goals: default_goals(),
            palette: Palette::Classic,
            is_dark_mode: false,
            is_high_contrast: false,
            is_large_text: false,
        }
    }
}

/// Merge stored goals over a default goal list.
///
/// A stored goal replaces the default with the same id in place; anything else is
/// appended in stored order. Stored goals are never dropped and ids never repeat.
pub fn merge_goals(defaults: Vec<UserGoal>, stored: Vec<UserGoal>) -> Vec<UserGoal> {
    let mut merged = defaults;
    for goal in stored {
        match merged.iter().position(|g| g.id == goal.id) {
            Some(index) => merged[index] = goal,
            None => merged.push(goal),
        }
    }
    merged
}

/// A single user action on the settings object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsCommand {
    ToggleGoal(String),
    AddGoal { label: String, icon: String },
    EditGoal { id: String, label: String, icon: String },
    RemoveGoal(String),
    SetPalette(Palette),
    ToggleDarkMode,
    ToggleHighContrast,
    ToggleLargeText,
}

impl UserSettings {
    /// Settings as stored, with the default goal set merged in.
    pub fn merged_with_defaults(self) -> Self {
        Self {
            goals: merge_goals(default_goals(), self.goals),
            ..self
        }
    }

    pub fn enabled_goals(&self) -> impl Iterator<Item = &UserGoal> {
        self.goals.iter().filter(|g| g.enabled)
    }

    pub fn goal(&self, id: &str) -> Option<&UserGoal> {
        self.goals.iter().find(|g| g.id == id)
    }

    /// Produce the settings that result from `command`. Commands that name an unknown
    /// goal or carry a blank label leave the settings unchanged.
    pub fn apply(mut self, command: SettingsCommand) -> Self {
        match command {
            SettingsCommand::ToggleGoal(id) => {
                if let Some(goal) = self.goals.iter_mut().find(|g| g.id == id) {
                    goal.enabled = !goal.enabled;
                }
            }
            SettingsCommand::AddGoal { label, icon } => {
                if !label.trim().is_empty() {
                    self.goals.push(UserGoal::custom(&label, &icon));
                }
            }
            SettingsCommand::EditGoal { id, label, icon } => {
                let label = label.trim();
                if !label.is_empty() {
                    if let Some(goal) = self.goals.iter_mut().find(|g| g.id == id) {
                        goal.label = label.to_string();
                        goal.icon = icon;
                    }
                }
            }
            SettingsCommand::RemoveGoal(id) => self.goals.retain(|g| g.id != id),
            SettingsCommand::SetPalette(palette) => self.palette = palette,
            SettingsCommand::ToggleDarkMode => self.is_dark_mode = !self.is_dark_mode,
            SettingsCommand::ToggleHighContrast => self.is_high_contrast = !self.is_high_contrast,
            SettingsCommand::ToggleLargeText => self.is_large_text = !self.is_large_text,
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goal(id: &str, enabled: bool) -> UserGoal {
        UserGoal::builtin(id, id, "*", enabled)
    }

    #[test]
    fn test_merge_stored_wins_missing_kept_extra_appended() {
        let defaults = vec![goal("A", true), goal("B", false)];
        let stored = vec![goal("A", false), goal("C", true)];

        let merged = merge_goals(defaults, stored);
        assert_eq!(merged, vec![goal("A", false), goal("B", false), goal("C", true)]);
    }

    #[test]
    fn test_merge_never_duplicates_ids() {
        let defaults = vec![goal("A", true)];
        let stored = vec![goal("C", true), goal("A", false), goal("C", false)];

        let merged = merge_goals(defaults, stored);
        let ids: Vec<_> = merged.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "C"]);
        assert!(!merged[0].enabled);
        assert!(!merged[1].enabled);
    }

    #[test]
    fn test_partial_settings_document() {
        let settings: UserSettings = serde_json::from_str(r#"{"palette":"rose"}"#).unwrap();
        assert_eq!(settings.palette, Palette::Rose);
        assert_eq!(settings.goals, default_goals());
        assert!(!settings.is_dark_mode);
    }

    #[test]
    fn test_goal_missing_fields_still_loads() {
        let settings: UserSettings = serde_json::from_str(
            r#"{"palette":"rose","isDarkMode":true,
                "goals":[{"id":"custom-1","label":"Read","enabled":true}]}"#,
        )
        .unwrap();

        assert_eq!(settings.palette, Palette::Rose);
        assert!(settings.is_dark_mode);
        assert_eq!(settings.goals.len(), 1);
        assert_eq!(settings.goals[0].icon, DEFAULT_GOAL_ICON);
        assert_eq!(settings.goals[0].label, "Read");
    }

    #[test]
    fn test_unreadable_goal_and_field_fall_back_alone() {
        let settings: UserSettings = serde_json::from_str(
            r#"{"palette":"neon","isLargeText":true,
                "goals":[{"label":"no id"},{"id":"custom-2","label":"Tea","enabled":true,"icon":"🍵"},7]}"#,
        )
        .unwrap();

        assert_eq!(settings.palette, Palette::Classic);
        assert!(settings.is_large_text);
        let ids: Vec<_> = settings.goals.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, vec!["custom-2"]);
    }

    #[test]
    fn test_goals_not_a_list_are_ignored() {
        let settings: UserSettings =
            serde_json::from_str(r#"{"goals":"water","isHighContrast":true}"#).unwrap();
        assert!(settings.goals.is_empty());
        assert!(settings.is_high_contrast);
        assert_eq!(settings.merged_with_defaults().goals, default_goals());
    }

    #[test]
    fn test_merged_with_defaults_inserts_new_builtins() {
        let stored: UserSettings = serde_json::from_str(
            r#"{"goals":[{"id":"water","label":"Water","enabled":false,"icon":"💧"},
                         {"id":"custom-1","label":"Read","enabled":true,"icon":"📖"}],
                "isDarkMode":true}"#,
        )
        .unwrap();

        let settings = stored.merged_with_defaults();
        let ids: Vec<_> = settings.goals.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, vec!["water", "fruit", "outside", "move", "period", "custom-1"]);
        assert!(!settings.goals[0].enabled);
        assert_eq!(settings.goals[0].label, "Water");
        assert!(settings.is_dark_mode);
    }

    #[test]
    fn test_camel_case_round_trip_names() {
        let value = serde_json::to_value(UserSettings::default()).unwrap();
        assert!(value.get("isHighContrast").is_some());
        assert!(value.get("isLargeText").is_some());
        assert_eq!(value["palette"], "classic");
    }

    #[test]
    fn test_add_goal_trims_and_prefixes() {
        let settings = UserSettings::default().apply(SettingsCommand::AddGoal {
            label: "  Read a chapter ".to_string(),
            icon: "📖".to_string(),
        });
        let added = settings.goals.last().unwrap();
        assert_eq!(added.label, "Read a chapter");
        assert!(added.is_custom());
        assert!(added.enabled);
        assert_eq!(settings.goals.len(), 6);
    }

    #[test]
    fn test_blank_label_is_noop() {
        let before = UserSettings::default();
        let after = before.clone().apply(SettingsCommand::AddGoal {
            label: "   ".to_string(),
            icon: "✨".to_string(),
        });
        assert_eq!(before, after);

        let after = before.clone().apply(SettingsCommand::EditGoal {
            id: "water".to_string(),
            label: "".to_string(),
            icon: "✨".to_string(),
        });
        assert_eq!(before, after);
    }

    #[test]
    fn test_toggle_edit_remove() {
        let settings = UserSettings::default()
            .apply(SettingsCommand::ToggleGoal("period".to_string()))
            .apply(SettingsCommand::EditGoal {
                id: "fruit".to_string(),
                label: "Ate Berries".to_string(),
                icon: "🫐".to_string(),
            })
            .apply(SettingsCommand::RemoveGoal("outside".to_string()));

        assert!(settings.goal("period").unwrap().enabled);
        assert_eq!(settings.goal("fruit").unwrap().label, "Ate Berries");
        assert!(settings.goal("outside").is_none());
        assert_eq!(settings.enabled_goals().count(), 4);
    }

    #[test]
    fn test_display_toggles_and_palette() {
        let settings = UserSettings::default()
            .apply(SettingsCommand::SetPalette(Palette::Forest))
            .apply(SettingsCommand::ToggleDarkMode)
            .apply(SettingsCommand::ToggleHighContrast)
            .apply(SettingsCommand::ToggleLargeText)
            .apply(SettingsCommand::ToggleLargeText);

        assert_eq!(settings.palette, Palette::Forest);
        assert!(settings.is_dark_mode);
        assert!(settings.is_high_contrast);
        assert!(!settings.is_large_text);
    }

    #[test]
    fn test_palette_from_str() {
        assert_eq!("ROSE".parse::<Palette>().unwrap(), Palette::Rose);
        assert!("neon".parse::<Palette>().is_err());
    }
}
