pub mod checkin;
pub mod entry;
pub mod error;
pub mod mood;
pub mod settings;
pub mod store;
pub mod views;

pub use checkin::CheckIn;
pub use entry::{date_key, parse_date_key, today_key, DayEntry, MediaKind};
pub use error::{PosyError, Result};
pub use mood::MoodType;
pub use settings::{Palette, SettingsCommand, UserGoal, UserSettings, DEFAULT_GOAL_ICON};
pub use store::EntryStore;
pub use views::{GrowthStage, MoodFrequency, YearSummary};
