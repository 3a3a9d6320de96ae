use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use super::mood::MoodType;

const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// Canonical `YYYY-MM-DD` key for a calendar date. This is the only identity an entry has.
pub fn date_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day())
}

/// Parse a date key back into a calendar date.
///
/// The key carries no time or offset, so the result never shifts across a day boundary
/// whatever the local timezone is.
pub fn parse_date_key(key: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(key.trim(), DATE_KEY_FORMAT).ok()
}

/// Key for today on the local calendar.
pub fn today_key() -> String {
    date_key(Local::now().date_naive())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "mp4" | "mov" | "webm" | "mkv" | "avi" | "m4v" => MediaKind::Video,
            _ => MediaKind::Image,
        }
    }

    fn mime_for(path: &Path) -> &'static str {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "png" => "image/png",
            "jpg" | "jpeg" => "image/jpeg",
            "gif" => "image/gif",
            "webp" => "image/webp",
            "mp4" | "m4v" => "video/mp4",
            "mov" => "video/quicktime",
            "webm" => "video/webm",
            "mkv" => "video/x-matroska",
            "avi" => "video/x-msvideo",
            _ => "application/octet-stream",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        };
        f.write_str(name)
    }
}

/// Embed raw media bytes as a base64 data URI, classified by the file extension.
pub fn encode_media(path: &Path, bytes: &[u8]) -> (String, MediaKind) {
    let uri = format!("data:{};base64,{}", MediaKind::mime_for(path), STANDARD.encode(bytes));
    (uri, MediaKind::from_path(path))
}

/// One day's journal record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayEntry {
    pub date: String,
    pub mood: MoodType,
    #[serde(default)]
    pub note: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affirmation: Option<String>,
    /// Data URI holding the photo or video.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<MediaKind>,
    /// Rituals marked for this day, kept even after a goal is disabled or removed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goals: Option<HashMap<String, bool>>,
}

impl DayEntry {
    pub fn new(date: NaiveDate, mood: MoodType, note: impl Into<String>) -> Self {
        Self {
            date: date_key(date),
            mood,
            note: note.into(),
            affirmation: None,
            media: None,
            media_type: None,
            goals: None,
        }
    }

    pub fn calendar_date(&self) -> Option<NaiveDate> {
        parse_date_key(&self.date)
    }

    pub fn has_affirmation(&self) -> bool {
        self.affirmation.as_deref().is_some_and(|a| !a.is_empty())
    }

    pub fn goal_done(&self, goal_id: &str) -> bool {
        self.goals
            .as_ref()
            .and_then(|goals| goals.get(goal_id))
            .copied()
            .unwrap_or(false)
    }
}
