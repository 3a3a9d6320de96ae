use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::entry::DayEntry;
use super::error::Result;
use super::settings::UserSettings;

pub const ENTRIES_FILE: &str = "posy_garden_entries.json";
pub const SETTINGS_FILE: &str = "posy_settings.json";

/// JSON-file backed store for the journal entries and the user settings.
///
/// The in-memory state is authoritative for the session: a failed write is logged and
/// the change is kept.
pub struct EntryStore {
    entries: Vec<DayEntry>,
    index: HashMap<String, usize>,
    /// Stored records this build cannot read. They are written back untouched.
    unreadable: Vec<Value>,
    settings: UserSettings,
    entries_path: PathBuf,
    settings_path: PathBuf,
}

impl EntryStore {
    /// Load both documents from `data_dir`. Missing documents fall back to an empty
    /// journal and default settings. A document that is not valid JSON is copied to
    /// `<name>.bak` before anything can overwrite it.
    pub fn open(data_dir: &Path) -> Self {
        let entries_path = data_dir.join(ENTRIES_FILE);
        let settings_path = data_dir.join(SETTINGS_FILE);

        let (entries, unreadable) = load_entries(&entries_path);
        let settings = load_settings(&settings_path);

        debug!(
            entries = entries.len(),
            unreadable = unreadable.len(),
            path = %data_dir.display(),
            "loaded journal"
        );

        let mut store = Self {
            entries: Vec::with_capacity(entries.len()),
            index: HashMap::new(),
            unreadable,
            settings,
            entries_path,
            settings_path,
        };
        // A hand-edited document may hold the same date twice; the later one wins.
        for entry in entries {
            store.insert(entry);
        }
        store
    }

    pub fn entries(&self) -> &[DayEntry] {
        &self.entries
    }

    pub fn entry(&self, date_key: &str) -> Option<&DayEntry> {
        self.index.get(date_key).map(|&i| &self.entries[i])
    }

    pub fn settings(&self) -> &UserSettings {
        &self.settings
    }

    /// Replace any entry for the same date with `entry`, moving it to the end, and persist.
    pub fn upsert_entry(&mut self, entry: DayEntry) -> &[DayEntry] {
        self.insert(entry);
        if let Err(e) = self.persist_entries() {
            warn!(error = %e, path = %self.entries_path.display(), "failed to persist entries");
        }
        &self.entries
    }

    /// Replace the settings wholesale and persist.
    pub fn update_settings(&mut self, settings: UserSettings) -> &UserSettings {
        self.settings = settings;
        if let Err(e) = self.persist_settings() {
            warn!(error = %e, path = %self.settings_path.display(), "failed to persist settings");
        }
        &self.settings
    }

    pub fn persist_entries(&self) -> Result<()> {
        if self.unreadable.is_empty() {
            return save_document(&self.entries_path, &self.entries);
        }
        let mut records = Vec::with_capacity(self.entries.len() + self.unreadable.len());
        for entry in &self.entries {
            records.push(serde_json::to_value(entry)?);
        }
        records.extend(self.unreadable.iter().cloned());
        save_document(&self.entries_path, &records)
    }

    pub fn persist_settings(&self) -> Result<()> {
        save_document(&self.settings_path, &self.settings)
    }

    fn insert(&mut self, entry: DayEntry) {
        if let Some(old) = self.index.remove(&entry.date) {
            self.entries.remove(old);
            for (i, moved) in self.entries.iter().enumerate().skip(old) {
                self.index.insert(moved.date.clone(), i);
            }
        }
        self.index.insert(entry.date.clone(), self.entries.len());
        self.entries.push(entry);
    }
}

fn load_entries(path: &Path) -> (Vec<DayEntry>, Vec<Value>) {
    let items = match load_document(path) {
        Some(Value::Array(items)) => items,
        Some(other) => {
            warn!(
                path = %path.display(),
                kind = value_kind(&other),
                "entries document is not a list"
            );
            back_up(path);
            return (Vec::new(), Vec::new());
        }
        None => return (Vec::new(), Vec::new()),
    };

    let mut entries = Vec::with_capacity(items.len());
    let mut unreadable = Vec::new();
    for item in items {
        match serde_json::from_value::<DayEntry>(item.clone()) {
            Ok(entry) => entries.push(entry),
            Err(e) => {
                warn!(error = %e, record = %item, "skipping unreadable entry");
                unreadable.push(item);
            }
        }
    }
    (entries, unreadable)
}

fn load_settings(path: &Path) -> UserSettings {
    let Some(value) = load_document(path) else {
        return UserSettings::default();
    };
    match serde_json::from_value::<UserSettings>(value) {
        Ok(settings) => settings.merged_with_defaults(),
        Err(e) => {
            warn!(error = %e, path = %path.display(), "settings document is not an object");
            back_up(path);
            UserSettings::default()
        }
    }
}

/// Read a JSON document. A missing or unreadable file is `None`; so is one that is not
/// valid JSON, after it has been copied aside.
fn load_document(path: &Path) -> Option<Value> {
    if !path.exists() {
        return None;
    }
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!(error = %e, path = %path.display(), "failed to read document, using defaults");
            return None;
        }
    };
    match serde_json::from_str(&content) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(error = %e, path = %path.display(), "failed to parse document, using defaults");
            back_up(path);
            None
        }
    }
}

pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".bak");
    PathBuf::from(name)
}

fn back_up(path: &Path) {
    let backup = backup_path(path);
    match std::fs::copy(path, &backup) {
        Ok(_) => warn!(backup = %backup.display(), "kept a copy of the unreadable document"),
        Err(e) => warn!(error = %e, backup = %backup.display(), "failed to back up document"),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn save_document<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(value)?;
    std::fs::write(path, content)?;
    Ok(())
}
