use anyhow::{anyhow, bail, Context, Result};
use chrono::{Datelike, Local, NaiveDate};
use std::path::PathBuf;
use tracing::info;

use posy::config::Config;
use posy::core::views::{self, GrowthStage};
use posy::core::{
    date_key, parse_date_key, today_key, CheckIn, DayEntry, EntryStore, MoodType, Palette,
    SettingsCommand, UserGoal, DEFAULT_GOAL_ICON,
};

pub use commands::{Args, Commands, GoalCommands, SettingsCommands};

mod commands;

const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

fn open(data_dir: Option<PathBuf>) -> Result<(Config, EntryStore)> {
    let config = Config::new(data_dir)?;
    let store = EntryStore::open(&config.data_dir);
    Ok((config, store))
}

fn parse_day(raw: &str) -> Result<NaiveDate> {
    parse_date_key(raw).ok_or_else(|| anyhow!("Invalid date '{}', expected YYYY-MM-DD", raw))
}

fn current_year() -> i32 {
    Local::now().year()
}

fn month_name(month: u32) -> Result<&'static str> {
    month
        .checked_sub(1)
        .and_then(|i| MONTH_NAMES.get(i as usize))
        .copied()
        .ok_or_else(|| anyhow!("Invalid month {}, expected 1-12", month))
}

fn stage_name(stage: GrowthStage) -> &'static str {
    match stage {
        GrowthStage::Sprout => "sprout",
        GrowthStage::Bush => "bush",
        GrowthStage::Tree => "tree",
    }
}

pub async fn handle_checkin(
    data_dir: Option<PathBuf>,
    mood: String,
    note: String,
    date: Option<String>,
    goals: Vec<String>,
    new_goals: Vec<String>,
    media: Option<PathBuf>,
) -> Result<()> {
    let (config, mut store) = open(data_dir)?;
    let mood: MoodType = mood.parse()?;
    let date = match date {
        Some(raw) => parse_day(&raw)?,
        None => Local::now().date_naive(),
    };

    let mut checkin = CheckIn::new(date);
    checkin.select_mood(mood).write_note(note);

    for goal in &goals {
        if !checkin.toggle_goal(store.settings(), goal) {
            bail!("Unknown or disabled ritual '{}' (see `posy goals list`)", goal);
        }
    }

    for label in &new_goals {
        let Some(updated) = checkin.add_goal(store.settings(), label, DEFAULT_GOAL_ICON) else {
            bail!("A ritual needs a name");
        };
        store.update_settings(updated);
    }

    if let Some(path) = media {
        let bytes = std::fs::read(&path)
            .with_context(|| format!("Failed to read media file {}", path.display()))?;
        checkin.attach_media(&path, &bytes);
    }

    println!("🌱 Placing in soil...");
    let client = config.affirmation_client();
    if let Some(affirmation) = checkin.plant(&client).await {
        println!("🌸 {}", affirmation.text());
    }

    let Some(entry) = checkin.finish() else {
        return Ok(());
    };
    let replaced = store.entry(&entry.date).is_some();
    info!(date = %entry.date, mood = %entry.mood.as_tag(), replaced, "planting entry");
    let total = store.upsert_entry(entry).len();

    println!(
        "✅ {} planted for {} ({} blooms in the garden)",
        mood.flower(),
        checkin.date_key(),
        total
    );
    Ok(())
}

pub fn handle_show(data_dir: Option<PathBuf>, date: Option<String>) -> Result<()> {
    let (_, store) = open(data_dir)?;
    let key = match date {
        Some(raw) => date_key(parse_day(&raw)?),
        None => today_key(),
    };

    let Some(entry) = store.entry(&key) else {
        println!("No bloom on {} yet.", key);
        return Ok(());
    };
    print_entry(entry, &store);
    Ok(())
}

fn print_entry(entry: &DayEntry, store: &EntryStore) {
    println!("{} · {} ({})", entry.date, entry.mood.label(), entry.mood.flower());
    if entry.note.is_empty() {
        println!("  \"A quiet space for growth.\"");
    } else {
        println!("  \"{}\"", entry.note);
    }
    if let Some(affirmation) = entry.affirmation.as_deref().filter(|a| !a.is_empty()) {
        println!("  Whisper: {}", affirmation);
    }
    if let Some(kind) = entry.media_type {
        println!("  Captured memory: {}", kind);
    }
    let done = views::completed_goals(entry, store.settings());
    if !done.is_empty() {
        let rituals: Vec<String> = done.iter().map(|g| format!("{} {}", g.icon, g.label)).collect();
        println!("  Rituals: {}", rituals.join(", "));
    }
}

pub fn handle_year(data_dir: Option<PathBuf>, year: Option<i32>) -> Result<()> {
    let (_, store) = open(data_dir)?;
    let year = year.unwrap_or_else(current_year);
    let summary = views::year_summary(store.entries(), year);

    println!("🌿 Season: {}", year);
    println!("  Blooms: {}", summary.total_count);
    println!("  Whispers: {}", summary.affirmation_count);
    println!("  Varieties: {}", summary.distinct_mood_count);
    println!();

    for (i, month) in views::entries_by_month(store.entries(), year).iter().enumerate() {
        let top = views::mood_frequency(month.iter().copied())
            .top(1)
            .first()
            .map(|m| m.flower())
            .unwrap_or("-");
        println!("  {:<10} {:>3}  {}", MONTH_NAMES[i], month.len(), top);
    }
    Ok(())
}

pub fn handle_month(
    data_dir: Option<PathBuf>,
    year: Option<i32>,
    month: Option<u32>,
) -> Result<()> {
    let (_, store) = open(data_dir)?;
    let today = Local::now();
    let year = year.unwrap_or(today.year());
    let month = month.unwrap_or(today.month());
    let name = month_name(month)?;
    let grid = views::calendar_month(store.entries(), year, month)?;

    println!("{} {}", name, year);
    println!("  S   M   T   W   T   F   S");
    let mut line = "    ".repeat(grid.offset as usize);
    for (i, day) in grid.days.iter().enumerate() {
        let mark = if day.entry.is_some() { '*' } else { ' ' };
        line.push_str(&format!("{:>3}{}", day.day, mark));
        if (grid.offset as usize + i + 1) % 7 == 0 {
            println!("{}", line.trim_end());
            line.clear();
        }
    }
    if !line.is_empty() {
        println!("{}", line.trim_end());
    }

    let month_entries = views::entries_in_month(store.entries(), year, month);
    println!();
    if month_entries.is_empty() {
        println!("\"A quiet meadow waits for its first bloom.\"");
        return Ok(());
    }

    println!("💐 Your {} Bouquet ({} blooms)", name, month_entries.len());
    let bouquet = views::mood_frequency(month_entries.iter().copied());
    for (mood, count) in bouquet.ranked().iter().take(3) {
        println!("  {:<24} x{}", mood.flower(), count);
    }
    Ok(())
}

pub fn handle_garden(data_dir: Option<PathBuf>, year: Option<i32>) -> Result<()> {
    let (_, store) = open(data_dir)?;
    let year = year.unwrap_or_else(current_year);
    let plots = views::garden(store.entries(), year);

    if plots.is_empty() {
        println!("The {} garden is still bare soil. Plant your first bloom.", year);
        return Ok(());
    }

    for plot in plots {
        println!(
            "{} ({}) · {} · {} bloom{}",
            plot.mood.flower(),
            plot.mood.label(),
            stage_name(plot.stage),
            plot.count,
            if plot.count == 1 { "" } else { "s" }
        );
        if let Some(quote) = plot.mood.resilience_quote() {
            println!("  \"{}\"", quote);
        }
        let dates: Vec<&str> = plot.entries.iter().map(|e| e.date.as_str()).collect();
        println!("  {}", dates.join(", "));
    }
    Ok(())
}

pub fn handle_mix(data_dir: Option<PathBuf>, months: Vec<u32>, year: Option<i32>) -> Result<()> {
    let (_, store) = open(data_dir)?;
    let year = year.unwrap_or_else(current_year);
    let names = months.iter().map(|&m| month_name(m)).collect::<Result<Vec<_>>>()?;

    let mix = views::seasonal_mix(store.entries(), year, &months);
    if mix.is_empty() {
        println!("No blooms found in those months to mix!");
        return Ok(());
    }

    println!("Seasonal Composition ({} Months): {}", months.len(), names.join(", "));
    for (mood, count) in views::mood_frequency(mix.iter().copied()).ranked() {
        println!("  {:<24} x{}", mood.flower(), count);
    }
    Ok(())
}

pub fn handle_goals(data_dir: Option<PathBuf>, command: GoalCommands) -> Result<()> {
    let (_, mut store) = open(data_dir)?;

    let command = match command {
        GoalCommands::List => {
            print_goals(&store);
            return Ok(());
        }
        GoalCommands::Add { label, icon } => {
            if label.trim().is_empty() {
                bail!("A ritual needs a name");
            }
            SettingsCommand::AddGoal { label, icon }
        }
        GoalCommands::Edit { id, label, icon } => {
            require_goal(&store, &id)?;
            SettingsCommand::EditGoal { id, label, icon }
        }
        GoalCommands::Toggle { id } => {
            require_goal(&store, &id)?;
            SettingsCommand::ToggleGoal(id)
        }
        GoalCommands::Remove { id } => {
            let goal = require_goal(&store, &id)?;
            if !goal.is_custom() {
                bail!("'{}' is a built-in ritual; disable it with `posy goals toggle {}`", id, id);
            }
            SettingsCommand::RemoveGoal(id)
        }
    };

    apply_settings(&mut store, command);
    print_goals(&store);
    Ok(())
}

fn require_goal<'a>(store: &'a EntryStore, id: &str) -> Result<&'a UserGoal> {
    store
        .settings()
        .goal(id)
        .ok_or_else(|| anyhow!("No ritual with id '{}'", id))
}

fn print_goals(store: &EntryStore) {
    for goal in &store.settings().goals {
        println!(
            "  [{}] {} {:<24} {}",
            if goal.enabled { "x" } else { " " },
            goal.icon,
            goal.label,
            goal.id
        );
    }
}

fn apply_settings(store: &mut EntryStore, command: SettingsCommand) {
    let updated = store.settings().clone().apply(command);
    store.update_settings(updated);
}

pub fn handle_settings(data_dir: Option<PathBuf>, command: SettingsCommands) -> Result<()> {
    let (config, mut store) = open(data_dir)?;

    let command = match command {
        SettingsCommands::Show => None,
        SettingsCommands::Palette { palette } => {
            let palette: Palette = palette.parse().map_err(|e: String| anyhow!(e))?;
            Some(SettingsCommand::SetPalette(palette))
        }
        SettingsCommands::DarkMode => Some(SettingsCommand::ToggleDarkMode),
        SettingsCommands::HighContrast => Some(SettingsCommand::ToggleHighContrast),
        SettingsCommands::LargeText => Some(SettingsCommand::ToggleLargeText),
    };
    if let Some(command) = command {
        apply_settings(&mut store, command);
    }

    let settings = store.settings();
    println!("Palette:       {}", settings.palette);
    println!("Dark mode:     {}", on_off(settings.is_dark_mode));
    println!("High contrast: {}", on_off(settings.is_high_contrast));
    println!("Large text:    {}", on_off(settings.is_large_text));
    println!("Data:          {}", config.data_dir.display());
    println!("Affirmations:  {}", config.affirmation_url);
    Ok(())
}

fn on_off(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}
