use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "posy")]
#[command(about = "A quiet mood journal that grows a garden from your days")]
pub struct Args {
    /// Directory holding the journal, settings and config.json
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Plant a bloom: record the mood for a day
    Checkin {
        /// Mood tag or label (e.g. HAPPY, calm)
        #[arg(long)]
        mood: String,
        #[arg(long, default_value = "")]
        note: String,
        /// Day to record (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
        /// Ritual completed today, by goal id (repeatable)
        #[arg(long = "goal")]
        goals: Vec<String>,
        /// New ritual to create and mark done today, by label (repeatable)
        #[arg(long = "new-goal")]
        new_goals: Vec<String>,
        /// Photo or video to keep with the entry
        #[arg(long)]
        media: Option<PathBuf>,
    },
    /// Show the entry recorded for a day
    Show {
        /// Day (YYYY-MM-DD), defaults to today
        date: Option<String>,
    },
    /// Annual overview with month counts
    Year {
        #[arg(long)]
        year: Option<i32>,
    },
    /// Calendar grid and bouquet for a month
    Month {
        #[arg(long)]
        year: Option<i32>,
        /// Month number (1-12)
        #[arg(long)]
        month: Option<u32>,
    },
    /// Entries of a year grouped by mood
    Garden {
        #[arg(long)]
        year: Option<i32>,
    },
    /// Seasonal mix of several months
    Mix {
        /// Month numbers, comma separated (e.g. 6,7,8)
        #[arg(long, value_delimiter = ',', required = true)]
        months: Vec<u32>,
        #[arg(long)]
        year: Option<i32>,
    },
    /// Manage daily rituals
    Goals {
        #[command(subcommand)]
        command: GoalCommands,
    },
    /// Palette and display options
    Settings {
        #[command(subcommand)]
        command: SettingsCommands,
    },
}

#[derive(Subcommand)]
pub enum GoalCommands {
    /// List rituals in display order
    List,
    /// Add a custom ritual
    Add {
        label: String,
        #[arg(long, default_value = "✨")]
        icon: String,
    },
    /// Rename a ritual or change its icon
    Edit {
        id: String,
        label: String,
        #[arg(long, default_value = "✨")]
        icon: String,
    },
    /// Show or hide a ritual on the check-in checklist
    Toggle { id: String },
    /// Delete a custom ritual
    Remove { id: String },
}

#[derive(Subcommand)]
pub enum SettingsCommands {
    Show,
    /// Choose the palette (classic, rose, forest)
    Palette { palette: String },
    DarkMode,
    HighContrast,
    LargeText,
}
