//! Pure derivations over the entry list: the groupings and counts every view renders.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

use super::entry::{date_key, DayEntry};
use super::error::{PosyError, Result};
use super::mood::MoodType;
use super::settings::{UserGoal, UserSettings};

/// Counts at or above which a mood's plot grows.
pub const BUSH_THRESHOLD: usize = 4;
pub const TREE_THRESHOLD: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GrowthStage {
    Sprout,
    Bush,
    Tree,
}

pub fn growth_stage(count: usize) -> GrowthStage {
    if count >= TREE_THRESHOLD {
        GrowthStage::Tree
    } else if count >= BUSH_THRESHOLD {
        GrowthStage::Bush
    } else {
        GrowthStage::Sprout
    }
}

/// Entries whose date satisfies `predicate`, in list order. Undated keys never match.
pub fn entries_in_range<'a, P>(entries: &'a [DayEntry], predicate: P) -> Vec<&'a DayEntry>
where
    P: Fn(NaiveDate) -> bool,
{
    entries
        .iter()
        .filter(|e| e.calendar_date().is_some_and(&predicate))
        .collect()
}

pub fn entries_in_year(entries: &[DayEntry], year: i32) -> Vec<&DayEntry> {
    entries_in_range(entries, |d| d.year() == year)
}

pub fn entries_in_month(entries: &[DayEntry], year: i32, month: u32) -> Vec<&DayEntry> {
    entries_in_range(entries, |d| d.year() == year && d.month() == month)
}

/// Per-mood counts, kept in the order each mood was first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoodFrequency {
    counts: Vec<(MoodType, usize)>,
}

impl MoodFrequency {
    pub fn count(&self, mood: MoodType) -> usize {
        self.counts
            .iter()
            .find(|(m, _)| *m == mood)
            .map(|(_, c)| *c)
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Moods in first-encountered order.
    pub fn iter(&self) -> impl Iterator<Item = (MoodType, usize)> + '_ {
        self.counts.iter().copied()
    }

    /// Count descending; ties keep first-encountered order.
    pub fn ranked(&self) -> Vec<(MoodType, usize)> {
        let mut ranked = self.counts.clone();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }

    pub fn top(&self, n: usize) -> Vec<MoodType> {
        self.ranked().into_iter().take(n).map(|(m, _)| m).collect()
    }
}

pub fn mood_frequency<'a, I>(entries: I) -> MoodFrequency
where
    I: IntoIterator<Item = &'a DayEntry>,
{
    let mut counts: Vec<(MoodType, usize)> = Vec::new();
    for entry in entries {
        match counts.iter_mut().find(|(m, _)| *m == entry.mood) {
            Some((_, c)) => *c += 1,
            None => counts.push((entry.mood, 1)),
        }
    }
    MoodFrequency { counts }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct YearSummary {
    pub total_count: usize,
    pub affirmation_count: usize,
    pub distinct_mood_count: usize,
}

pub fn year_summary(entries: &[DayEntry], year: i32) -> YearSummary {
    let year_entries = entries_in_year(entries, year);
    let moods: HashSet<MoodType> = year_entries.iter().map(|e| e.mood).collect();
    YearSummary {
        total_count: year_entries.len(),
        affirmation_count: year_entries.iter().filter(|e| e.has_affirmation()).count(),
        distinct_mood_count: moods.len(),
    }
}

/// One mood's patch of the garden for a year.
#[derive(Debug, Clone, PartialEq)]
pub struct GardenPlot<'a> {
    pub mood: MoodType,
    pub count: usize,
    pub stage: GrowthStage,
    pub entries: Vec<&'a DayEntry>,
}

pub fn garden(entries: &[DayEntry], year: i32) -> Vec<GardenPlot<'_>> {
    let year_entries = entries_in_year(entries, year);
    mood_frequency(year_entries.iter().copied())
        .iter()
        .map(|(mood, count)| GardenPlot {
            mood,
            count,
            stage: growth_stage(count),
            entries: year_entries.iter().copied().filter(|e| e.mood == mood).collect(),
        })
        .collect()
}

/// Twelve buckets, January first.
pub fn entries_by_month(entries: &[DayEntry], year: i32) -> Vec<Vec<&DayEntry>> {
    let mut months: Vec<Vec<&DayEntry>> = vec![Vec::new(); 12];
    for entry in entries {
        if let Some(date) = entry.calendar_date() {
            if date.year() == year {
                months[date.month0() as usize].push(entry);
            }
        }
    }
    months
}

/// Entries of `year` falling in any of the selected months (1-12).
pub fn seasonal_mix<'a>(entries: &'a [DayEntry], year: i32, months: &[u32]) -> Vec<&'a DayEntry> {
    entries_in_range(entries, |d| d.year() == year && months.contains(&d.month()))
}

fn first_of_month(year: i32, month: u32) -> Result<NaiveDate> {
    if !(1..=12).contains(&month) {
        return Err(PosyError::InvalidMonth(month));
    }
    NaiveDate::from_ymd_opt(year, month, 1).ok_or(PosyError::InvalidYear(year))
}

pub fn days_in_month(year: i32, month: u32) -> Result<u32> {
    let first = first_of_month(year, month)?;
    let next = if month == 12 {
        year.checked_add(1).and_then(|next_year| NaiveDate::from_ymd_opt(next_year, 1, 1))
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or(PosyError::InvalidYear(year))?;
    Ok((next - first).num_days() as u32)
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarDay<'a> {
    pub day: u32,
    pub key: String,
    pub entry: Option<&'a DayEntry>,
}

/// A month laid out for a Sunday-first grid.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarMonth<'a> {
    pub year: i32,
    pub month: u32,
    /// Blank cells before the 1st.
    pub offset: u32,
    pub days: Vec<CalendarDay<'a>>,
}

pub fn calendar_month(entries: &[DayEntry], year: i32, month: u32) -> Result<CalendarMonth<'_>> {
    let first = first_of_month(year, month)?;
    let by_key: HashMap<&str, &DayEntry> = entries.iter().map(|e| (e.date.as_str(), e)).collect();

    let days = first
        .iter_days()
        .take(days_in_month(year, month)? as usize)
        .map(|date| {
            let key = date_key(date);
            CalendarDay {
                day: date.day(),
                entry: by_key.get(key.as_str()).copied(),
                key,
            }
        })
        .collect();

    Ok(CalendarMonth {
        year,
        month,
        offset: first.weekday().num_days_from_sunday(),
        days,
    })
}

/// Goals in settings order that the entry marked as done.
pub fn completed_goals<'a>(entry: &DayEntry, settings: &'a UserSettings) -> Vec<&'a UserGoal> {
    settings.goals.iter().filter(|g| entry.goal_done(&g.id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entry::parse_date_key;

    fn entry(date: &str, mood: MoodType) -> DayEntry {
        DayEntry::new(parse_date_key(date).unwrap(), mood, "")
    }

    #[test]
    fn test_growth_stage_boundaries() {
        assert_eq!(growth_stage(0), GrowthStage::Sprout);
        assert_eq!(growth_stage(3), GrowthStage::Sprout);
        assert_eq!(growth_stage(4), GrowthStage::Bush);
        assert_eq!(growth_stage(9), GrowthStage::Bush);
        assert_eq!(growth_stage(10), GrowthStage::Tree);
        assert_eq!(growth_stage(365), GrowthStage::Tree);
    }

    #[test]
    fn test_frequency_and_ranking() {
        let moods = [
            MoodType::Happy,
            MoodType::Sad,
            MoodType::Happy,
            MoodType::Calm,
            MoodType::Sad,
            MoodType::Happy,
        ];
        let entries: Vec<_> = moods
            .iter()
            .enumerate()
            .map(|(i, m)| entry(&format!("2024-01-{:02}", i + 1), *m))
            .collect();

        let freq = mood_frequency(&entries);
        assert_eq!(freq.count(MoodType::Happy), 3);
        assert_eq!(freq.count(MoodType::Sad), 2);
        assert_eq!(freq.count(MoodType::Calm), 1);
        assert_eq!(freq.count(MoodType::Tired), 0);
        assert_eq!(freq.top(3), vec![MoodType::Happy, MoodType::Sad, MoodType::Calm]);
    }

    #[test]
    fn test_ranking_ties_keep_first_seen_order() {
        let entries = vec![
            entry("2024-01-01", MoodType::Tired),
            entry("2024-01-02", MoodType::Loved),
            entry("2024-01-03", MoodType::Quiet),
            entry("2024-01-04", MoodType::Loved),
            entry("2024-01-05", MoodType::Tired),
        ];
        let ranked = mood_frequency(&entries).ranked();
        assert_eq!(
            ranked,
            vec![(MoodType::Tired, 2), (MoodType::Loved, 2), (MoodType::Quiet, 1)]
        );
    }

    #[test]
    fn test_year_boundary() {
        let entries = vec![entry("2024-12-31", MoodType::Calm)];
        assert_eq!(entries_in_year(&entries, 2024).len(), 1);
        assert!(entries_in_year(&entries, 2025).is_empty());
        assert_eq!(entries_in_month(&entries, 2024, 12).len(), 1);
        assert!(entries_in_month(&entries, 2024, 11).is_empty());
    }

    #[test]
    fn test_bad_date_keys_are_skipped() {
        let mut broken = entry("2024-01-01", MoodType::Calm);
        broken.date = "someday".to_string();
        let entries = vec![broken, entry("2024-01-02", MoodType::Sad)];
        assert_eq!(entries_in_year(&entries, 2024).len(), 1);
    }

    #[test]
    fn test_empty_year_summary() {
        assert_eq!(year_summary(&[], 2024), YearSummary::default());
        assert_eq!(year_summary(&[], 2024).total_count, 0);
    }

    #[test]
    fn test_year_summary_counts() {
        let mut a = entry("2024-03-01", MoodType::Happy);
        a.affirmation = Some("Bloom on.".to_string());
        let mut b = entry("2024-03-02", MoodType::Happy);
        b.affirmation = Some(String::new());
        let c = entry("2024-04-01", MoodType::Anxious);
        let other_year = entry("2023-04-01", MoodType::Proud);

        let summary = year_summary(&[a, b, c, other_year], 2024);
        assert_eq!(
            summary,
            YearSummary {
                total_count: 3,
                affirmation_count: 1,
                distinct_mood_count: 2,
            }
        );
    }

    #[test]
    fn test_garden_plots() {
        let mut entries: Vec<_> = (1..=4)
            .map(|d| entry(&format!("2024-02-{:02}", d), MoodType::Peaceful))
            .collect();
        entries.insert(1, entry("2024-02-10", MoodType::Lonely));
        entries.push(entry("2023-02-01", MoodType::Lonely));

        let plots = garden(&entries, 2024);
        assert_eq!(plots.len(), 2);
        assert_eq!(plots[0].mood, MoodType::Peaceful);
        assert_eq!(plots[0].count, 4);
        assert_eq!(plots[0].stage, GrowthStage::Bush);
        assert_eq!(plots[1].mood, MoodType::Lonely);
        assert_eq!(plots[1].stage, GrowthStage::Sprout);
        assert_eq!(plots[1].entries.len(), 1);
        assert_eq!(plots[1].entries[0].date, "2024-02-10");
    }

    #[test]
    fn test_entries_by_month() {
        let entries = vec![
            entry("2024-01-15", MoodType::Calm),
            entry("2024-12-01", MoodType::Sad),
            entry("2024-12-25", MoodType::Joyful),
            entry("2025-01-01", MoodType::Hopeful),
        ];
        let months = entries_by_month(&entries, 2024);
        assert_eq!(months.len(), 12);
        assert_eq!(months[0].len(), 1);
        assert_eq!(months[11].len(), 2);
        assert!(months[5].is_empty());
    }

    #[test]
    fn test_seasonal_mix() {
        let entries = vec![
            entry("2024-06-01", MoodType::Calm),
            entry("2024-07-04", MoodType::Excited),
            entry("2024-09-01", MoodType::Reflective),
            entry("2023-07-04", MoodType::Excited),
        ];
        let mix = seasonal_mix(&entries, 2024, &[6, 7, 8]);
        assert_eq!(mix.len(), 2);
        assert!(seasonal_mix(&entries, 2024, &[]).is_empty());
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 2).unwrap(), 29);
        assert_eq!(days_in_month(2023, 2).unwrap(), 28);
        assert_eq!(days_in_month(2024, 12).unwrap(), 31);
        assert_eq!(days_in_month(2024, 4).unwrap(), 30);
        assert!(days_in_month(2024, 13).is_err());
    }

    #[test]
    fn test_out_of_range_year_names_the_year() {
        match calendar_month(&[], 999_999, 3) {
            Err(PosyError::InvalidYear(year)) => assert_eq!(year, 999_999),
            other => panic!("expected InvalidYear, got {:?}", other.map(|m| m.month)),
        }
        assert!(matches!(days_in_month(i32::MAX, 12), Err(PosyError::InvalidYear(_))));
        assert!(matches!(days_in_month(2024, 0), Err(PosyError::InvalidMonth(0))));
    }

    #[test]
    fn test_calendar_month() {
        let entries = vec![entry("2024-09-03", MoodType::Content)];
        let month = calendar_month(&entries, 2024, 9).unwrap();

        // 1 September 2024 was a Sunday.
        assert_eq!(month.offset, 0);
        assert_eq!(month.days.len(), 30);
        assert_eq!(month.days[2].key, "2024-09-03");
        assert_eq!(month.days[2].entry.unwrap().mood, MoodType::Content);
        assert!(month.days[3].entry.is_none());

        // 1 March 2024 was a Friday.
        assert_eq!(calendar_month(&[], 2024, 3).unwrap().offset, 5);
        assert!(calendar_month(&[], 2024, 0).is_err());
    }

    #[test]
    fn test_completed_goals_follow_settings_order() {
        let settings = UserSettings::default();
        let mut day = entry("2024-01-01", MoodType::Grateful);
        let mut marks = HashMap::new();
        marks.insert("move".to_string(), true);
        marks.insert("water".to_string(), true);
        marks.insert("fruit".to_string(), false);
        marks.insert("custom-gone".to_string(), true);
        day.goals = Some(marks);

        let done: Vec<_> = completed_goals(&day, &settings)
            .into_iter()
            .map(|g| g.id.as_str())
            .collect();
        assert_eq!(done, vec!["water", "move"]);
    }
}
