use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::PosyError;

/// The emotional state recorded for a day. Used as the grouping key for every view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MoodType {
    Happy,
    Grateful,
    Peaceful,
    Joyful,
    Loved,
    Hopeful,
    Calm,
    Excited,
    Content,
    Proud,
    Energized,
    Inspired,
    Thoughtful,
    Quiet,
    Reflective,
    Anxious,
    Sad,
    Tired,
    Lonely,
    Overwhelmed,
}

impl MoodType {
    /// Every mood in check-in order.
    pub const ALL: [MoodType; 20] = [
        MoodType::Happy,
        MoodType::Grateful,
        MoodType::Peaceful,
        MoodType::Joyful,
        MoodType::Loved,
        MoodType::Hopeful,
        MoodType::Calm,
        MoodType::Excited,
        MoodType::Content,
        MoodType::Proud,
        MoodType::Energized,
        MoodType::Inspired,
        MoodType::Thoughtful,
        MoodType::Quiet,
        MoodType::Reflective,
        MoodType::Anxious,
        MoodType::Sad,
        MoodType::Tired,
        MoodType::Lonely,
        MoodType::Overwhelmed,
    ];

    pub fn as_tag(self) -> &'static str {
        match self {
            MoodType::Happy => "HAPPY",
            MoodType::Grateful => "GRATEFUL",
            MoodType::Peaceful => "PEACEFUL",
            MoodType::Joyful => "JOYFUL",
            MoodType::Loved => "LOVED",
            MoodType::Hopeful => "HOPEFUL",
            MoodType::Calm => "CALM",
            MoodType::Excited => "EXCITED",
            MoodType::Content => "CONTENT",
            MoodType::Proud => "PROUD",
            MoodType::Energized => "ENERGIZED",
            MoodType::Inspired => "INSPIRED",
            MoodType::Thoughtful => "THOUGHTFUL",
            MoodType::Quiet => "QUIET",
            MoodType::Reflective => "REFLECTIVE",
            MoodType::Anxious => "ANXIOUS",
            MoodType::Sad => "SAD",
            MoodType::Tired => "TIRED",
            MoodType::Lonely => "LONELY",
            MoodType::Overwhelmed => "OVERWHELMED",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MoodType::Happy => "Happy",
            MoodType::Grateful => "Grateful",
            MoodType::Peaceful => "Peaceful",
            MoodType::Joyful => "Joyful",
            MoodType::Loved => "Loved",
            MoodType::Hopeful => "Hopeful",
            MoodType::Calm => "Calm",
            MoodType::Excited => "Excited",
            MoodType::Content => "Content",
            MoodType::Proud => "Proud",
            MoodType::Energized => "Energized",
            MoodType::Inspired => "Inspired",
            MoodType::Thoughtful => "Thoughtful",
            MoodType::Quiet => "Quiet",
            MoodType::Reflective => "Reflective",
            MoodType::Anxious => "Anxious",
            MoodType::Sad => "Sad",
            MoodType::Tired => "Tired",
            MoodType::Lonely => "Lonely",
            MoodType::Overwhelmed => "Overwhelmed",
        }
    }

    /// The flower a mood blooms as in the garden and bouquets.
    pub fn flower(self) -> &'static str {
        match self {
            MoodType::Happy => "Sunflower",
            MoodType::Grateful => "Pink Rose",
            MoodType::Peaceful => "Lotus",
            MoodType::Joyful => "Yellow Daisy",
            MoodType::Loved => "Red Rose",
            MoodType::Hopeful => "Cherry Blossom",
            MoodType::Calm => "Jasmine",
            MoodType::Excited => "Marigold",
            MoodType::Content => "White Gerbera Daisy",
            MoodType::Proud => "Yellow Rose",
            MoodType::Energized => "Orange Lily",
            MoodType::Inspired => "Purple Tulip",
            MoodType::Thoughtful => "Purple Iris",
            MoodType::Quiet => "Baby's Breath",
            MoodType::Reflective => "White Chrysanthemum",
            MoodType::Anxious => "Lavender Stalk",
            MoodType::Sad => "Blue Hydrangea",
            MoodType::Tired => "Red Mushroom",
            MoodType::Lonely => "Single White Rose",
            MoodType::Overwhelmed => "Cluster of Field Daisies",
        }
    }

    /// Encouragement shown beside the heavier moods' garden plots.
    pub fn resilience_quote(self) -> Option<&'static str> {
        match self {
            MoodType::Sad => {
                Some("Blue blooms are evidence of a heart that feels deeply. You are brave.")
            }
            MoodType::Anxious => {
                Some("Even in heavy winds, these roots hold fast. You are strong and safe.")
            }
            MoodType::Overwhelmed => {
                Some("Every petal here is a victory of your gentle spirit. You are doing enough.")
            }
            MoodType::Tired => {
                Some("Quiet growth happens in the rest. You are beautifully human and deserving of peace.")
            }
            MoodType::Lonely => {
                Some("Each bloom here is a companion to your journey. You are seen and loved.")
            }
            _ => None,
        }
    }
}

impl fmt::Display for MoodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MoodType {
    type Err = PosyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        MoodType::ALL
            .iter()
            .copied()
            .find(|mood| {
                mood.as_tag().eq_ignore_ascii_case(wanted)
                    || mood.label().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| PosyError::UnknownMood(s.to_string()))
    }
}
