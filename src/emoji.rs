use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::AnalyticsError;

lazy_static! {
    // Flag pairs and keycaps come before the single code point classes so
    // they are taken as one emoji. Any astral code point counts, which also
    // picks up skin-tone modifiers on their own.
    static ref EMOJI_REGEX: Regex = Regex::new(concat!(
        r"[\u{1F1E6}-\u{1F1FF}]{2}",
        r"|[#-9]\u{FE0F}?\u{20E3}",
        r"|[\u{10000}-\u{10FFFF}]",
        r"|[\u{2700}-\u{27BF}\u{2600}-\u{26FF}\u{2190}-\u{21FF}]",
        r"|[\u{3299}\u{3297}\u{303D}\u{3030}\u{24C2}\u{203C}\u{2049}\u{2122}\u{2139}\u{00A9}\u{00AE}]",
        r"|[\u{25AA}\u{25AB}\u{25B6}\u{25C0}\u{25FB}-\u{25FE}]",
        r"|[\u{2B05}-\u{2B07}\u{2B1B}\u{2B1C}\u{2B50}\u{2B55}\u{2934}\u{2935}]",
        r"|[\u{231A}\u{231B}\u{2328}\u{23CF}\u{23E9}-\u{23F3}\u{23F8}-\u{23FA}]",
    ))
    .unwrap();
}

const VARIATION_SELECTOR: char = '\u{FE0F}';

/// Iterates over every emoji in `text`, in order, including skin-tone
/// modifiers.
pub fn find_emoji(text: &str) -> impl Iterator<Item = &str> {
    EMOJI_REGEX.find_iter(text).map(|m| m.as_str())
}

/// Sentiment bucket of an emoji.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentiment {
    Happy,
    Sad,
    Neutral,
}

/// Lookup tables consumed by the emoji statistics.
///
/// Every field falls back to the built-in table when omitted from a TOML
/// document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmojiTables {
    #[serde(default = "default_happy")]
    pub happy: Vec<String>,
    #[serde(default = "default_sad")]
    pub sad: Vec<String>,
    /// Skin-tone modifiers. Ties are broken in favour of the earlier entry.
    #[serde(default = "default_skin_tones")]
    pub skin_tones: [String; 5],
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn default_happy() -> Vec<String> {
    strings(&[
        "😀", "😁", "😂", "😃", "😄", "😆", "😊", "😍", "😘", "😗", "😙", "😚", "☺️", "🙂", "🤗",
        "❤️",
    ])
}

pub fn default_sad() -> Vec<String> {
    strings(&["💔", "😡", "😠", "😢", "😭", "😞", "😟", "🙁", "☹️"])
}

/// Fitzpatrick modifiers, lightest first.
pub fn default_skin_tones() -> [String; 5] {
    [
        "\u{1F3FB}".to_string(),
        "\u{1F3FC}".to_string(),
        "\u{1F3FD}".to_string(),
        "\u{1F3FE}".to_string(),
        "\u{1F3FF}".to_string(),
    ]
}

impl Default for EmojiTables {
    fn default() -> Self {
        Self {
            happy: default_happy(),
            sad: default_sad(),
            skin_tones: default_skin_tones(),
        }
    }
}

fn without_variation(emoji: &str) -> &str {
    emoji.trim_end_matches(VARIATION_SELECTOR)
}

fn table_contains(table: &[String], emoji: &str) -> bool {
    let emoji = without_variation(emoji);
    table.iter().any(|entry| without_variation(entry) == emoji)
}

impl EmojiTables {
    /// Loads tables from a TOML document, e.g.
    ///
    /// ```toml
    /// happy = ["😀", "🥳"]
    /// sad = ["😢"]
    /// ```
    pub fn from_toml_str(s: &str) -> Result<Self, AnalyticsError> {
        let tables: Self = toml::from_str(s)?;
        tables.validate()?;
        Ok(tables)
    }

    /// Rejects empty entries in any table and skin tones listed twice.
    pub fn validate(&self) -> Result<(), AnalyticsError> {
        for (table, entries) in [
            ("happy", self.happy.as_slice()),
            ("sad", self.sad.as_slice()),
            ("skin_tones", self.skin_tones.as_slice()),
        ] {
            if entries.iter().any(|e| without_variation(e).is_empty()) {
                return Err(AnalyticsError::EmptyTableEntry { table });
            }
        }

        for (idx, tone) in self.skin_tones.iter().enumerate() {
            if self.skin_tones[..idx].contains(tone) {
                return Err(AnalyticsError::DuplicateSkinTone { tone: tone.clone() });
            }
        }

        Ok(())
    }

    /// Classifies an emoji. Trailing variation selectors are ignored on both
    /// sides, so `"❤️"` in a table matches a bare `"❤"`.
    pub fn sentiment(&self, emoji: &str) -> Sentiment {
        if table_contains(&self.happy, emoji) {
            Sentiment::Happy
        } else if table_contains(&self.sad, emoji) {
            Sentiment::Sad
        } else {
            Sentiment::Neutral
        }
    }

    pub fn is_skin_tone(&self, emoji: &str) -> bool {
        self.skin_tones.iter().any(|tone| tone == emoji)
    }
}
