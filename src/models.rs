use std::collections::BTreeMap;

use serde::Serialize;

use crate::datetime;
use crate::emoji::EmojiTables;

/// Per-participant result of a statistics pass, keyed by participant name.
pub type PerParticipant<T> = BTreeMap<String, T>;

/// The two export header shapes that can be recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Grammar {
    /// `YYYY/MM/DD, HH:MM - sender: message` (Android exports).
    A,
    /// `[YYYY/MM/DD, HH:MM:SS] sender: message` (iOS exports).
    B,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    /// The date of the entry exactly as written, `YYYY/MM/DD`.
    pub date: String,
    /// The time of the entry as written, `HH:MM`. Seconds are discarded.
    pub time: String,
    /// The sender of the entry. Will be None for system lines (joins,
    /// encryption notices, etc.).
    pub sender: Option<String>,
    /// Everything between this entry's header and the next one. May span
    /// multiple lines and may still carry the line break that preceded the
    /// next header; use [`Record::text`] for the normalized body.
    pub body: String,
}

impl Record {
    /// The body with trailing line breaks removed.
    pub fn text(&self) -> &str {
        self.body.trim_end_matches(['\r', '\n'])
    }

    /// Minutes since midnight, or None if the time token is malformed.
    pub fn minute_of_day(&self) -> Option<u32> {
        datetime::minutes_since_midnight(&self.time)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ParseStringOptions {
    /// Force a grammar instead of detecting it.
    ///
    /// Manually specifying this skips the second pass when the export format
    /// is already known.
    pub grammar: Option<Grammar>,
}

#[derive(Debug, Clone, Default)]
pub struct AnalysisOptions {
    pub parse: ParseStringOptions,
    /// Compute statistics for every sender instead of requiring exactly two.
    pub allow_all_participants: bool,
    /// Lookup tables used by the emoji classifiers.
    pub tables: EmojiTables,
}

/// Message counts per weekday.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WeekdayCounts {
    pub monday: usize,
    pub tuesday: usize,
    pub wednesday: usize,
    pub thursday: usize,
    pub friday: usize,
    pub saturday: usize,
    pub sunday: usize,
}

impl WeekdayCounts {
    /// Builds the labelled counts from a week indexed with Sunday at `0`.
    pub fn from_sunday_indexed(week: [usize; 7]) -> Self {
        Self {
            monday: week[1],
            tuesday: week[2],
            wednesday: week[3],
            thursday: week[4],
            friday: week[5],
            saturday: week[6],
            sunday: week[0],
        }
    }
}

/// Best guess at a participant's preferred skin-tone modifier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkinColour {
    /// The winning modifier, or `"Unknown"` when none were used.
    pub colour: String,
    /// Share of the winning modifier among all modifiers used.
    pub confidence: f64,
}

impl SkinColour {
    pub const UNKNOWN: &'static str = "Unknown";

    pub fn unknown() -> Self {
        Self {
            colour: Self::UNKNOWN.to_string(),
            confidence: 1.0,
        }
    }
}
