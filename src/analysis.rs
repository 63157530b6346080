use serde::Serialize;
use tracing::debug;

use crate::emoji::EmojiTables;
use crate::models::{PerParticipant, Record, SkinColour, WeekdayCounts};
use crate::stats::{self, EmojiCounts};

/// Every statistic for a conversation, one field per statistic, each keyed
/// by participant name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub participants: Vec<String>,
    pub message_count: PerParticipant<usize>,
    pub word_count: PerParticipant<usize>,
    pub longest_message: PerParticipant<usize>,
    pub words_per_message: PerParticipant<f64>,
    pub message_streak: PerParticipant<usize>,
    pub message_day_of_week: PerParticipant<WeekdayCounts>,
    pub message_time: PerParticipant<Vec<usize>>,
    pub emoji_count: PerParticipant<EmojiCounts>,
    pub emoji_total: PerParticipant<usize>,
    pub emoji_average_happiness: PerParticipant<f64>,
    pub skin_colour: PerParticipant<SkinColour>,
    pub media_message_count: PerParticipant<usize>,
    pub location_message_count: PerParticipant<usize>,
}

impl Analysis {
    /// Runs every pass over the records. Independent passes run in parallel.
    pub fn compute(records: &[Record], names: &[String], tables: &EmojiTables) -> Self {
        debug!(
            records = records.len(),
            participants = names.len(),
            "computing statistics"
        );

        let ((message_count, word_count), (longest_message, message_streak)) = rayon::join(
            || {
                rayon::join(
                    || stats::message_count(records, names),
                    || stats::word_count(records, names),
                )
            },
            || {
                rayon::join(
                    || stats::longest_message(records, names),
                    || stats::message_streak(records, names),
                )
            },
        );
        let ((message_day_of_week, message_time), (emoji_count, skin_colour)) = rayon::join(
            || {
                rayon::join(
                    || stats::message_day_of_week(records, names),
                    || stats::message_time(records, names),
                )
            },
            || {
                rayon::join(
                    || stats::emoji_count(records, names, tables),
                    || stats::skin_colour(records, names, tables),
                )
            },
        );
        let (media_message_count, location_message_count) = rayon::join(
            || stats::media_message_count(records, names),
            || stats::location_message_count(records, names),
        );

        let words_per_message = stats::words_per_message(&message_count, &word_count, names);
        let emoji_total = stats::emoji_total(&emoji_count, names);
        let emoji_average_happiness = stats::emoji_average_happiness(&emoji_count, names, tables);

        Self {
            participants: names.to_vec(),
            message_count,
            word_count,
            longest_message,
            words_per_message,
            message_streak,
            message_day_of_week,
            message_time,
            emoji_count,
            emoji_total,
            emoji_average_happiness,
            skin_colour,
            media_message_count,
            location_message_count,
        }
    }
}
