pub mod analysis;
pub mod classify;
pub mod datetime;
pub mod emoji;
pub mod error;
pub mod models;
pub mod parser;
pub mod participants;
pub mod stats;

pub use crate::analysis::Analysis;
pub use crate::emoji::EmojiTables;
pub use crate::error::AnalyticsError;
pub use crate::models::{AnalysisOptions, Grammar, ParseStringOptions, Record};

use crate::participants::{message_frequency, resolve_participants};
use tracing::debug;

/// Parses a chat export into records.
///
/// Never fails: text that neither export format recognizes gives an empty
/// vector.
pub fn parse_string(s: &str, options: Option<ParseStringOptions>) -> Vec<Record> {
    let opts = options.unwrap_or_default();
    debug!(chars = s.len(), grammar = ?opts.grammar, "parse_string called");

    parser::parse_messages(s, &opts)
}

/// Parses a chat export and computes every statistic for its participants.
///
/// Fails when the emoji tables are invalid, or when exactly two participants
/// are required (the default) and the export has a different number of
/// senders.
pub fn analyze_string(s: &str, options: Option<AnalysisOptions>) -> Result<Analysis, AnalyticsError> {
    let opts = options.unwrap_or_default();
    opts.tables.validate()?;
    let records = parser::parse_messages(s, &opts.parse);
    let names = resolve_participants(&message_frequency(&records), opts.allow_all_participants)?;

    Ok(Analysis::compute(&records, &names, &opts.tables))
}
