use std::collections::BTreeMap;

use tracing::debug;

use crate::error::{AnalyticsError, EXPECTED_PARTICIPANTS};
use crate::models::Record;

/// Counts the records sent by each distinct sender. System lines are skipped.
pub fn message_frequency(records: &[Record]) -> BTreeMap<String, usize> {
    let mut frequency = BTreeMap::new();
    for sender in records.iter().filter_map(|r| r.sender.as_ref()) {
        *frequency.entry(sender.clone()).or_insert(0) += 1;
    }
    frequency
}

/// Gets the names of the participants in the conversation.
///
/// Unless `allow_all` is set, exactly two senders are required. Names are
/// returned in sorted order.
pub fn resolve_participants(
    frequency: &BTreeMap<String, usize>,
    allow_all: bool,
) -> Result<Vec<String>, AnalyticsError> {
    let found = frequency.len();
    debug!(participants = found, allow_all, "resolving participants");

    if allow_all || found == EXPECTED_PARTICIPANTS {
        return Ok(frequency.keys().cloned().collect());
    }

    Err(AnalyticsError::InvalidParticipantCount {
        found,
        expected: EXPECTED_PARTICIPANTS,
    })
}
