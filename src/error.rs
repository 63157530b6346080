//! Errors surfaced by the analysis pipeline.

/// Number of participants the two-party statistics expect.
pub const EXPECTED_PARTICIPANTS: usize = 2;

#[derive(Debug, thiserror::Error)]
pub enum AnalyticsError {
    #[error(
        "There were too {} participants in the conversation log (expected {expected}, got {found})",
        many_or_few(.found, .expected)
    )]
    InvalidParticipantCount { found: usize, expected: usize },

    #[error("Invalid emoji tables: {0}")]
    InvalidTables(#[from] toml::de::Error),

    #[error("Invalid emoji tables: empty entry in `{table}`")]
    EmptyTableEntry { table: &'static str },

    #[error("Invalid emoji tables: skin tone {tone:?} is listed more than once")]
    DuplicateSkinTone { tone: String },
}

fn many_or_few(found: &usize, expected: &usize) -> &'static str {
    if found > expected { "many" } else { "few" }
}

impl AnalyticsError {
    pub fn is_too_many(&self) -> bool {
        matches!(self, Self::InvalidParticipantCount { found, expected } if found > expected)
    }

    pub fn is_too_few(&self) -> bool {
        matches!(self, Self::InvalidParticipantCount { found, expected } if found < expected)
    }
}
