use crate::models::{Grammar, ParseStringOptions, Record};
use lazy_static::lazy_static;
use rayon::prelude::*;
use regex::Regex;
use tracing::{debug, trace};

lazy_static! {
    // Both headers are anchored to the start of a line, so a timestamp that
    // shows up in the middle of a message body never opens a new record.
    static ref GRAMMAR_A_HEADER: Regex = Regex::new(r"(?m)^[\u{200E}\u{200F}]*([0-9]{4}/[0-9]{2}/[0-9]{2}), ([0-9]{2}:[0-9]{2}) - (?:([^\n]*?): )?").unwrap();
    static ref GRAMMAR_B_HEADER: Regex = Regex::new(r"(?m)^[\u{200E}\u{200F}]*\[([0-9]{4}/[0-9]{2}/[0-9]{2}), ([0-9]{2}:[0-9]{2}):[0-9]{2}\] (?:([^\n]*?): )?").unwrap();
}

/// Order in which grammars are attempted when the format is not known.
const DETECTION_ORDER: [Grammar; 2] = [Grammar::A, Grammar::B];

impl Grammar {
    fn header_regex(self) -> &'static Regex {
        match self {
            Grammar::A => &*GRAMMAR_A_HEADER,
            Grammar::B => &*GRAMMAR_B_HEADER,
        }
    }
}

/// A header located in the transcript, borrowing its fields from the input.
#[derive(Debug)]
struct Header<'t> {
    /// Byte offset where the header starts; the previous record's body ends
    /// here.
    start: usize,
    /// Byte offset where the header ends; this record's body starts here.
    end: usize,
    date: &'t str,
    time: &'t str,
    sender: Option<&'t str>,
}

/// Finds every header of the given grammar in transcript order.
///
/// The scan position lives in the iterator created for this call, so
/// concurrent scans over different texts never share state.
fn locate_headers(text: &str, grammar: Grammar) -> Vec<Header<'_>> {
    grammar
        .header_regex()
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let header = Header {
                start: whole.start(),
                end: whole.end(),
                date: caps.get(1)?.as_str(),
                time: caps.get(2)?.as_str(),
                sender: caps.get(3).map(|m| m.as_str()),
            };
            trace!(
                offset = header.start,
                date = header.date,
                time = header.time,
                sender = ?header.sender,
                "found header"
            );
            Some(header)
        })
        .collect()
}

/// Splits a transcript into records using a single grammar.
///
/// A record's body runs from the end of its header up to the start of the
/// next header, or to the end of the input for the last record. Returns an
/// empty vector when the grammar matches nothing.
pub fn segment(text: &str, grammar: Grammar) -> Vec<Record> {
    let headers = locate_headers(text, grammar);

    let records: Vec<Record> = headers
        .par_iter()
        .enumerate()
        .map(|(idx, header)| {
            let body_end = headers.get(idx + 1).map_or(text.len(), |next| next.start);
            Record {
                date: header.date.to_string(),
                time: header.time.to_string(),
                sender: header.sender.map(str::to_string),
                body: text[header.end..body_end].to_string(),
            }
        })
        .collect();

    debug!(?grammar, records = records.len(), "segmented transcript");
    records
}

/// Returns the first grammar, in detection order, that finds at least one
/// header in the text.
pub fn detect_grammar(text: &str) -> Option<Grammar> {
    DETECTION_ORDER
        .into_iter()
        .find(|grammar| grammar.header_regex().is_match(text))
}

/// Parses a transcript into records.
///
/// Unless a grammar is forced through the options, Grammar A is attempted
/// first and Grammar B only when A produced nothing. An input neither
/// grammar recognizes yields an empty vector.
pub fn parse_messages(text: &str, options: &ParseStringOptions) -> Vec<Record> {
    if let Some(grammar) = options.grammar {
        debug!(?grammar, "using forced grammar");
        return segment(text, grammar);
    }

    detect_grammar(text).map_or_else(
        || {
            debug!("no grammar matched the transcript");
            Vec::new()
        },
        |grammar| segment(text, grammar),
    )
}
