//! Per-participant counting passes over parsed records.
//!
//! Every pass starts from an entry for each requested name (see [`zeroed`]),
//! so a participant without qualifying records still shows up with a zero or
//! empty value. Records without a sender, or from a sender that is not in
//! `names`, never contribute.

use std::collections::BTreeMap;

use crate::classify::{is_location, is_media};
use crate::datetime::{self, BUCKETS_PER_DAY};
use crate::emoji::{EmojiTables, Sentiment, find_emoji};
use crate::models::{PerParticipant, Record, SkinColour, WeekdayCounts};

/// Per-participant occurrences of each distinct emoji.
pub type EmojiCounts = BTreeMap<String, usize>;

/// Builds a map with the default value for every name.
pub fn zeroed<T: Default>(names: &[String]) -> PerParticipant<T> {
    names.iter().map(|n| (n.clone(), T::default())).collect()
}

/// Pairs each record with its slot in `map`, skipping records that do not
/// belong to a tracked participant.
fn for_each_attributed<T>(
    records: &[Record],
    map: &mut PerParticipant<T>,
    mut f: impl FnMut(&mut T, &Record),
) {
    for record in records {
        let Some(sender) = record.sender.as_deref() else {
            continue;
        };
        if let Some(slot) = map.get_mut(sender) {
            f(slot, record);
        }
    }
}

/// Number of whitespace separated tokens in a message.
fn word_tokens(text: &str) -> usize {
    text.split_whitespace().count()
}

pub fn message_count(records: &[Record], names: &[String]) -> PerParticipant<usize> {
    let mut counts: PerParticipant<usize> = zeroed(names);
    for_each_attributed(records, &mut counts, |count, _| *count += 1);
    counts
}

/// Words sent by each participant, not counting media placeholders and
/// shared locations.
pub fn word_count(records: &[Record], names: &[String]) -> PerParticipant<usize> {
    let mut counts: PerParticipant<usize> = zeroed(names);
    for_each_attributed(records, &mut counts, |count, record| {
        let text = record.text();
        if !is_media(text) && !is_location(text) {
            *count += word_tokens(text);
        }
    });
    counts
}

/// Word count of each participant's longest message.
///
/// Unlike [`word_count`], media placeholders and locations are not skipped.
// TODO: decide whether this should share word_count's media/location filter.
pub fn longest_message(records: &[Record], names: &[String]) -> PerParticipant<usize> {
    let mut longest: PerParticipant<usize> = zeroed(names);
    for_each_attributed(records, &mut longest, |max, record| {
        *max = (*max).max(word_tokens(record.text()));
    });
    longest
}

/// Average words per message. A participant with no messages gets `NaN`.
pub fn words_per_message(
    message_count: &PerParticipant<usize>,
    word_count: &PerParticipant<usize>,
    names: &[String],
) -> PerParticipant<f64> {
    names
        .iter()
        .map(|name| {
            let words = word_count.get(name).copied().unwrap_or(0) as f64;
            let messages = message_count.get(name).copied().unwrap_or(0) as f64;
            (name.clone(), words / messages)
        })
        .collect()
}

/// Longest run of consecutive messages from each participant.
///
/// Messages from untracked senders and system lines do not break a run.
pub fn message_streak(records: &[Record], names: &[String]) -> PerParticipant<usize> {
    let mut streak: PerParticipant<usize> = zeroed(names);
    let mut current: Option<(&str, usize)> = None;

    for record in records {
        let Some(sender) = record.sender.as_deref() else {
            continue;
        };
        if !streak.contains_key(sender) {
            continue;
        }
        if let Some((previous, run)) = current.as_mut() {
            if *previous == sender {
                *run += 1;
                continue;
            }
        }
        commit_run(&mut streak, current);
        current = Some((sender, 1));
    }
    // The run still open when the transcript ends.
    commit_run(&mut streak, current);

    streak
}

fn commit_run(streak: &mut PerParticipant<usize>, run: Option<(&str, usize)>) {
    if let Some((name, length)) = run {
        if let Some(best) = streak.get_mut(name) {
            *best = (*best).max(length);
        }
    }
}

/// Messages sent on each day of the week.
///
/// Records whose date does not exist on the calendar, such as `2017/02/30`,
/// are not counted rather than rolled over into the following month.
pub fn message_day_of_week(records: &[Record], names: &[String]) -> PerParticipant<WeekdayCounts> {
    let mut weeks: PerParticipant<[usize; 7]> = zeroed(names);
    for_each_attributed(records, &mut weeks, |week, record| {
        if let Some(day) = datetime::weekday_index(&record.date) {
            week[day] += 1;
        }
    });

    weeks
        .into_iter()
        .map(|(name, week)| (name, WeekdayCounts::from_sunday_indexed(week)))
        .collect()
}

/// Messages per fifteen-minute interval of the day, 96 buckets starting at
/// midnight. Use [`datetime::rebin`] for coarser intervals.
pub fn message_time(records: &[Record], names: &[String]) -> PerParticipant<Vec<usize>> {
    let mut times: PerParticipant<Vec<usize>> = names
        .iter()
        .map(|n| (n.clone(), vec![0; BUCKETS_PER_DAY]))
        .collect();
    for_each_attributed(records, &mut times, |histogram, record| {
        if let Some(minutes) = record.minute_of_day() {
            histogram[datetime::time_bucket(minutes)] += 1;
        }
    });
    times
}

/// Occurrences of each emoji sent by each participant. Skin-tone modifiers
/// are left out, [`skin_colour`] counts those.
pub fn emoji_count(
    records: &[Record],
    names: &[String],
    tables: &EmojiTables,
) -> PerParticipant<EmojiCounts> {
    let mut emojis: PerParticipant<EmojiCounts> = zeroed(names);
    for_each_attributed(records, &mut emojis, |counts, record| {
        for emoji in find_emoji(record.text()) {
            if tables.is_skin_tone(emoji) {
                continue;
            }
            *counts.entry(emoji.to_string()).or_insert(0) += 1;
        }
    });
    emojis
}

pub fn emoji_total(emojis: &PerParticipant<EmojiCounts>, names: &[String]) -> PerParticipant<usize> {
    names
        .iter()
        .map(|name| {
            let total = emojis.get(name).map_or(0, |counts| counts.values().sum());
            (name.clone(), total)
        })
        .collect()
}

/// Share of happy emoji among the happy and sad emoji each participant used.
///
/// `0.5` when a participant used neither.
pub fn emoji_average_happiness(
    emojis: &PerParticipant<EmojiCounts>,
    names: &[String],
    tables: &EmojiTables,
) -> PerParticipant<f64> {
    names
        .iter()
        .map(|name| {
            let (mut happy, mut sad) = (0usize, 0usize);
            for (emoji, count) in emojis.get(name).into_iter().flatten() {
                match tables.sentiment(emoji) {
                    Sentiment::Happy => happy += count,
                    Sentiment::Sad => sad += count,
                    Sentiment::Neutral => {}
                }
            }
            let happiness = if happy + sad == 0 {
                0.5
            } else {
                happy as f64 / (happy + sad) as f64
            };
            (name.clone(), happiness)
        })
        .collect()
}

/// Guesses each participant's skin colour from the modifiers they used.
///
/// When several modifiers share the highest count, the one listed first in
/// [`EmojiTables::skin_tones`] wins.
pub fn skin_colour(
    records: &[Record],
    names: &[String],
    tables: &EmojiTables,
) -> PerParticipant<SkinColour> {
    let mut colours: PerParticipant<[usize; 5]> = zeroed(names);
    for_each_attributed(records, &mut colours, |counts, record| {
        let text = record.text();
        for (count, tone) in counts.iter_mut().zip(&tables.skin_tones) {
            *count += text.matches(tone.as_str()).count();
        }
    });

    colours
        .into_iter()
        .map(|(name, counts)| {
            let total: usize = counts.iter().sum();
            let mut winner = 0;
            for (idx, &count) in counts.iter().enumerate() {
                if count > counts[winner] {
                    winner = idx;
                }
            }
            let colour = if total == 0 {
                SkinColour::unknown()
            } else {
                SkinColour {
                    colour: tables.skin_tones[winner].clone(),
                    confidence: counts[winner] as f64 / total as f64,
                }
            };
            (name, colour)
        })
        .collect()
}

pub fn media_message_count(records: &[Record], names: &[String]) -> PerParticipant<usize> {
    let mut counts: PerParticipant<usize> = zeroed(names);
    for_each_attributed(records, &mut counts, |count, record| {
        if is_media(record.text()) {
            *count += 1;
        }
    });
    counts
}

pub fn location_message_count(records: &[Record], names: &[String]) -> PerParticipant<usize> {
    let mut counts: PerParticipant<usize> = zeroed(names);
    for_each_attributed(records, &mut counts, |count, record| {
        if is_location(record.text()) {
            *count += 1;
        }
    });
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(sender: Option<&str>, body: &str) -> Record {
        Record {
            date: "2017/03/06".to_string(),
            time: "10:00".to_string(),
            sender: sender.map(str::to_string),
            body: body.to_string(),
        }
    }

    fn timed(sender: &str, date: &str, time: &str) -> Record {
        Record {
            date: date.to_string(),
            time: time.to_string(),
            sender: Some(sender.to_string()),
            body: "m".to_string(),
        }
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_zeroed_includes_every_name() {
        let counts = message_count(&[record(Some("a"), "hi")], &names(&["a", "b"]));

        assert_eq!(counts["a"], 1);
        assert_eq!(counts["b"], 0);
    }

    #[test]
    fn test_message_count_skips_system_and_untracked() {
        let records = vec![
            record(Some("a"), "hi"),
            record(None, "a joined"),
            record(Some("c"), "hey"),
            record(Some("b"), "yo"),
            record(Some("a"), "<Media omitted>"),
        ];
        let counts = message_count(&records, &names(&["a", "b"]));

        assert_eq!(counts.len(), 2);
        assert_eq!(counts["a"], 2);
        assert_eq!(counts["b"], 1);
    }

    #[test]
    fn test_word_count_filters_media_and_location() {
        let records = vec![
            record(Some("a"), "one two  three\n"),
            record(Some("a"), "<Media omitted>\n"),
            record(Some("a"), "location: https://maps.google.com/?q=1,2"),
            record(Some("b"), "four\nfive"),
        ];
        let counts = word_count(&records, &names(&["a", "b"]));

        assert_eq!(counts["a"], 3);
        assert_eq!(counts["b"], 2);
    }

    #[test]
    fn test_longest_message_does_not_filter() {
        let records = vec![
            record(Some("a"), "one"),
            record(Some("a"), "live location: https://maps.google.com/?q=1,2"),
            record(Some("b"), "<Media omitted>"),
        ];
        let longest = longest_message(&records, &names(&["a", "b", "c"]));

        assert_eq!(longest["a"], 3);
        assert_eq!(longest["b"], 2);
        assert_eq!(longest["c"], 0);
    }

    #[test]
    fn test_words_per_message() {
        let records = vec![record(Some("a"), "one two"), record(Some("a"), "three")];
        let names = names(&["a", "b"]);
        let wpm = words_per_message(
            &message_count(&records, &names),
            &word_count(&records, &names),
            &names,
        );

        assert_eq!(wpm["a"], 1.5);
        assert!(wpm["b"].is_nan());
    }

    #[test]
    fn test_message_streak() {
        let records: Vec<Record> = ["A", "A", "B", "A", "A", "A", "B"]
            .into_iter()
            .map(|s| record(Some(s), "m"))
            .collect();
        let streak = message_streak(&records, &names(&["A", "B"]));

        assert_eq!(streak["A"], 3);
        assert_eq!(streak["B"], 1);
    }

    #[test]
    fn test_message_streak_flushes_final_run() {
        let records: Vec<Record> = ["A", "B", "B", "B"]
            .into_iter()
            .map(|s| record(Some(s), "m"))
            .collect();
        let streak = message_streak(&records, &names(&["A", "B"]));

        assert_eq!(streak["A"], 1);
        assert_eq!(streak["B"], 3);
    }

    #[test]
    fn test_message_streak_ignores_system_lines() {
        let records = vec![
            record(Some("A"), "m"),
            record(None, "A changed the subject"),
            record(Some("C"), "m"),
            record(Some("A"), "m"),
        ];
        let streak = message_streak(&records, &names(&["A", "B"]));

        assert_eq!(streak["A"], 2);
        assert_eq!(streak["B"], 0);
    }

    #[test]
    fn test_message_day_of_week() {
        let records = vec![
            timed("a", "2017/03/05", "10:00"),
            timed("a", "2017/03/06", "10:00"),
            timed("a", "2017/03/13", "10:00"),
            timed("a", "2017/02/30", "10:00"),
            timed("b", "2017/03/11", "10:00"),
        ];
        let week = message_day_of_week(&records, &names(&["a", "b"]));

        assert_eq!(
            week["a"],
            WeekdayCounts {
                sunday: 1,
                monday: 2,
                ..Default::default()
            }
        );
        assert_eq!(
            week["b"],
            WeekdayCounts {
                saturday: 1,
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_message_time() {
        let records = vec![
            timed("a", "2017/03/06", "00:00"),
            timed("a", "2017/03/06", "00:14"),
            timed("a", "2017/03/06", "13:55"),
            timed("a", "2017/03/06", "23:59"),
            timed("a", "2017/03/06", "99:99"),
            timed("a", "2017/03/06", "99999999:00"),
        ];
        let times = message_time(&records, &names(&["a", "b"]));

        assert_eq!(times["a"].len(), BUCKETS_PER_DAY);
        assert_eq!(times["a"][0], 2);
        assert_eq!(times["a"][55], 1);
        assert_eq!(times["a"][95], 3);
        assert_eq!(times["b"], vec![0; BUCKETS_PER_DAY]);
    }

    #[test]
    fn test_emoji_count_excludes_skin_tones() {
        let tables = EmojiTables::default();
        let records = vec![
            record(Some("a"), "😂😂 👍🏽"),
            record(Some("a"), "😂"),
            record(Some("b"), "no emoji"),
        ];
        let emojis = emoji_count(&records, &names(&["a", "b"]), &tables);

        assert_eq!(emojis["a"].len(), 2);
        assert_eq!(emojis["a"]["😂"], 3);
        assert_eq!(emojis["a"]["👍"], 1);
        assert!(emojis["b"].is_empty());

        let total = emoji_total(&emojis, &names(&["a", "b"]));
        assert_eq!(total["a"], 4);
        assert_eq!(total["b"], 0);
    }

    #[test]
    fn test_emoji_average_happiness() {
        let tables = EmojiTables::default();
        let records = vec![
            record(Some("a"), "😂😂😂 ❤️ 😢"),
            record(Some("b"), "🍕🍕 🚀"),
        ];
        let names = names(&["a", "b", "c"]);
        let emojis = emoji_count(&records, &names, &tables);
        let happiness = emoji_average_happiness(&emojis, &names, &tables);

        assert_eq!(happiness["a"], 0.8);
        assert_eq!(happiness["b"], 0.5);
        assert_eq!(happiness["c"], 0.5);
    }

    #[test]
    fn test_skin_colour() {
        let tables = EmojiTables::default();
        let records = vec![
            record(Some("a"), "👍🏽 👋🏽 👌🏽"),
            record(Some("a"), "🙏🏿"),
            record(Some("b"), "👍"),
        ];
        let colours = skin_colour(&records, &names(&["a", "b"]), &tables);

        assert_eq!(colours["a"].colour, "\u{1F3FD}");
        assert_eq!(colours["a"].confidence, 0.75);
        assert_eq!(colours["b"], SkinColour::unknown());
        assert_eq!(colours["b"].colour, "Unknown");
        assert_eq!(colours["b"].confidence, 1.0);
    }

    #[test]
    fn test_skin_colour_tie_prefers_first_tone() {
        let tables = EmojiTables::default();
        let records = vec![record(Some("a"), "👍🏿 👍🏼")];
        let colours = skin_colour(&records, &names(&["a"]), &tables);

        assert_eq!(colours["a"].colour, "\u{1F3FC}");
        assert_eq!(colours["a"].confidence, 0.5);
    }

    #[test]
    fn test_media_and_location_count() {
        let records = vec![
            record(Some("a"), "<Media omitted>\n"),
            record(Some("a"), "<Media omitted>"),
            record(Some("a"), "<Media omitted> caption"),
            record(Some("b"), "location: https://maps.google.com/?q=1,2\n"),
            record(None, "<Media omitted>"),
        ];
        let names = names(&["a", "b"]);
        let media = media_message_count(&records, &names);
        let location = location_message_count(&records, &names);

        assert_eq!(media["a"], 2);
        assert_eq!(media["b"], 0);
        assert_eq!(location["a"], 0);
        assert_eq!(location["b"], 1);
    }

    #[test]
    fn test_passes_are_idempotent() {
        let tables = EmojiTables::default();
        let records = vec![
            record(Some("a"), "hi 😂👍🏻"),
            record(Some("b"), "hello there"),
            record(Some("a"), "<Media omitted>"),
        ];
        let names = names(&["a", "b"]);

        assert_eq!(message_streak(&records, &names), message_streak(&records, &names));
        assert_eq!(word_count(&records, &names), word_count(&records, &names));
        assert_eq!(
            emoji_count(&records, &names, &tables),
            emoji_count(&records, &names, &tables)
        );
        assert_eq!(
            skin_colour(&records, &names, &tables),
            skin_colour(&records, &names, &tables)
        );
    }
}
