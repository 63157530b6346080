use chrono::{Datelike, NaiveDate};

/// Number of fifteen-minute buckets in a day.
pub const BUCKETS_PER_DAY: usize = 24 * 4;

/// Width of a single time-of-day bucket, in minutes.
pub const BUCKET_MINUTES: u32 = 15;

/// Parses a `YYYY/MM/DD` date token as written in the transcript.
pub fn parse_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), "%Y/%m/%d").ok()
}

/// Day of the week for a date token, with Sunday at index `0` and Saturday at
/// index `6`.
pub fn weekday_index(date: &str) -> Option<usize> {
    parse_date(date).map(|d| d.weekday().num_days_from_sunday() as usize)
}

/// Converts an `HH:MM` (or `HH:MM:SS`) token to minutes since midnight.
/// Seconds are ignored.
///
/// Hours and minutes are not range checked, `25:70` gives `1570`. Values too
/// large for a `u32` saturate at `u32::MAX`.
pub fn minutes_since_midnight(time: &str) -> Option<u32> {
    let mut parts = time.trim().split(':');
    let hours: u32 = parts.next()?.parse().ok()?;
    let minutes: u32 = parts.next()?.parse().ok()?;
    Some(hours.saturating_mul(60).saturating_add(minutes))
}

/// Index of the fifteen-minute bucket for a number of minutes since midnight.
///
/// Anything past the end of the day is clamped into the last bucket.
pub fn time_bucket(minutes: u32) -> usize {
    ((minutes / BUCKET_MINUTES) as usize).min(BUCKETS_PER_DAY - 1)
}

/// Sums every `factor` adjacent buckets of a histogram, e.g. a factor of `2`
/// turns fifteen-minute buckets into half-hour buckets.
///
/// A trailing partial group is kept as its own bucket. A factor of `0` is
/// treated as `1`.
pub fn rebin(histogram: &[usize], factor: usize) -> Vec<usize> {
    histogram
        .chunks(factor.max(1))
        .map(|chunk| chunk.iter().sum())
        .collect()
}
