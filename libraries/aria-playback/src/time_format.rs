//! Duration string parsing and aggregation
//!
//! Track durations arrive as `mm:ss` display strings. Entries that are
//! missing or malformed contribute nothing to totals instead of failing.

use crate::album::SummaryLabels;
use crate::types::Track;

/// Parse a `mm:ss` (or `h:mm:ss`) string into whole seconds
///
/// Empty fields count as zero, so `"4:"` is four minutes. Returns `None`
/// without a `:`, for non-numeric or negative fields, for more than three
/// fields, and for values too large to represent.
pub fn parse(mmss: &str) -> Option<u64> {
    let fields: Vec<&str> = mmss.trim().split(':').collect();
    if !(2..=3).contains(&fields.len()) {
        return None;
    }

    fields.iter().try_fold(0u64, |total, field| {
        let field = field.trim();
        let value: u64 = if field.is_empty() {
            0
        } else {
            field.parse().ok()?
        };
        total.checked_mul(60)?.checked_add(value)
    })
}

/// Sum of all parseable track durations, in seconds
///
/// Saturates instead of overflowing.
pub fn total_seconds(tracks: &[Track]) -> u64 {
    tracks
        .iter()
        .filter_map(|t| t.duration.as_deref())
        .filter_map(parse)
        .fold(0, u64::saturating_add)
}

/// Aggregate a playlist's duration into a display string using default labels
///
/// `"1 hora 20 min"`, `"2 horas"`, `"55 min"`, `"0 min"` for an empty playlist.
pub fn aggregate(tracks: &[Track]) -> String {
    aggregate_with(tracks, &SummaryLabels::default())
}

/// Aggregate a playlist's duration using the given labels
pub fn aggregate_with(tracks: &[Track], labels: &SummaryLabels) -> String {
    format_total(total_seconds(tracks), labels)
}

/// Render a number of seconds as hours and whole minutes (seconds dropped)
pub fn format_total(total_seconds: u64, labels: &SummaryLabels) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;

    if hours == 0 {
        return format!("{} {}", minutes, labels.minutes);
    }

    let hour_word = if hours == 1 {
        &labels.hour_singular
    } else {
        &labels.hour_plural
    };

    if minutes > 0 {
        format!("{} {} {} {}", hours, hour_word, minutes, labels.minutes)
    } else {
        format!("{} {}", hours, hour_word)
    }
}

/// Render a clock position such as elapsed or total time
///
/// `m:ss` below one hour, `h:mm:ss` above. Negative and non-finite values
/// render as `0:00`.
pub fn format_clock(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };

    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}
