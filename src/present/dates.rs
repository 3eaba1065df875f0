//! Relative date labels.
//!
//! ```text
//! same day     Today
//! 1 day        Yesterday
//! 2..=6 days   N days ago
//! 7..=29 days  N week(s) ago
//! otherwise    Jan 5, 2024
//! ```
//!
//! Days are whole elapsed 24-hour periods between `created` and `now`.
//! Timestamps in the future read as "Today".

use chrono::{DateTime, SecondsFormat, Utc};

pub fn relative_date(created: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let days = now.signed_duration_since(created).num_days();
    match days {
        d if d <= 0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        2..=6 => format!("{days} days ago"),
        7..=29 => {
            let weeks = days / 7;
            if weeks == 1 {
                "1 week ago".to_string()
            } else {
                format!("{weeks} weeks ago")
            }
        }
        _ => absolute_date(created),
    }
}

/// Short absolute form, e.g. `Mar 1, 2024`.
pub fn absolute_date(created: DateTime<Utc>) -> String {
    created.format("%b %-d, %Y").to_string()
}

/// Machine-readable form for `<time datetime>` and JSON-LD.
pub fn iso_date(created: DateTime<Utc>) -> String {
    created.to_rfc3339_opts(SecondsFormat::Secs, true)
}
