// src/client/format.rs

use chrono::{DateTime, Utc};

/// Relative age of a comment as shown next to the author name.
///
/// Under a minute reads "Just now"; up to a week reads "N minutes/hours/days
/// ago"; anything older shows the date, e.g. `Mar 15, 2024`.
pub fn format_timestamp(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - at).num_seconds().max(0);
    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;

    if days > 7 {
        at.format("%b %-d, %Y").to_string()
    } else if days > 0 {
        ago(days, "day")
    } else if hours > 0 {
        ago(hours, "hour")
    } else if minutes > 0 {
        ago(minutes, "minute")
    } else {
        "Just now".to_string()
    }
}

fn ago(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{count} {unit}s ago")
    }
}

pub fn reply_count_label(count: usize) -> String {
    if count == 1 {
        "1 reply".to_string()
    } else {
        format!("{count} replies")
    }
}

/// Heading above the thread; counts top-level comments only.
pub fn comments_heading(count: usize) -> String {
    format!("{count} Comments")
}

/// A draft can be submitted once it has non-whitespace content.
pub fn is_submittable(draft: &str) -> bool {
    !draft.trim().is_empty()
}
