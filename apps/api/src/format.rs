//! Date and text formatting shared by the dashboard views.

use chrono::{DateTime, Datelike, NaiveDate, Utc};

/// `Nov 11, 2025`
pub fn short_date<D: Datelike>(date: &D) -> String {
    format_date(date, "%b %-d, %Y")
}

/// `November 11, 2025`
pub fn long_date<D: Datelike>(date: &D) -> String {
    format_date(date, "%B %-d, %Y")
}

/// `11/11/2025`
pub fn numeric_date<D: Datelike>(date: &D) -> String {
    format!("{}/{}/{}", date.month(), date.day(), date.year())
}

fn format_date<D: Datelike>(date: &D, pattern: &str) -> String {
    match NaiveDate::from_ymd_opt(date.year(), date.month(), date.day()) {
        Some(d) => d.format(pattern).to_string(),
        None => String::new(),
    }
}

/// How old a timestamp is, as shown in the inbox and the header dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeAgoStyle {
    /// `5 minutes ago`, then the short date after a day.
    Long,
    /// `5 min ago`, then the numeric date after a day.
    Compact,
}

pub fn time_ago(created_at: DateTime<Utc>, now: DateTime<Utc>, style: TimeAgoStyle) -> String {
    let secs = (now - created_at).num_seconds().max(0);
    let (sec, min, hr) = match style {
        TimeAgoStyle::Long => ("seconds", "minutes", "hours"),
        TimeAgoStyle::Compact => ("sec", "min", "hr"),
    };

    if secs < 60 {
        format!("{secs} {sec} ago")
    } else if secs < 3600 {
        format!("{} {min} ago", secs / 60)
    } else if secs < 86_400 {
        format!("{} {hr} ago", secs / 3600)
    } else {
        match style {
            TimeAgoStyle::Long => short_date(&created_at),
            TimeAgoStyle::Compact => numeric_date(&created_at),
        }
    }
}

/// Cuts `text` to `max` characters and appends `...` when it was longer.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let cut: String = text.chars().take(max).collect();
        format!("{cut}...")
    } else {
        text.to_string()
    }
}

/// `512 B`, `1.5 KB`, `2.0 MB`
pub fn file_size(bytes: i64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = 1024.0 * 1024.0;

    let b = bytes.max(0) as f64;
    if b < KB {
        format!("{} B", bytes.max(0))
    } else if b < MB {
        format!("{:.1} KB", b / KB)
    } else {
        format!("{:.1} MB", b / MB)
    }
}
