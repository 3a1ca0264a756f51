//! Plain-text rendering of posts.
//!
//! Each post is a header line (`alias@MM/DD/YYYY HH:MM:SS <epoch>`) followed
//! by its body. Date separators are inserted between posts from different
//! days.

use chrono::{Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::{domain::message::Message, infra::config::DisplayZone};

const EMPTY_LIST: &str = "No posts yet.";

pub fn format_message(message: &Message, zone: DisplayZone) -> String {
    let stamp = message
        .epoch_seconds()
        .and_then(|epoch| to_display_time(epoch, zone))
        .map(|time| time.format("%m/%d/%Y %H:%M:%S").to_string());

    match stamp {
        Some(stamp) => format!(
            "{}@{} <{}>\n{}",
            message.alias,
            stamp,
            message.timestamp.trim(),
            message.body
        ),
        None => format!("{}@??? <{}>\n{}", message.alias, message.timestamp, message.body),
    }
}

/// Renders posts oldest first. Posts with an unreadable timestamp keep their
/// relative order and go last.
pub fn render_posts(messages: &[Message], zone: DisplayZone) -> String {
    if messages.is_empty() {
        return EMPTY_LIST.to_owned();
    }

    let mut ordered: Vec<&Message> = messages.iter().collect();
    ordered.sort_by_key(|message| {
        let epoch = message.epoch_seconds();
        (epoch.is_none(), epoch)
    });

    let mut lines = Vec::with_capacity(ordered.len() * 2);
    let mut previous_date: Option<NaiveDate> = None;

    for message in ordered {
        let date = message
            .epoch_seconds()
            .and_then(|epoch| to_display_time(epoch, zone))
            .map(|time| time.date());

        if let Some(date) = date.filter(|date| previous_date != Some(*date)) {
            lines.push(format_date_separator(date));
            previous_date = Some(date);
        }

        lines.push(format_message(message, zone));
    }

    lines.join("\n")
}

fn format_date_separator(date: NaiveDate) -> String {
    // e.g. "=== Friday, January 1 2021 ==="
    format!("=== {} ===", date.format("%A, %B %-d %Y"))
}

fn to_display_time(epoch: i64, zone: DisplayZone) -> Option<NaiveDateTime> {
    match zone {
        DisplayZone::Utc => Utc
            .timestamp_opt(epoch, 0)
            .single()
            .map(|time| time.naive_local()),
        DisplayZone::Local => Local
            .timestamp_opt(epoch, 0)
            .earliest()
            .map(|time| time.naive_local()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_header_and_body_in_utc() {
        let message = Message::new("alice", "hi", "1609459200");

        assert_eq!(
            format_message(&message, DisplayZone::Utc),
            "alice@01/01/2021 00:00:00 <1609459200>\nhi"
        );
    }

    #[test]
    fn formatting_is_deterministic() {
        let message = Message::new("alice", "hi", "1609459200");

        assert_eq!(
            format_message(&message, DisplayZone::Utc),
            format_message(&message, DisplayZone::Utc)
        );
    }

    #[test]
    fn unreadable_timestamp_keeps_raw_value() {
        let message = Message::new("bob", "hey", "yesterday");

        assert_eq!(
            format_message(&message, DisplayZone::Utc),
            "bob@??? <yesterday>\nhey"
        );
    }

    #[test]
    fn multi_line_body_is_kept_verbatim() {
        let message = Message::new("alice", "line one\nline two", "1609459200");

        assert!(format_message(&message, DisplayZone::Utc).ends_with("\nline one\nline two"));
    }

    #[test]
    fn empty_list_renders_placeholder() {
        assert_eq!(render_posts(&[], DisplayZone::Utc), "No posts yet.");
    }

    #[test]
    fn sorts_posts_and_inserts_separator_per_day() {
        let messages = vec![
            Message::new("carol", "next day", "1609545600"),
            Message::new("alice", "first", "1609459200"),
            Message::new("bob", "second", "1609459260"),
        ];

        let rendered = render_posts(&messages, DisplayZone::Utc);

        assert_eq!(
            rendered,
            "=== Friday, January 1 2021 ===\n\
             alice@01/01/2021 00:00:00 <1609459200>\nfirst\n\
             bob@01/01/2021 00:01:00 <1609459260>\nsecond\n\
             === Saturday, January 2 2021 ===\n\
             carol@01/02/2021 00:00:00 <1609545600>\nnext day"
        );
    }

    #[test]
    fn equal_timestamps_keep_backend_order() {
        let messages = vec![
            Message::new("bob", "b", "1609459200"),
            Message::new("alice", "a", "1609459200"),
        ];

        let rendered = render_posts(&messages, DisplayZone::Utc);

        let bob = rendered.find("bob@").expect("bob must be rendered");
        let alice = rendered.find("alice@").expect("alice must be rendered");
        assert!(bob < alice);
    }

    #[test]
    fn unreadable_timestamps_go_last_without_separator() {
        let messages = vec![
            Message::new("bob", "?", "soon"),
            Message::new("alice", "hi", "1609459200"),
        ];

        let rendered = render_posts(&messages, DisplayZone::Utc);
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], "=== Friday, January 1 2021 ===");
        assert_eq!(lines[3], "bob@??? <soon>");
        assert_eq!(lines.len(), 5);
    }
}
