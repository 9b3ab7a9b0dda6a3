//! Presentation helpers for chat messages.

use chrono::{DateTime, Utc};
use learnsphere_core::{ChatMessage, ChatRole};

/// Title used when a conversation has no user message yet
pub const UNTITLED_SESSION: &str = "New conversation";

/// Maximum characters of the first question kept in a session title
pub const SUMMARY_LENGTH: usize = 30;

/// Relative timestamp for a message list.
///
/// Under a minute reads "just now"; minutes, hours and days (under a week)
/// are counted; anything older is shown as `YYYY-MM-DD`. Timestamps in the
/// future count as "just now".
pub fn format_message_time(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(timestamp);

    let minutes = elapsed.num_minutes();
    if minutes < 1 {
        return "just now".to_string();
    }
    if minutes < 60 {
        return plural(minutes, "minute");
    }

    let hours = elapsed.num_hours();
    if hours < 24 {
        return plural(hours, "hour");
    }

    let days = elapsed.num_days();
    if days < 7 {
        return plural(days, "day");
    }

    timestamp.format("%Y-%m-%d").to_string()
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", count, unit)
    }
}

/// Session title derived from the first user message
pub fn session_summary(messages: &[ChatMessage]) -> String {
    let Some(first) = messages.iter().find(|m| m.role == ChatRole::User) else {
        return UNTITLED_SESSION.to_string();
    };

    let text = first.content.trim();
    if text.is_empty() {
        return UNTITLED_SESSION.to_string();
    }

    if text.chars().count() > SUMMARY_LENGTH {
        let head: String = text.chars().take(SUMMARY_LENGTH).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}
