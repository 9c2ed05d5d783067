//! Keyword-based priority classification.

use crate::ticket::Priority;

/// Any of these anywhere in the text makes a ticket HIGH.
pub const HIGH_KEYWORDS: &[&str] = &[
    "urgent",
    "immediately",
    "asap",
    "critical",
    "failure",
    "down",
    "payment failed",
    "data loss",
];

/// Checked only when no HIGH keyword matched.
pub const MEDIUM_KEYWORDS: &[&str] = &[
    "issue",
    "problem",
    "error",
    "slow",
    "delay",
    "warning",
    "unexpected",
];

/// Suggest a priority from the ticket text alone.
///
/// Case-insensitive substring search over `title + " " + description`.
/// The HIGH set always beats the MEDIUM set; with no match the result is LOW.
/// Matching is plain substring, so "downtime" and "breakdown" count as "down".
pub fn suggest_from_text(title: &str, description: Option<&str>) -> Priority {
    let text = format!("{} {}", title, description.unwrap_or_default()).to_lowercase();

    if HIGH_KEYWORDS.iter().any(|kw| text.contains(kw)) {
        Priority::High
    } else if MEDIUM_KEYWORDS.iter().any(|kw| text.contains(kw)) {
        Priority::Medium
    } else {
        Priority::Low
    }
}
