//! Best-effort news extraction from free-text agent replies.
//!
//! The agent is asked for "a list of recent news items" but is not required
//! to honor any format, so this is a presentation heuristic rather than a
//! parser: bullet lines start items, following lines become the summary. It
//! is a pure function of the reply text, kept out of the HTTP layer so a
//! stricter parser could replace it without touching the endpoints.

use serde::{Deserialize, Serialize};

/// Line prefixes that start a new item.
const BULLET_MARKERS: [char; 3] = ['•', '-', '*'];

/// Fallback summaries are capped at this many characters.
const MAX_FALLBACK_SUMMARY: usize = 500;

/// Source label attached to synthesized fallback items.
const SYNTHETIC_SOURCE: &str = "AI News Agent";

/// One extracted news item. Derived and lossy: items have no stable identity
/// across calls and no deduplication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_date: Option<String>,
}

impl NewsItem {
    fn bullet(title: String, summary: String) -> Self {
        Self {
            title,
            summary,
            source: None,
            url: None,
            published_date: None,
        }
    }
}

/// Split a raw agent reply into an ordered list of news items.
///
/// A line starting with a bullet marker opens a new item whose title is the
/// rest of that line; subsequent non-bullet lines are space-joined into its
/// summary until the next bullet or end of text. Replies without any bullet
/// (including empty replies) synthesize exactly one item from the whole
/// text, truncated with an ellipsis when it exceeds the cap.
///
/// Deterministic: the same text always produces the same list.
pub fn parse_news_items(text: &str) -> Vec<NewsItem> {
    let mut items = Vec::new();
    let mut current: Option<(String, String)> = None;

    for line in text.lines() {
        let line = line.trim();
        if let Some(title) = strip_bullet(line) {
            if let Some((title, summary)) = current.take() {
                items.push(NewsItem::bullet(title, summary.trim().to_string()));
            }
            current = Some((title.to_string(), String::new()));
        } else if let Some((_, summary)) = current.as_mut() {
            if !line.is_empty() {
                summary.push(' ');
                summary.push_str(line);
            }
        }
    }

    if let Some((title, summary)) = current.take() {
        items.push(NewsItem::bullet(title, summary.trim().to_string()));
    }

    if items.is_empty() {
        items.push(NewsItem {
            title: "AI News Update".to_string(),
            summary: truncate_with_ellipsis(text, MAX_FALLBACK_SUMMARY),
            source: Some(SYNTHETIC_SOURCE.to_string()),
            url: None,
            published_date: None,
        });
    }

    items
}

fn strip_bullet(line: &str) -> Option<&str> {
    let mut chars = line.chars();
    match chars.next() {
        Some(c) if BULLET_MARKERS.contains(&c) => Some(chars.as_str().trim()),
        _ => None,
    }
}

/// Truncate to at most `max` characters, appending an ellipsis marker when
/// anything was cut. Counts chars, not bytes, so multi-byte text is safe.
fn truncate_with_ellipsis(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_bullets() {
        let items = parse_news_items("- Item A\nDetail A\n- Item B\nDetail B");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "Item A");
        assert!(items[0].summary.contains("Detail A"));
        assert_eq!(items[1].title, "Item B");
        assert!(items[1].summary.contains("Detail B"));
    }

    #[test]
    fn accepts_all_bullet_markers() {
        let items = parse_news_items("• Dot item\n* Star item\n- Dash item");
        let titles: Vec<_> = items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, ["Dot item", "Star item", "Dash item"]);
    }

    #[test]
    fn multi_line_summary_is_space_joined() {
        let items = parse_news_items("- Headline\nfirst part\nsecond part");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].summary, "first part second part");
    }

    #[test]
    fn no_bullets_yields_single_fallback() {
        let items = parse_news_items("Nothing noteworthy happened today.");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "AI News Update");
        assert_eq!(items[0].summary, "Nothing noteworthy happened today.");
        assert_eq!(items[0].source.as_deref(), Some("AI News Agent"));
    }

    #[test]
    fn empty_reply_yields_generic_fallback() {
        let items = parse_news_items("");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "AI News Update");
        assert_eq!(items[0].summary, "");
    }

    #[test]
    fn long_fallback_is_truncated_with_ellipsis() {
        let text = "x".repeat(600);
        let items = parse_news_items(&text);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].summary.chars().count(), 503);
        assert!(items[0].summary.ends_with("..."));
    }

    #[test]
    fn short_fallback_is_not_truncated() {
        let text = "y".repeat(500);
        let items = parse_news_items(&text);
        assert_eq!(items[0].summary, text);
        assert!(!items[0].summary.ends_with("..."));
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let text = "é".repeat(600);
        let items = parse_news_items(&text);
        assert!(items[0].summary.ends_with("..."));
        assert_eq!(items[0].summary.chars().count(), 503);
    }

    #[test]
    fn parsing_is_deterministic() {
        let text = "- One\ndetail\n\n- Two\nmore detail";
        assert_eq!(parse_news_items(text), parse_news_items(text));
    }

    #[test]
    fn bullet_items_carry_no_source() {
        let items = parse_news_items("- Headline\nDetail");
        assert_eq!(items[0].source, None);
        assert_eq!(items[0].url, None);
    }
}
