//! Small helpers shared across stores: favicon resolution, relative time
//! labels and HTML cleanup for feed payloads.

use chrono::{TimeZone, Utc};

/// Favicon URL for a page, via Google's favicon endpoint. Returns `None`
/// when the input is not a parseable URL with a host.
pub fn favicon_url(page_url: &str, size: u32) -> Option<String> {
    let parsed = url::Url::parse(page_url).ok()?;
    let host = parsed.host_str()?;
    Some(format!(
        "https://www.google.com/s2/favicons?domain={}&sz={}",
        host, size
    ))
}

/// Relative time label for an epoch-milliseconds timestamp: "just now",
/// "5m ago", "3h ago", "2d ago", falling back to a date for older values.
pub fn time_ago(timestamp_ms: i64) -> String {
    let seconds = (Utc::now().timestamp_millis() - timestamp_ms) / 1000;

    if seconds < 60 {
        return "just now".to_string();
    }
    if seconds < 3600 {
        return format!("{}m ago", seconds / 60);
    }
    if seconds < 86_400 {
        return format!("{}h ago", seconds / 3600);
    }
    if seconds < 604_800 {
        return format!("{}d ago", seconds / 86_400);
    }

    match Utc.timestamp_millis_opt(timestamp_ms).single() {
        Some(date) => date.format("%Y-%m-%d").to_string(),
        None => "just now".to_string(),
    }
}

/// Strips tags and decodes the common entities from an HTML fragment.
/// Feed titles and summaries routinely arrive with markup embedded.
pub fn strip_html(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    for ch in html.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => text.push(ch),
            _ => {}
        }
    }

    let text = text
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ");
    text.trim().to_string()
}

/// Truncates to at most `max` characters, on a char boundary.
pub fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
