use serde::{Deserialize, Serialize};

/// A pinned shortcut on the dashboard. `order` is a dense zero-based rank;
/// exactly one link exists per rank.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuickLink {
    pub id: String,
    pub title: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,
    pub order: i32,
}

/// Fields supplied by the caller when adding a quick link.
#[derive(Debug, Clone)]
pub struct NewQuickLink {
    pub title: String,
    pub url: String,
    pub favicon: Option<String>,
}

/// Partial update for a quick link.
#[derive(Debug, Clone, Default)]
pub struct QuickLinkPatch {
    pub title: Option<String>,
    pub url: Option<String>,
    pub favicon: Option<String>,
}

/// Links seeded into a fresh store that has nothing persisted yet.
pub fn default_quick_links() -> Vec<QuickLink> {
    let seeds = [
        ("1", "Gmail", "https://mail.google.com"),
        ("2", "YouTube", "https://youtube.com"),
        ("3", "GitHub", "https://github.com"),
        ("4", "Reddit", "https://reddit.com"),
        ("5", "Twitter", "https://x.com"),
        ("6", "LinkedIn", "https://linkedin.com"),
    ];
    seeds
        .iter()
        .enumerate()
        .map(|(i, (id, title, url))| QuickLink {
            id: (*id).to_string(),
            title: (*title).to_string(),
            url: (*url).to_string(),
            favicon: None,
            order: i as i32,
        })
        .collect()
}
