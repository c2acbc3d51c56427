use serde::{Deserialize, Serialize};

/// An article saved for later. `url` is unique across the live collection;
/// `read_at` is present iff `is_read`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReadingListItem {
    pub id: String,
    pub title: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,
    pub is_read: bool,
    pub saved_at: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_at: Option<i64>,
}

/// Fields supplied by the caller when saving an item.
#[derive(Debug, Clone)]
pub struct NewReadingItem {
    pub title: String,
    pub url: String,
    pub description: Option<String>,
    pub favicon: Option<String>,
}

/// Partial update for a reading-list item.
#[derive(Debug, Clone, Default)]
pub struct ReadingItemPatch {
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub favicon: Option<String>,
}
