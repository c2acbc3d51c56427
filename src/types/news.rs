use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A configured feed. Disabled sources are kept but skipped on fetch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewsSource {
    pub id: String,
    pub name: String,
    pub feed_url: String,
    pub enabled: bool,
}

/// Fields supplied by the caller when adding a source.
#[derive(Debug, Clone)]
pub struct NewNewsSource {
    pub name: String,
    pub feed_url: String,
    pub enabled: bool,
}

/// One aggregated headline. The id is derived from the source id and the
/// item link, so refetching the same entry always produces the same id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewsItem {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub url: String,
    pub source: String,
    pub published_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// A single entry as returned by the feed-fetch boundary, before it is
/// mapped into a `NewsItem`.
#[derive(Debug, Clone)]
pub struct FeedEntry {
    pub title: String,
    pub link: String,
    pub description: Option<String>,
    pub published: Option<DateTime<Utc>>,
    pub image_url: Option<String>,
}

/// Sources seeded into a fresh store that has nothing persisted yet.
pub fn default_news_sources() -> Vec<NewsSource> {
    vec![
        NewsSource {
            id: "hackernews".to_string(),
            name: "Hacker News".to_string(),
            feed_url: "https://hnrss.org/frontpage".to_string(),
            enabled: true,
        },
        NewsSource {
            id: "techcrunch".to_string(),
            name: "TechCrunch".to_string(),
            feed_url: "https://techcrunch.com/feed/".to_string(),
            enabled: true,
        },
        NewsSource {
            id: "theverge".to_string(),
            name: "The Verge".to_string(),
            feed_url: "https://www.theverge.com/rss/index.xml".to_string(),
            enabled: false,
        },
    ]
}
