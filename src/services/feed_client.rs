//! Feed-fetch boundary.
//!
//! Given a feed URL, returns the parsed entries. Network and parse errors
//! are mapped to [`FeedError`] here so the aggregator can collapse them to
//! an empty list per source.

use crate::types::errors::FeedError;
use crate::types::news::FeedEntry;

/// Fetches and parses one feed.
pub trait FeedClient {
    fn fetch_feed(
        &self,
        feed_url: &str,
    ) -> impl std::future::Future<Output = Result<Vec<FeedEntry>, FeedError>>;
}

/// Production client: reqwest for transport, feed-rs for parsing.
/// Handles both RSS and Atom.
pub struct HttpFeedClient {
    http: reqwest::Client,
}

impl HttpFeedClient {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }
}

impl Default for HttpFeedClient {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedClient for HttpFeedClient {
    async fn fetch_feed(&self, feed_url: &str) -> Result<Vec<FeedEntry>, FeedError> {
        let response = self
            .http
            .get(feed_url)
            .send()
            .await
            .map_err(|e| FeedError::Network(e.to_string()))?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| FeedError::Network(e.to_string()))?;
        let parsed =
            feed_rs::parser::parse(&bytes[..]).map_err(|e| FeedError::Parse(e.to_string()))?;

        let entries = parsed
            .entries
            .into_iter()
            .filter_map(|entry| {
                // Entries without a link cannot be aggregated.
                let link = entry.links.first()?.href.clone();
                Some(FeedEntry {
                    title: entry.title.map(|t| t.content).unwrap_or_default(),
                    link,
                    description: entry.summary.map(|s| s.content),
                    published: entry.published.or(entry.updated),
                    image_url: entry
                        .media
                        .first()
                        .and_then(|m| m.thumbnails.first())
                        .map(|t| t.image.uri.clone()),
                })
            })
            .collect();

        Ok(entries)
    }
}
