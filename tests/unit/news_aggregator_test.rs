use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::{Duration, Utc};

use dashpad::services::feed_client::FeedClient;
use dashpad::services::news_aggregator::NewsAggregator;
use dashpad::storage::{MemoryBackend, Storage, StorageKey};
use dashpad::types::errors::FeedError;
use dashpad::types::news::{FeedEntry, NewNewsSource, NewsSource};
use dashpad::types::state::FetchState;

/// Test double serving canned entries per feed URL; URLs in `failing`
/// return a network error.
#[derive(Default)]
struct MockFeedClient {
    feeds: HashMap<String, Vec<FeedEntry>>,
    failing: HashSet<String>,
}

impl MockFeedClient {
    fn with_feed(mut self, url: &str, entries: Vec<FeedEntry>) -> Self {
        self.feeds.insert(url.to_string(), entries);
        self
    }

    fn with_failure(mut self, url: &str) -> Self {
        self.failing.insert(url.to_string());
        self
    }
}

impl FeedClient for MockFeedClient {
    async fn fetch_feed(&self, feed_url: &str) -> Result<Vec<FeedEntry>, FeedError> {
        if self.failing.contains(feed_url) {
            return Err(FeedError::Network("connection refused".to_string()));
        }
        Ok(self.feeds.get(feed_url).cloned().unwrap_or_default())
    }
}

fn entry(link: &str, minutes_ago: i64) -> FeedEntry {
    FeedEntry {
        title: format!("Story {}", link),
        link: link.to_string(),
        description: Some("A <b>story</b> worth reading".to_string()),
        published: Some(Utc::now() - Duration::minutes(minutes_ago)),
        image_url: None,
    }
}

fn source(id: &str, url: &str, enabled: bool) -> NewsSource {
    NewsSource {
        id: id.to_string(),
        name: format!("Source {}", id),
        feed_url: url.to_string(),
        enabled,
    }
}

fn aggregator_with(
    sources: Vec<NewsSource>,
    client: MockFeedClient,
) -> NewsAggregator<MockFeedClient> {
    let storage = Storage::new(MemoryBackend::new());
    storage.set(StorageKey::NewsSources, &sources);
    NewsAggregator::new(Arc::new(storage), client)
}

#[test]
fn test_fresh_store_seeds_default_sources() {
    let aggregator =
        NewsAggregator::new(Arc::new(Storage::new(MemoryBackend::new())), MockFeedClient::default());
    let ids: Vec<&str> = aggregator.sources().iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["hackernews", "techcrunch", "theverge"]);
    assert!(aggregator.sources()[0].enabled);
    assert!(!aggregator.sources()[2].enabled);
}

#[tokio::test]
async fn test_no_enabled_sources_clears_items_and_stays_idle() {
    let mut aggregator = aggregator_with(
        vec![source("a", "https://a/feed", false)],
        MockFeedClient::default(),
    );
    aggregator.fetch_news().await;
    assert!(aggregator.news().is_empty());
    assert_eq!(*aggregator.state(), FetchState::Idle);
}

#[tokio::test]
async fn test_failing_source_is_isolated() {
    let client = MockFeedClient::default()
        .with_feed(
            "https://a/feed",
            vec![entry("https://a/1", 10), entry("https://a/2", 20), entry("https://a/3", 30)],
        )
        .with_failure("https://b/feed");
    let mut aggregator = aggregator_with(
        vec![
            source("a", "https://a/feed", true),
            source("b", "https://b/feed", true),
        ],
        client,
    );

    aggregator.fetch_news().await;

    assert_eq!(aggregator.news().len(), 3);
    assert!(aggregator.news().iter().all(|i| i.source == "Source a"));
    // A failed source is fewer items, not an error state.
    assert_eq!(*aggregator.state(), FetchState::Ready);
    assert!(aggregator.state().error().is_none());
}

#[tokio::test]
async fn test_each_source_capped_before_merge() {
    let entries: Vec<FeedEntry> = (0..8)
        .map(|i| entry(&format!("https://a/{}", i), i))
        .collect();
    let client = MockFeedClient::default().with_feed("https://a/feed", entries);
    let mut aggregator = aggregator_with(vec![source("a", "https://a/feed", true)], client);

    aggregator.fetch_news().await;

    assert_eq!(aggregator.news().len(), 5);
}

#[tokio::test]
async fn test_merged_list_capped_at_twenty() {
    let mut client = MockFeedClient::default();
    let mut sources = Vec::new();
    for s in 0..6 {
        let url = format!("https://s{}/feed", s);
        let entries: Vec<FeedEntry> = (0..5)
            .map(|i| entry(&format!("https://s{}/{}", s, i), (s * 5 + i) as i64))
            .collect();
        client = client.with_feed(&url, entries);
        sources.push(source(&format!("s{}", s), &url, true));
    }
    let mut aggregator = aggregator_with(sources, client);

    aggregator.fetch_news().await;

    assert_eq!(aggregator.news().len(), 20);
    assert_eq!(*aggregator.state(), FetchState::Ready);
}

#[tokio::test]
async fn test_items_sorted_by_recency_descending() {
    let client = MockFeedClient::default()
        .with_feed("https://a/feed", vec![entry("https://a/old", 120), entry("https://a/new", 1)])
        .with_feed("https://b/feed", vec![entry("https://b/mid", 60)]);
    let mut aggregator = aggregator_with(
        vec![
            source("a", "https://a/feed", true),
            source("b", "https://b/feed", true),
        ],
        client,
    );

    aggregator.fetch_news().await;

    let urls: Vec<&str> = aggregator.news().iter().map(|i| i.url.as_str()).collect();
    assert_eq!(urls, vec!["https://a/new", "https://b/mid", "https://a/old"]);
}

#[tokio::test]
async fn test_duplicate_links_collapse_to_one_item() {
    let client = MockFeedClient::default().with_feed(
        "https://a/feed",
        vec![entry("https://a/same", 5), entry("https://a/same", 5)],
    );
    let mut aggregator = aggregator_with(vec![source("a", "https://a/feed", true)], client);

    aggregator.fetch_news().await;

    assert_eq!(aggregator.news().len(), 1);
    assert_eq!(aggregator.news()[0].id, "a-https://a/same");
}

#[tokio::test]
async fn test_items_are_cleaned_for_display() {
    let long_description = format!("<p>{}</p>", "x".repeat(400));
    let mut raw = entry("https://a/1", 5);
    raw.title = "Breaking: <em>news</em>".to_string();
    raw.description = Some(long_description);
    let client = MockFeedClient::default().with_feed("https://a/feed", vec![raw]);
    let mut aggregator = aggregator_with(vec![source("a", "https://a/feed", true)], client);

    aggregator.fetch_news().await;

    let item = &aggregator.news()[0];
    assert_eq!(item.title, "Breaking: news");
    assert_eq!(item.description.as_ref().unwrap().chars().count(), 150);
}

#[tokio::test]
async fn test_refetch_replaces_items_wholesale() {
    let client = MockFeedClient::default().with_feed(
        "https://a/feed",
        vec![entry("https://a/1", 5), entry("https://a/2", 6)],
    );
    let mut aggregator = aggregator_with(vec![source("a", "https://a/feed", true)], client);

    aggregator.fetch_news().await;
    assert_eq!(aggregator.news().len(), 2);

    // Disabling the only source and refetching clears the transient cache.
    aggregator.toggle_source("a");
    aggregator.refresh().await;
    assert!(aggregator.news().is_empty());
    assert_eq!(*aggregator.state(), FetchState::Idle);
}

#[tokio::test]
async fn test_toggle_source_does_not_refetch() {
    let client = MockFeedClient::default().with_feed("https://a/feed", vec![entry("https://a/1", 5)]);
    let mut aggregator = aggregator_with(
        vec![
            source("a", "https://a/feed", true),
            source("b", "https://b/feed", false),
        ],
        client,
    );

    aggregator.fetch_news().await;
    let before: Vec<String> = aggregator.news().iter().map(|i| i.id.clone()).collect();

    aggregator.toggle_source("b");

    let after: Vec<String> = aggregator.news().iter().map(|i| i.id.clone()).collect();
    assert_eq!(before, after);
    assert!(aggregator.sources().iter().find(|s| s.id == "b").unwrap().enabled);
}

#[test]
fn test_source_management_roundtrip() {
    let backend = MemoryBackend::new();
    let storage = Storage::new(backend.clone());
    storage.set(StorageKey::NewsSources, &Vec::<NewsSource>::new());
    let mut aggregator = NewsAggregator::new(Arc::new(storage), MockFeedClient::default());

    let id = aggregator.add_source(NewNewsSource {
        name: "Lobsters".to_string(),
        feed_url: "https://lobste.rs/rss".to_string(),
        enabled: true,
    });
    assert_eq!(aggregator.sources().len(), 1);

    // Sources persist; the fetched items never do.
    let storage2 = Storage::new(backend);
    let reloaded = NewsAggregator::new(Arc::new(storage2), MockFeedClient::default());
    assert_eq!(reloaded.sources().len(), 1);
    assert!(reloaded.news().is_empty());

    aggregator.remove_source(&id);
    assert!(aggregator.sources().is_empty());
}

#[tokio::test]
async fn test_unparseable_dates_sort_oldest() {
    let mut undated = entry("https://a/undated", 0);
    undated.published = None;
    let client = MockFeedClient::default()
        .with_feed("https://a/feed", vec![undated, entry("https://a/dated", 30)]);
    let mut aggregator = aggregator_with(vec![source("a", "https://a/feed", true)], client);

    aggregator.fetch_news().await;

    let urls: Vec<&str> = aggregator.news().iter().map(|i| i.url.as_str()).collect();
    assert_eq!(urls, vec!["https://a/dated", "https://a/undated"]);
}
