//! News aggregation store.
//!
//! Fans out one fetch per enabled source, waits for all of them to settle,
//! then merges into a single recency-ranked list. A failing source
//! contributes an empty list and nothing else; the aggregate never fails
//! because a source did.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::DateTime;
use futures_util::future::join_all;
use uuid::Uuid;

use crate::services::feed_client::FeedClient;
use crate::storage::{Storage, StorageKey};
use crate::store::Store;
use crate::types::errors::FeedError;
use crate::types::news::{default_news_sources, NewNewsSource, NewsItem, NewsSource};
use crate::types::state::FetchState;
use crate::utils::{strip_html, truncate_chars};

/// Each source contributes at most this many items to the merge pool.
const MAX_ITEMS_PER_SOURCE: usize = 5;
/// The merged list is capped to the most recent items.
const MAX_TOTAL_ITEMS: usize = 20;
/// Descriptions are clipped to this many characters.
const DESCRIPTION_CHARS: usize = 150;

pub struct NewsAggregator<C> {
    sources: Store<Vec<NewsSource>>,
    // Transient fetch cache, fully replaced per fetch; never persisted.
    news: Store<Vec<NewsItem>>,
    state: Store<FetchState>,
    client: C,
}

impl<C: FeedClient> NewsAggregator<C> {
    /// Loads persisted sources (seeding the defaults when nothing is
    /// stored) and starts with an empty item list in the Idle state.
    pub fn new(storage: Arc<Storage>, client: C) -> Self {
        let initial = storage.get(StorageKey::NewsSources, default_news_sources());
        let mut sources = Store::new(initial);
        sources
            .subscribe(move |value: &Vec<NewsSource>| storage.set(StorageKey::NewsSources, value));
        Self {
            sources,
            news: Store::new(Vec::new()),
            state: Store::new(FetchState::Idle),
            client,
        }
    }

    pub fn sources(&self) -> &[NewsSource] {
        self.sources.get()
    }

    pub fn news(&self) -> &[NewsItem] {
        self.news.get()
    }

    pub fn state(&self) -> &FetchState {
        self.state.get()
    }

    // === Source management ===

    /// Adds a source and returns its generated id. Does not fetch.
    pub fn add_source(&mut self, fields: NewNewsSource) -> String {
        let id = Uuid::new_v4().to_string();
        let source = NewsSource {
            id: id.clone(),
            name: fields.name,
            feed_url: fields.feed_url,
            enabled: fields.enabled,
        };
        self.sources.update(|list| list.push(source));
        id
    }

    /// Removes a source by id; no-op if absent.
    pub fn remove_source(&mut self, id: &str) {
        if !self.sources.get().iter().any(|s| s.id == id) {
            return;
        }
        self.sources.update(|list| list.retain(|s| s.id != id));
    }

    /// Flips a source's enabled flag. The item list is untouched until the
    /// next explicit fetch.
    pub fn toggle_source(&mut self, id: &str) {
        if !self.sources.get().iter().any(|s| s.id == id) {
            return;
        }
        self.sources.update(|list| {
            if let Some(source) = list.iter_mut().find(|s| s.id == id) {
                source.enabled = !source.enabled;
            }
        });
    }

    /// Replaces the source list with the built-in defaults.
    pub fn reset_to_defaults(&mut self) {
        self.sources.set(default_news_sources());
    }

    // === Aggregation ===

    /// Fetches every enabled source concurrently and replaces the item
    /// list with the merged result.
    ///
    /// With no enabled sources the list is cleared and the state stays
    /// Idle. A second call while one is in flight is not cancelled;
    /// whichever settles last wins.
    pub async fn fetch_news(&mut self) {
        let enabled: Vec<NewsSource> = self
            .sources
            .get()
            .iter()
            .filter(|s| s.enabled)
            .cloned()
            .collect();

        if enabled.is_empty() {
            self.news.set(Vec::new());
            self.state.set(FetchState::Idle);
            return;
        }

        self.state.set(FetchState::Loading);

        let client = &self.client;
        let fetches = enabled
            .iter()
            .map(|source| Self::fetch_source_items(client, source));
        let results = join_all(fetches).await;

        let mut seen = HashSet::new();
        let mut items: Vec<NewsItem> = results
            .into_iter()
            .flatten()
            .filter(|item| seen.insert(item.id.clone()))
            .collect();
        items.sort_by_key(|item| std::cmp::Reverse(published_timestamp(&item.published_at)));
        items.truncate(MAX_TOTAL_ITEMS);

        self.news.set(items);
        self.state.set(FetchState::Ready);
    }

    /// Alias for `fetch_news`, matching the host's refresh affordance.
    pub async fn refresh(&mut self) {
        self.fetch_news().await;
    }

    /// One source's contribution to the merge pool. Fetch or parse failure
    /// collapses to an empty list so the aggregate keeps going.
    async fn fetch_source_items(client: &C, source: &NewsSource) -> Vec<NewsItem> {
        let entries = match client.fetch_feed(&source.feed_url).await {
            Ok(entries) => entries,
            Err(err) => {
                log_source_failure(source, &err);
                return Vec::new();
            }
        };

        entries
            .into_iter()
            .take(MAX_ITEMS_PER_SOURCE)
            .map(|entry| NewsItem {
                // Derived from source and link, so refetching the same
                // entry is idempotent.
                id: format!("{}-{}", source.id, entry.link),
                title: strip_html(&entry.title),
                description: entry
                    .description
                    .map(|d| truncate_chars(&strip_html(&d), DESCRIPTION_CHARS)),
                url: entry.link,
                source: source.name.clone(),
                published_at: entry
                    .published
                    .map(|d| d.to_rfc3339())
                    .unwrap_or_default(),
                image_url: entry.image_url,
            })
            .collect()
    }
}

fn log_source_failure(source: &NewsSource, err: &FeedError) {
    log::warn!("news source '{}' failed: {}", source.name, err);
}

/// Millisecond timestamp for ranking; unparseable dates sort oldest.
fn published_timestamp(published_at: &str) -> i64 {
    DateTime::parse_from_rfc3339(published_at)
        .map(|d| d.timestamp_millis())
        .unwrap_or(i64::MIN)
}
