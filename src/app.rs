//! Dashboard composition root.
//!
//! Central struct holding all domain stores, wired to one shared storage.
//! Stores are explicitly constructed and injected here — there are no
//! ambient singletons — so the host UI owns exactly one `Dashboard` and
//! every test can build its own.

use std::sync::Arc;

use crate::managers::bookmark_manager::BookmarkManager;
use crate::managers::quick_links_manager::QuickLinksManager;
use crate::managers::reading_list_manager::ReadingListManager;
use crate::managers::settings_manager::SettingsManager;
use crate::services::feed_client::{FeedClient, HttpFeedClient};
use crate::services::geo_client::{
    GeolocationProvider, GeolocationUnsupported, OpenMeteoClient, WeatherProvider,
};
use crate::services::news_aggregator::NewsAggregator;
use crate::services::weather_service::WeatherService;
use crate::storage::{MemoryBackend, SqliteBackend, Storage};

/// All six domain stores over one persistence boundary.
pub struct Dashboard<C = HttpFeedClient, P = OpenMeteoClient, G = GeolocationUnsupported> {
    pub storage: Arc<Storage>,
    pub settings: SettingsManager,
    pub bookmarks: BookmarkManager,
    pub quick_links: QuickLinksManager,
    pub reading_list: ReadingListManager,
    pub news: NewsAggregator<C>,
    pub weather: WeatherService<P, G>,
}

impl Dashboard {
    /// Opens a dashboard persisted in a SQLite file at `path`.
    pub fn open(path: &str) -> Result<Self, rusqlite::Error> {
        let backend = SqliteBackend::open(path)?;
        Ok(Self::with_clients(
            Storage::new(backend),
            HttpFeedClient::new(),
            OpenMeteoClient::new(),
            GeolocationUnsupported,
        ))
    }

    /// Opens a dashboard over an in-memory SQLite database.
    pub fn open_in_memory() -> Result<Self, rusqlite::Error> {
        let backend = SqliteBackend::open_in_memory()?;
        Ok(Self::with_clients(
            Storage::new(backend),
            HttpFeedClient::new(),
            OpenMeteoClient::new(),
            GeolocationUnsupported,
        ))
    }

    /// A dashboard that keeps state only for this session. Used by hosts
    /// running in contexts without a persistence medium.
    pub fn ephemeral() -> Self {
        Self::with_clients(
            Storage::disabled(),
            HttpFeedClient::new(),
            OpenMeteoClient::new(),
            GeolocationUnsupported,
        )
    }

    /// A dashboard over a process-local map, handy for tests.
    pub fn in_memory_map() -> Self {
        Self::with_clients(
            Storage::new(MemoryBackend::new()),
            HttpFeedClient::new(),
            OpenMeteoClient::new(),
            GeolocationUnsupported,
        )
    }
}

impl<C, P, G> Dashboard<C, P, G>
where
    C: FeedClient,
    P: WeatherProvider,
    G: GeolocationProvider,
{
    /// Full injection: every network collaborator is supplied by the
    /// caller. The storage is shared across all stores.
    pub fn with_clients(storage: Storage, feed: C, weather: P, geolocation: G) -> Self {
        let storage = Arc::new(storage);
        Self {
            settings: SettingsManager::new(Arc::clone(&storage)),
            bookmarks: BookmarkManager::new(Arc::clone(&storage)),
            quick_links: QuickLinksManager::new(Arc::clone(&storage)),
            reading_list: ReadingListManager::new(Arc::clone(&storage)),
            news: NewsAggregator::new(Arc::clone(&storage), feed),
            weather: WeatherService::new(Arc::clone(&storage), weather, geolocation),
            storage,
        }
    }

    /// Fetches weather through the settings-configured location chain.
    pub async fn fetch_weather(&mut self) {
        self.weather.fetch_weather(&mut self.settings).await;
    }

    /// Resolves a city by name, updating settings and conditions together.
    pub async fn search_city(&mut self, query: &str) {
        self.weather.search_city(query, &mut self.settings).await;
    }

    /// Forces a fresh weather reading, evicting the cache first.
    pub async fn refresh_weather(&mut self) {
        self.weather.refresh(&mut self.settings).await;
    }

    /// Fetches and merges every enabled news source.
    pub async fn fetch_news(&mut self) {
        self.news.fetch_news().await;
    }

    /// Removes everything this application persisted.
    pub fn clear_storage(&self) {
        self.storage.clear();
    }
}
