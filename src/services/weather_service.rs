//! Weather store — location resolution chain plus a TTL-bounded cache.
//!
//! A cached reading is good for thirty minutes. Every fetch path ends in
//! `fetch_weather_for_location`, which stamps the reading, updates the
//! in-memory state and writes the persisted cache entry in one step.
//! `refresh` is the only way to force a new reading inside the window.

use std::sync::Arc;

use chrono::Utc;

use crate::managers::settings_manager::SettingsManager;
use crate::services::geo_client::{GeolocationProvider, WeatherProvider};
use crate::storage::{Storage, StorageKey};
use crate::store::Store;
use crate::types::errors::GeolocationError;
use crate::types::settings::WeatherLocation;
use crate::types::state::FetchState;
use crate::types::weather::WeatherData;

/// How long a cached reading stays valid.
const CACHE_DURATION_MS: i64 = 30 * 60 * 1000;

pub struct WeatherService<P, G> {
    storage: Arc<Storage>,
    weather: Store<Option<WeatherData>>,
    state: Store<FetchState>,
    provider: P,
    geolocation: G,
}

impl<P: WeatherProvider, G: GeolocationProvider> WeatherService<P, G> {
    /// Reuses a persisted reading only while it is inside the validity
    /// window; anything older is treated as absent.
    pub fn new(storage: Arc<Storage>, provider: P, geolocation: G) -> Self {
        let cached = Self::load_cached(&storage);
        Self {
            storage,
            weather: Store::new(cached),
            state: Store::new(FetchState::Idle),
            provider,
            geolocation,
        }
    }

    fn load_cached(storage: &Storage) -> Option<WeatherData> {
        let cached: Option<WeatherData> = storage.get(StorageKey::WeatherCache, None);
        cached.filter(|data| Self::now_ms() - data.updated_at < CACHE_DURATION_MS)
    }

    fn now_ms() -> i64 {
        Utc::now().timestamp_millis()
    }

    pub fn weather(&self) -> Option<&WeatherData> {
        self.weather.get().as_ref()
    }

    pub fn state(&self) -> &FetchState {
        self.state.get()
    }

    /// Fetches conditions for the configured location, falling through to
    /// device geolocation when none is set.
    pub async fn fetch_weather(&mut self, settings: &mut SettingsManager) {
        match settings.weather_location() {
            Some(location) => self.fetch_weather_for_location(location).await,
            None => self.request_geolocation(settings).await,
        }
    }

    /// Resolves the device position, reverse-geocodes it best-effort, then
    /// persists the location and fetches conditions. Each geolocation
    /// failure mode surfaces its own message; none is retried.
    pub async fn request_geolocation(&mut self, settings: &mut SettingsManager) {
        self.state.set(FetchState::Loading);

        let (latitude, longitude) = match self.geolocation.current_position().await {
            Ok(position) => position,
            Err(err) => {
                self.state.set(FetchState::Failed(geolocation_message(&err)));
                return;
            }
        };

        let mut location = WeatherLocation {
            latitude,
            longitude,
            city: None,
            country: None,
        };

        // Best-effort reverse lookup; raw coordinates are kept on failure.
        let query = format!("{:.2},{:.2}", latitude, longitude);
        if let Ok(places) = self.provider.search(&query).await {
            if let Some(place) = places.into_iter().next() {
                location.city = Some(place.name);
                location.country = Some(place.country);
            }
        }

        settings.set_weather_location(Some(location.clone()));
        self.fetch_weather_for_location(location).await;
    }

    /// Resolves a free-text place name and, on a match, both updates the
    /// configured location and immediately fetches conditions for it.
    /// Blank queries are a no-op.
    pub async fn search_city(&mut self, query: &str, settings: &mut SettingsManager) {
        if query.trim().is_empty() {
            return;
        }

        self.state.set(FetchState::Loading);

        let places = match self.provider.search(query).await {
            Ok(places) => places,
            Err(_) => {
                self.state
                    .set(FetchState::Failed("Failed to search for city".to_string()));
                return;
            }
        };

        let Some(place) = places.into_iter().next() else {
            self.state
                .set(FetchState::Failed("City not found".to_string()));
            return;
        };

        let location = WeatherLocation {
            latitude: place.latitude,
            longitude: place.longitude,
            city: Some(place.name),
            country: Some(place.country),
        };
        settings.set_weather_location(Some(location.clone()));
        self.fetch_weather_for_location(location).await;
    }

    /// Terminal step for every path: fetch conditions and, on success,
    /// write both the in-memory state and the persisted cache entry,
    /// stamped with the current time.
    pub async fn fetch_weather_for_location(&mut self, location: WeatherLocation) {
        self.state.set(FetchState::Loading);

        let conditions = match self
            .provider
            .current_conditions(location.latitude, location.longitude)
            .await
        {
            Ok(conditions) => conditions,
            Err(_) => {
                self.state
                    .set(FetchState::Failed("Failed to fetch weather data".to_string()));
                return;
            }
        };

        let label = location.city.clone().unwrap_or_else(|| {
            format!("{:.2}, {:.2}", location.latitude, location.longitude)
        });
        let data = WeatherData {
            temperature: conditions.temperature.round() as i32,
            apparent_temperature: conditions.apparent_temperature.round() as i32,
            weather_code: conditions.weather_code,
            humidity: conditions.humidity,
            wind_speed: conditions.wind_speed.round() as i32,
            is_day: conditions.is_day,
            location: label,
            updated_at: Self::now_ms(),
        };

        self.storage.set(StorageKey::WeatherCache, &data);
        self.weather.set(Some(data));
        self.state.set(FetchState::Ready);
    }

    /// Evicts the persisted cache entry and the in-memory reading, then
    /// refetches regardless of the validity window.
    pub async fn refresh(&mut self, settings: &mut SettingsManager) {
        self.storage.remove(StorageKey::WeatherCache);
        self.weather.set(None);
        self.fetch_weather(settings).await;
    }
}

fn geolocation_message(err: &GeolocationError) -> String {
    match err {
        GeolocationError::Unsupported => {
            "Geolocation is not supported in this environment".to_string()
        }
        GeolocationError::PermissionDenied => {
            "Location access denied. Please enable location or set a city in settings.".to_string()
        }
        GeolocationError::Unavailable => "Location unavailable".to_string(),
        GeolocationError::Timeout => "Location request timed out".to_string(),
        GeolocationError::Unknown(_) => "An unknown error occurred".to_string(),
    }
}
