//! Weather, geocoding and geolocation provider boundaries.
//!
//! Three independent external calls with distinct failure taxonomies:
//! current conditions by coordinates, place-name search, and device
//! position. Open-Meteo serves the first two; device position comes from
//! the host (headless contexts fall back to [`GeolocationUnsupported`]).

use serde::Deserialize;

use crate::types::errors::{GeolocationError, WeatherError};
use crate::types::weather::{CurrentConditions, GeoPlace};

/// Conditions-by-coordinates plus place-name search. One provider
/// implements both because Open-Meteo exposes them side by side.
pub trait WeatherProvider {
    fn current_conditions(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> impl std::future::Future<Output = Result<CurrentConditions, WeatherError>>;

    fn search(
        &self,
        query: &str,
    ) -> impl std::future::Future<Output = Result<Vec<GeoPlace>, WeatherError>>;
}

/// Device position lookup.
pub trait GeolocationProvider {
    fn current_position(
        &self,
    ) -> impl std::future::Future<Output = Result<(f64, f64), GeolocationError>>;
}

/// Default position provider for contexts without a location capability.
/// Hosts with real geolocation inject their own implementation.
pub struct GeolocationUnsupported;

impl GeolocationProvider for GeolocationUnsupported {
    async fn current_position(&self) -> Result<(f64, f64), GeolocationError> {
        Err(GeolocationError::Unsupported)
    }
}

const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
const GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: ForecastCurrent,
}

#[derive(Debug, Deserialize)]
struct ForecastCurrent {
    temperature_2m: f64,
    apparent_temperature: f64,
    weather_code: i32,
    relative_humidity_2m: f64,
    wind_speed_10m: f64,
    is_day: i32,
}

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    #[serde(default)]
    results: Vec<GeocodingResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodingResult {
    name: String,
    #[serde(default)]
    country: String,
    latitude: f64,
    longitude: f64,
}

/// Open-Meteo client for conditions and geocoding.
pub struct OpenMeteoClient {
    http: reqwest::Client,
}

impl OpenMeteoClient {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }
}

impl Default for OpenMeteoClient {
    fn default() -> Self {
        Self::new()
    }
}

impl WeatherProvider for OpenMeteoClient {
    async fn current_conditions(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<CurrentConditions, WeatherError> {
        let response = self
            .http
            .get(FORECAST_URL)
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                (
                    "current",
                    "temperature_2m,apparent_temperature,weather_code,\
                     relative_humidity_2m,wind_speed_10m,is_day"
                        .to_string(),
                ),
            ])
            .send()
            .await
            .map_err(|e| WeatherError::Network(e.to_string()))?;

        let forecast: ForecastResponse = response
            .json()
            .await
            .map_err(|e| WeatherError::Decode(e.to_string()))?;

        let current = forecast.current;
        Ok(CurrentConditions {
            temperature: current.temperature_2m,
            apparent_temperature: current.apparent_temperature,
            weather_code: current.weather_code,
            humidity: current.relative_humidity_2m,
            wind_speed: current.wind_speed_10m,
            is_day: current.is_day == 1,
        })
    }

    async fn search(&self, query: &str) -> Result<Vec<GeoPlace>, WeatherError> {
        let response = self
            .http
            .get(GEOCODING_URL)
            .query(&[("name", query), ("count", "1")])
            .send()
            .await
            .map_err(|e| WeatherError::Network(e.to_string()))?;

        let geocoding: GeocodingResponse = response
            .json()
            .await
            .map_err(|e| WeatherError::Decode(e.to_string()))?;

        Ok(geocoding
            .results
            .into_iter()
            .map(|r| GeoPlace {
                name: r.name,
                country: r.country,
                latitude: r.latitude,
                longitude: r.longitude,
            })
            .collect())
    }
}
