use serde::{Deserialize, Serialize};

/// A cached weather reading. Valid for thirty minutes from `updated_at`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherData {
    pub temperature: i32,
    pub apparent_temperature: i32,
    pub weather_code: i32,
    pub humidity: f64,
    pub wind_speed: i32,
    pub is_day: bool,
    pub location: String,
    pub updated_at: i64,
}

/// Current conditions as returned by the conditions provider, before
/// rounding and labeling.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentConditions {
    pub temperature: f64,
    pub apparent_temperature: f64,
    pub weather_code: i32,
    pub humidity: f64,
    pub wind_speed: f64,
    pub is_day: bool,
}

/// A geocoding match for a free-text place query.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoPlace {
    pub name: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Human-readable label for a WMO weather code.
pub fn weather_condition(code: i32) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 | 48 => "Fog",
        51 | 53 | 55 => "Drizzle",
        56 | 57 => "Freezing drizzle",
        61 | 63 | 65 => "Rain",
        66 | 67 => "Freezing rain",
        71 | 73 | 75 => "Snowfall",
        77 => "Snow grains",
        80 | 81 | 82 => "Rain showers",
        85 | 86 => "Snow showers",
        95 => "Thunderstorm",
        96 | 99 => "Thunderstorm with hail",
        _ => "Clear sky",
    }
}
