use serde::{Deserialize, Serialize};

/// Color theme selection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    Light,
}

/// Search engine used by the host's search bar.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SearchEngine {
    Google,
    DuckDuckGo,
    Bing,
}

impl SearchEngine {
    /// Builds the engine's search URL for a query string.
    pub fn query_url(&self, query: &str) -> String {
        let base = match self {
            SearchEngine::Google => "https://www.google.com/search",
            SearchEngine::DuckDuckGo => "https://duckduckgo.com/",
            SearchEngine::Bing => "https://www.bing.com/search",
        };
        let mut url = url::Url::parse(base).expect("static URL is valid");
        url.query_pairs_mut().append_pair("q", query);
        url.into()
    }
}

/// A geographic location the weather widget reports on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherLocation {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

/// Dashboard sections whose visibility can be toggled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardSection {
    Weather,
    News,
    QuickLinks,
    Bookmarks,
    ReadingList,
}

/// User preferences. A single instance, replaced whole-object on every write.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserSettings {
    pub theme: Theme,
    pub search_engine: SearchEngine,
    pub weather_location: Option<WeatherLocation>,
    pub show_weather: bool,
    pub show_news: bool,
    pub show_quick_links: bool,
    pub show_bookmarks: bool,
    pub show_reading_list: bool,
    pub user_name: String,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            theme: Theme::Dark,
            search_engine: SearchEngine::Google,
            weather_location: None,
            show_weather: true,
            show_news: true,
            show_quick_links: true,
            show_bookmarks: true,
            show_reading_list: true,
            user_name: String::new(),
        }
    }
}
