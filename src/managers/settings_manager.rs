//! Settings store — the single source of truth for user preferences.
//! Other stores read settings through this manager but never own them.

use std::sync::Arc;

use crate::storage::{Storage, StorageKey};
use crate::store::Store;
use crate::types::settings::{
    DashboardSection, SearchEngine, Theme, UserSettings, WeatherLocation,
};

pub struct SettingsManager {
    settings: Store<UserSettings>,
}

impl SettingsManager {
    /// Loads persisted settings (falling back to defaults) and wires the
    /// on-commit persistence hook.
    pub fn new(storage: Arc<Storage>) -> Self {
        let initial = storage.get(StorageKey::Settings, UserSettings::default());
        let mut settings = Store::new(initial);
        settings.subscribe(move |value: &UserSettings| storage.set(StorageKey::Settings, value));
        Self { settings }
    }

    pub fn settings(&self) -> &UserSettings {
        self.settings.get()
    }

    pub fn theme(&self) -> Theme {
        self.settings.get().theme
    }

    pub fn search_engine(&self) -> SearchEngine {
        self.settings.get().search_engine
    }

    pub fn weather_location(&self) -> Option<WeatherLocation> {
        self.settings.get().weather_location.clone()
    }

    pub fn user_name(&self) -> &str {
        &self.settings.get().user_name
    }

    pub fn is_section_visible(&self, section: DashboardSection) -> bool {
        let s = self.settings.get();
        match section {
            DashboardSection::Weather => s.show_weather,
            DashboardSection::News => s.show_news,
            DashboardSection::QuickLinks => s.show_quick_links,
            DashboardSection::Bookmarks => s.show_bookmarks,
            DashboardSection::ReadingList => s.show_reading_list,
        }
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.settings.update(|s| s.theme = theme);
    }

    pub fn toggle_theme(&mut self) {
        self.settings.update(|s| {
            s.theme = match s.theme {
                Theme::Dark => Theme::Light,
                Theme::Light => Theme::Dark,
            };
        });
    }

    pub fn set_search_engine(&mut self, engine: SearchEngine) {
        self.settings.update(|s| s.search_engine = engine);
    }

    pub fn set_weather_location(&mut self, location: Option<WeatherLocation>) {
        self.settings.update(|s| s.weather_location = location);
    }

    pub fn set_user_name(&mut self, name: &str) {
        self.settings.update(|s| s.user_name = name.to_string());
    }

    pub fn toggle_section(&mut self, section: DashboardSection) {
        self.settings.update(|s| {
            let flag = match section {
                DashboardSection::Weather => &mut s.show_weather,
                DashboardSection::News => &mut s.show_news,
                DashboardSection::QuickLinks => &mut s.show_quick_links,
                DashboardSection::Bookmarks => &mut s.show_bookmarks,
                DashboardSection::ReadingList => &mut s.show_reading_list,
            };
            *flag = !*flag;
        });
    }

    /// Applies an arbitrary partial update in one commit.
    pub fn update(&mut self, f: impl FnOnce(&mut UserSettings)) {
        self.settings.update(f);
    }

    /// Restores factory defaults.
    pub fn reset(&mut self) {
        self.settings.set(UserSettings::default());
    }
}
