//! Player preferences
//!
//! Persisted in LocalStorage on the web. Game progress is never saved.

use serde::{Deserialize, Serialize};

use crate::error::GameResult;

/// Sound preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Sound effects on/off (the mute toggle)
    pub sound_enabled: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            master_volume: 1.0,
        }
    }
}

impl Settings {
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "math_adventure_settings";

    pub fn from_json(json: &str) -> GameResult<Self> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.master_volume = settings.master_volume.clamp(0.0, 1.0);
        Ok(settings)
    }

    pub fn to_json(&self) -> GameResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Flip the mute toggle; returns the new `sound_enabled`
    pub fn toggle_sound(&mut self) -> bool {
        self.sound_enabled = !self.sound_enabled;
        self.sound_enabled
    }

    /// Stored preferences, or defaults when absent or unreadable
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let stored = local_storage()
            .and_then(|storage| storage.get_item(Self::STORAGE_KEY).ok().flatten());
        match stored.map(|json| Self::from_json(&json)) {
            Some(Ok(settings)) => {
                log::info!(
                    "Sound {}, volume {:.2}",
                    on_off(settings.sound_enabled),
                    settings.master_volume
                );
                settings
            }
            Some(Err(err)) => {
                log::warn!("Ignoring stored settings: {}", err);
                Self::default()
            }
            None => Self::default(),
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let Some(storage) = local_storage() else {
            log::debug!("No LocalStorage, settings not persisted");
            return;
        };
        match self.to_json() {
            Ok(json) if storage.set_item(Self::STORAGE_KEY, &json).is_ok() => {
                log::debug!("Saved sound {}", on_off(self.sound_enabled));
            }
            Ok(_) => log::warn!("LocalStorage rejected settings"),
            Err(err) => log::warn!("Could not encode settings: {}", err),
        }
    }

    /// Nothing persists off the web
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        log::trace!("Settings kept in memory: sound {}", on_off(self.sound_enabled));
    }
}

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

fn on_off(enabled: bool) -> &'static str {
    if enabled { "on" } else { "off" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(settings.sound_enabled);
        assert_eq!(settings.master_volume, 1.0);
    }

    #[test]
    fn test_partial_json_and_clamp() {
        let settings = Settings::from_json(r#"{ "master_volume": 3.5 }"#).unwrap();
        assert!(settings.sound_enabled);
        assert_eq!(settings.master_volume, 1.0);

        let muted = Settings::from_json(r#"{ "sound_enabled": false }"#).unwrap();
        assert!(!muted.sound_enabled);
    }

    #[test]
    fn test_toggle_sound() {
        let mut settings = Settings::default();
        assert!(!settings.toggle_sound());
        assert!(settings.toggle_sound());
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_native_save_load_is_stateless() {
        let mut settings = Settings::default();
        settings.toggle_sound();
        settings.save();
        assert_eq!(Settings::load(), Settings::default());
        assert_eq!(on_off(settings.sound_enabled), "off");
    }
}
