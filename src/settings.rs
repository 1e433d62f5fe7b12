//! Audio settings and preferences
//!
//! Persisted in LocalStorage on the web; session state itself is never
//! persisted.

use serde::{Deserialize, Serialize};

/// User preferences for the audio collaborator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Background music loop
    pub music_enabled: bool,
    /// One-shot effect tones
    pub sfx_enabled: bool,

    /// Master volume (0.0 - 1.0), feeds the destination
    pub master_volume: f32,
    /// Music bus volume (0.0 - 1.0)
    pub music_volume: f32,
    /// SFX bus volume (0.0 - 1.0)
    pub sfx_volume: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            music_enabled: true,
            sfx_enabled: true,
            master_volume: 0.7,
            music_volume: 0.3,
            sfx_volume: 0.5,
        }
    }
}

impl Settings {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "treasure_isle_settings";

    /// Clamp volumes into range; malformed stored values degrade to sane
    /// ones rather than erroring.
    pub fn sanitized(mut self) -> Self {
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.music_volume = self.music_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        self
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = serde_json::from_str::<Settings>(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings.sanitized();
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
