//! Visual settings and preferences
//!
//! Persisted in LocalStorage. None of these touch the simulation: fish, food,
//! and timers behave the same whatever is drawn.

use serde::{Deserialize, Serialize};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    /// Triangles per full circle when tessellating round shapes
    pub fn circle_segments(&self) -> u32 {
        match self {
            QualityPreset::Low => 10,
            QualityPreset::Medium => 20,
            QualityPreset::High => 36,
        }
    }

    /// Segments per seaweed strand
    pub fn strand_segments(&self) -> u32 {
        match self {
            QualityPreset::Low => 4,
            QualityPreset::Medium => 8,
            QualityPreset::High => 14,
        }
    }
}

/// Tank view settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Tessellation quality
    pub quality: QualityPreset,
    /// Draw rising bubbles
    pub bubbles: bool,
    /// Draw swaying seaweed
    pub seaweed: bool,
    /// Pulse the water surface
    pub shimmer: bool,
    /// Show the "click to feed" hint
    pub show_hint: bool,
    /// Reduced motion (no sway, no shimmer pulse)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            bubbles: true,
            seaweed: true,
            shimmer: true,
            show_hint: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Effective seaweed sway (respects reduced_motion)
    pub fn effective_sway(&self) -> bool {
        self.seaweed && !self.reduced_motion
    }

    /// Effective surface pulse (respects reduced_motion)
    pub fn effective_shimmer_pulse(&self) -> bool {
        self.shimmer && !self.reduced_motion
    }

    /// Parse settings JSON, falling back to defaults
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring stored settings: {}", e);
                Self::default()
            }
        }
    }

    /// LocalStorage key
    const STORAGE_KEY: &'static str = "fish_tank_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded settings from LocalStorage");
                return Self::from_json(&json);
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
        log::debug!("No {} store on native, using defaults", Self::STORAGE_KEY);
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduced_motion_overrides() {
        let settings = Settings {
            reduced_motion: true,
            ..Settings::default()
        };
        assert!(!settings.effective_sway());
        assert!(!settings.effective_shimmer_pulse());
        assert!(settings.seaweed);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{"quality":"High","bubbles":false}"#);
        assert_eq!(settings.quality, QualityPreset::High);
        assert!(!settings.bubbles);
        assert!(settings.seaweed);
    }

    #[test]
    fn test_garbage_json_uses_defaults() {
        assert_eq!(Settings::from_json("not json"), Settings::default());
    }
}
