//! Site configuration.
//!
//! Everything has a default matching the published page, so an empty JSON
//! object is a valid configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::navigation::{RegistryError, Section, SectionRegistry};

/// Errors raised while loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid sections: {0}")]
    Sections(#[from] RegistryError),
    #[error("Invalid player setting: {0}")]
    Player(String),
}

/// How analyser bins are assigned to visualiser bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BinLayout {
    /// Bar `i` reads bin `i`.
    #[default]
    Leading,
    /// Bins are averaged into log-spaced bands from 20 Hz to Nyquist.
    Logarithmic,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Scroll offset (px) past which the nav bar switches to its compact style.
    pub scroll_threshold: f32,
    /// Distance (px) from the viewport top of the line a section must straddle to be active.
    pub detection_offset: f32,
    pub resume_url: String,
    pub sections: Vec<Section>,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            scroll_threshold: 50.0,
            detection_offset: 100.0,
            resume_url: "/resume.pdf".to_string(),
            sections: SectionRegistry::portfolio().sections().to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub track: PathBuf,
    pub default_volume: f32,
    pub looping: bool,
    pub fft_size: usize,
    pub smoothing: f32,
    pub min_db: f32,
    pub max_db: f32,
    pub bar_count: usize,
    pub bin_layout: BinLayout,
    /// Height (px) every bar keeps when idle or muted.
    pub bar_floor: f32,
    pub bar_max_height: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            track: PathBuf::from("music1.mp3"),
            default_volume: 0.6,
            looping: true,
            fft_size: 256,
            smoothing: 0.8,
            min_db: -100.0,
            max_db: -30.0,
            bar_count: 12,
            bin_layout: BinLayout::Leading,
            bar_floor: 2.0,
            bar_max_height: 24.0,
        }
    }
}

impl PlayerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Player(msg));

        if !self.fft_size.is_power_of_two() || self.fft_size < crate::audio::fft::MIN_FFT_SIZE {
            return invalid(format!(
                "fft_size must be a power of two >= {}, got {}",
                crate::audio::fft::MIN_FFT_SIZE,
                self.fft_size
            ));
        }
        if self.bar_count == 0 || self.bar_count > self.fft_size / 2 {
            return invalid(format!(
                "bar_count must be in 1..={}, got {}",
                self.fft_size / 2,
                self.bar_count
            ));
        }
        if self.min_db.is_nan() || self.max_db.is_nan() || self.min_db >= self.max_db {
            return invalid(format!("min_db ({}) must be below max_db ({})", self.min_db, self.max_db));
        }
        if !(0.0..1.0).contains(&self.smoothing) {
            return invalid(format!("smoothing must be in [0, 1), got {}", self.smoothing));
        }
        if self.bar_floor < 0.0 || self.bar_max_height < self.bar_floor {
            return invalid("bar heights must satisfy 0 <= bar_floor <= bar_max_height".to_string());
        }
        Ok(())
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub navigation: NavigationConfig,
    pub player: PlayerConfig,
}

impl SiteConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let mut config: SiteConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json_str(&text)?;
        log::info!("Loaded site config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Check cross-field constraints, clamping the default volume into range.
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        self.player.default_volume = self.player.default_volume.clamp(0.0, 1.0);
        self.player.validate()?;
        SectionRegistry::new(self.navigation.sections.clone())?;
        Ok(())
    }

    /// Build the section registry described by this configuration.
    pub fn registry(&self) -> Result<SectionRegistry, RegistryError> {
        SectionRegistry::new(self.navigation.sections.clone())
    }
}
