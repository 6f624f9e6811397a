//! Folio Core
//!
//! The stateful parts of a single-page portfolio: a scroll-synchronised
//! navigation bar and a background music player with a live spectrum display.
//!
//! # Features
//!
//! - Scroll-spy over an ordered section registry with stable tie-breaking
//! - Smooth-scroll navigation, mobile overlay menu and theme toggle
//! - Music transport that honours autoplay policy and keeps volume and mute orthogonal
//! - Per-animation-frame spectrum snapshots via RustFFT, cancelled on pause
//! - Track decoding (MP3, WAV, FLAC, AAC) via Symphonia
//!
//! Host platforms plug in through the [`navigation::Viewport`] and
//! [`audio::AudioOutput`] traits; [`navigation::StaticPage`] and
//! [`audio::TrackOutput`] implement them in-process.

pub mod audio;
pub mod config;
pub mod navigation;

pub use audio::{
    AudioOutput, AudioSession, AudioSessionState, PlaybackError, PlayerController, PlayerPhase,
    SpectrumFrame, TrackOutput,
};
pub use config::{BinLayout, ConfigError, NavigationConfig, PlayerConfig, SiteConfig};
pub use navigation::{
    NavigationController, NavigationState, ScrollTracker, Section, SectionRegistry, StaticPage,
    Viewport,
};
