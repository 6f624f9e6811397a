//! Background music playback and live visualisation.
//!
//! This module provides:
//! - Track decoding via Symphonia
//! - Web-Audio style byte spectrum analysis via RustFFT
//! - The [`AudioOutput`] seam and an in-process [`TrackOutput`]
//! - [`AudioSession`]: sole owner of transport, volume and mute
//! - [`LiveAnalyzer`]: per-animation-frame spectrum snapshots
//! - [`PlayerController`]: the composed transport surface

pub mod fft;
pub mod loader;
pub mod output;
pub mod player;
pub mod scheduler;
pub mod session;
pub mod spectrum;
pub mod synth;

pub use fft::{log_bands, SpectrumAnalyzer};
pub use loader::{decode_bytes, load_track, AudioError, TrackData};
pub use output::{AudioOutput, ContextState, PlaybackError, TrackOutput};
pub use player::{volume_at, PlayerController, PlayerPhase};
pub use scheduler::{FrameHandle, FrameScheduler};
pub use session::{AudioSession, AudioSessionState, Transport};
pub use spectrum::{BarStyle, FrameKind, LiveAnalyzer, SpectrumFrame};
pub use synth::{generate_chord, generate_sine, generate_white_noise};
