//! The background music toggle: transport, volume and a live bar visualiser.

use super::output::{AudioOutput, PlaybackError};
use super::scheduler::FrameScheduler;
use super::session::{AudioSession, AudioSessionState};
use super::spectrum::{BarStyle, LiveAnalyzer, SpectrumFrame};
use crate::config::{ConfigError, PlayerConfig};

/// Combined transport/mute state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerPhase {
    Paused { muted: bool },
    Playing,
    MutedWhilePlaying,
}

impl PlayerPhase {
    fn from_state(state: &AudioSessionState) -> Self {
        match (state.is_playing, state.is_muted) {
            (false, muted) => PlayerPhase::Paused { muted },
            (true, false) => PlayerPhase::Playing,
            (true, true) => PlayerPhase::MutedWhilePlaying,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PlayerPhase::Paused { .. } => "Paused",
            PlayerPhase::Playing => "Playing",
            PlayerPhase::MutedWhilePlaying => "Muted",
        }
    }
}

/// Map a pointer position on the volume slider to a volume in `0.0..=1.0`.
pub fn volume_at(pointer_x: f32, left: f32, width: f32) -> f32 {
    if width <= 0.0 || !width.is_finite() {
        return 0.0;
    }
    let ratio = (pointer_x - left) / width;
    if ratio.is_nan() {
        0.0
    } else {
        ratio.clamp(0.0, 1.0)
    }
}

/// Transport surface for the nav-bar music player.
///
/// The analyzer runs exactly while the session is playing: starting playback
/// schedules its first frame and pausing cancels the pending one in the same call.
pub struct PlayerController<O: AudioOutput> {
    session: AudioSession<O>,
    analyzer: LiveAnalyzer,
    scheduler: FrameScheduler,
    style: BarStyle,
    hovered: bool,
}

impl<O: AudioOutput> PlayerController<O> {
    /// Validate `config` and take ownership of the output.
    pub fn new(output: O, config: &PlayerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            session: AudioSession::new(output, config.default_volume, config.looping),
            analyzer: LiveAnalyzer::new(config),
            scheduler: FrameScheduler::new(),
            style: BarStyle::from(config),
            hovered: false,
        })
    }

    pub async fn play(&mut self) -> Result<(), PlaybackError> {
        self.session.play().await?;
        self.analyzer.start(&mut self.scheduler);
        Ok(())
    }

    pub fn pause(&mut self) -> bool {
        let changed = self.session.pause();
        self.analyzer.stop(&mut self.scheduler);
        changed
    }

    /// Play if paused, pause if playing. A rejected play leaves the player paused.
    pub async fn toggle_playback(&mut self) -> Result<PlayerPhase, PlaybackError> {
        self.sync_ended();
        if self.session.state().is_playing {
            self.pause();
        } else {
            self.play().await?;
        }
        Ok(self.phase())
    }

    /// Blocking variant of [`PlayerController::toggle_playback`] for synchronous hosts.
    pub fn toggle_playback_blocking(&mut self) -> Result<PlayerPhase, PlaybackError> {
        pollster::block_on(self.toggle_playback())
    }

    pub fn toggle_mute(&mut self) -> bool {
        let muted = self.session.toggle_mute();
        self.analyzer.set_muted(muted);
        muted
    }

    pub fn set_volume(&mut self, volume: f32) -> f32 {
        self.session.set_volume(volume)
    }

    /// Click or drag on the slider track spanning `left..left + width`.
    pub fn set_volume_from_pointer(&mut self, pointer_x: f32, left: f32, width: f32) -> f32 {
        self.set_volume(volume_at(pointer_x, left, width))
    }

    /// A track that ran out stops the visualiser in the same transition.
    fn sync_ended(&mut self) {
        if self.session.sync_ended() {
            self.analyzer.stop(&mut self.scheduler);
        }
    }

    /// Run one animation frame, refreshing the snapshot if playing.
    pub fn tick(&mut self) -> &SpectrumFrame {
        self.sync_ended();
        for handle in self.scheduler.run_frame() {
            self.analyzer
                .on_frame(handle, &mut self.session, &mut self.scheduler);
        }
        self.analyzer.frame()
    }

    /// Latest frame; the idle frame when not playing.
    pub fn current_snapshot(&self) -> &SpectrumFrame {
        self.analyzer.frame()
    }

    pub fn bar_heights(&self) -> Vec<f32> {
        self.current_snapshot().bar_heights(&self.style)
    }

    pub fn state(&self) -> AudioSessionState {
        self.session.state()
    }

    pub fn phase(&self) -> PlayerPhase {
        PlayerPhase::from_state(&self.session.state())
    }

    pub fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
    }

    /// Whether the visualiser and volume controls are showing.
    pub fn is_expanded(&self) -> bool {
        self.hovered
    }

    /// Pulse ring around the button: only while audibly playing.
    pub fn shows_pulse(&self) -> bool {
        self.phase() == PlayerPhase::Playing
    }

    /// e.g. `"Playing • 60%"`.
    pub fn status_line(&self) -> String {
        format!(
            "{} • {}%",
            self.phase().label(),
            (self.session.state().volume * 100.0).round() as u32
        )
    }

    pub fn pending_frames(&self) -> usize {
        self.scheduler.pending_count()
    }

    pub fn output(&self) -> &O {
        self.session.output()
    }
}

impl<O: AudioOutput> Drop for PlayerController<O> {
    fn drop(&mut self) {
        self.analyzer.stop(&mut self.scheduler);
    }
}
