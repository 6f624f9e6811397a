//! Live spectrum snapshots for the player's bar visualiser.

use super::fft::{log_bands, SpectrumAnalyzer};
use super::output::AudioOutput;
use super::session::AudioSession;
use super::scheduler::{FrameHandle, FrameScheduler};
use crate::config::{BinLayout, PlayerConfig};

/// Why a frame looks the way it does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    /// Measured from the audio tap on this frame.
    Live,
    /// Playing but muted; bars sit at the floor.
    Muted,
    /// Not playing.
    Idle,
}

/// One instant of per-bar amplitude, each level in `0.0..=1.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectrumFrame {
    kind: FrameKind,
    levels: Vec<f32>,
}

impl SpectrumFrame {
    pub fn idle(bars: usize) -> Self {
        Self {
            kind: FrameKind::Idle,
            levels: vec![0.0; bars],
        }
    }

    pub fn muted(bars: usize) -> Self {
        Self {
            kind: FrameKind::Muted,
            levels: vec![0.0; bars],
        }
    }

    pub fn live(levels: Vec<f32>) -> Self {
        Self {
            kind: FrameKind::Live,
            levels: levels.into_iter().map(|l| l.clamp(0.0, 1.0)).collect(),
        }
    }

    pub fn kind(&self) -> FrameKind {
        self.kind
    }

    pub fn levels(&self) -> &[f32] {
        &self.levels
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Pixel heights for rendering. Non-live frames render every bar at the floor.
    pub fn bar_heights(&self, style: &BarStyle) -> Vec<f32> {
        match self.kind {
            FrameKind::Live => self
                .levels
                .iter()
                .map(|&level| (level * style.max_height).max(style.floor))
                .collect(),
            FrameKind::Muted | FrameKind::Idle => vec![style.floor; self.levels.len()],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarStyle {
    pub floor: f32,
    pub max_height: f32,
}

impl Default for BarStyle {
    fn default() -> Self {
        Self {
            floor: 2.0,
            max_height: 24.0,
        }
    }
}

impl From<&PlayerConfig> for BarStyle {
    fn from(config: &PlayerConfig) -> Self {
        Self {
            floor: config.bar_floor,
            max_height: config.bar_max_height,
        }
    }
}

/// Samples the audio tap once per animation frame while running.
///
/// Holds at most one pending frame request. [`LiveAnalyzer::stop`] cancels it,
/// and every fired frame schedules exactly one successor.
pub struct LiveAnalyzer {
    fft: SpectrumAnalyzer,
    window: Vec<f32>,
    bar_count: usize,
    layout: BinLayout,
    muted: bool,
    scheduled: Option<FrameHandle>,
    frame: SpectrumFrame,
}

impl LiveAnalyzer {
    pub fn new(config: &PlayerConfig) -> Self {
        let fft = SpectrumAnalyzer::new(config.fft_size)
            .with_smoothing(config.smoothing)
            .with_decibel_range(config.min_db, config.max_db);

        Self {
            window: vec![0.0; config.fft_size],
            fft,
            bar_count: config.bar_count,
            layout: config.bin_layout,
            muted: false,
            scheduled: None,
            frame: SpectrumFrame::idle(config.bar_count),
        }
    }

    pub fn is_running(&self) -> bool {
        self.scheduled.is_some()
    }

    pub fn bar_count(&self) -> usize {
        self.bar_count
    }

    /// Begin sampling on the next frame. No-op if already running.
    pub fn start(&mut self, scheduler: &mut FrameScheduler) {
        if self.scheduled.is_some() {
            return;
        }
        self.fft.reset();
        self.scheduled = Some(scheduler.request_frame());
    }

    /// Cancel the pending frame and fall back to the idle frame.
    ///
    /// Returns whether a pending request was cancelled.
    pub fn stop(&mut self, scheduler: &mut FrameScheduler) -> bool {
        self.frame = SpectrumFrame::idle(self.bar_count);
        match self.scheduled.take() {
            Some(handle) => scheduler.cancel_frame(handle),
            None => false,
        }
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Handle a fired frame. Handles this analyzer did not request are ignored.
    pub fn on_frame<O: AudioOutput>(
        &mut self,
        handle: FrameHandle,
        session: &mut AudioSession<O>,
        scheduler: &mut FrameScheduler,
    ) -> bool {
        if self.scheduled != Some(handle) {
            return false;
        }

        self.frame = if self.muted {
            SpectrumFrame::muted(self.bar_count)
        } else {
            self.capture(session)
        };
        self.scheduled = Some(scheduler.request_frame());
        true
    }

    fn capture<O: AudioOutput>(&mut self, session: &mut AudioSession<O>) -> SpectrumFrame {
        let written = session.tap(&mut self.window);
        self.window[written..].iter_mut().for_each(|s| *s = 0.0);

        let sample_rate = session.output().sample_rate();
        let bins = self.fft.byte_frequency_data(&self.window);

        let levels = match self.layout {
            BinLayout::Leading => (0..self.bar_count)
                .map(|i| bins.get(i).map_or(0.0, |&b| b as f32 / 255.0))
                .collect(),
            BinLayout::Logarithmic => log_bands(bins, sample_rate, self.bar_count)
                .into_iter()
                .map(|b| b / 255.0)
                .collect(),
        };

        SpectrumFrame::live(levels)
    }

    /// The frame measured on the most recent tick.
    pub fn frame(&self) -> &SpectrumFrame {
        &self.frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_live_heights_respect_floor_and_ceiling() {
        let frame = SpectrumFrame::live(vec![0.0, 0.5, 1.0, 2.0]);
        let heights = frame.bar_heights(&BarStyle::default());
        assert_eq!(heights, vec![2.0, 12.0, 24.0, 24.0]);
    }

    #[test]
    fn test_muted_frame_renders_floor() {
        let frame = SpectrumFrame::muted(12);
        assert_eq!(frame.kind(), FrameKind::Muted);
        assert!(frame.bar_heights(&BarStyle::default()).iter().all(|&h| h == 2.0));
    }

    #[test]
    fn test_start_and_stop_pair_up() {
        let mut scheduler = FrameScheduler::new();
        let mut analyzer = LiveAnalyzer::new(&PlayerConfig::default());

        analyzer.start(&mut scheduler);
        analyzer.start(&mut scheduler);
        assert_eq!(scheduler.pending_count(), 1);

        assert!(analyzer.stop(&mut scheduler));
        assert!(!analyzer.stop(&mut scheduler));
        assert_eq!(scheduler.pending_count(), 0);
        assert!(!analyzer.is_running());
    }
}
