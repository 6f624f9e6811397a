//! The audio output seam and an in-process implementation.
//!
//! [`AudioOutput`] is everything the player needs from the host: a context that
//! may start suspended, a single media element with play/pause/volume/mute, and
//! a tap that yields the most recent time-domain samples.

use std::cell::RefCell;
use std::rc::Rc;

use super::loader::TrackData;
use thiserror::Error;

/// Transient rejections from the audio platform.
///
/// None of these are fatal; the transport stays in its previous state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    #[error("Playback not allowed before a user gesture")]
    NotAllowed,
    #[error("Audio could not be decoded: {0}")]
    Decode(String),
    #[error("No media source attached")]
    NoSource,
    #[error("Audio context has been closed")]
    ContextClosed,
}

/// Lifecycle of the decoding/output context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextState {
    Suspended,
    Running,
    Closed,
}

/// A single audio element routed through an analysable context.
///
/// `resume` and `play` may complete on a later turn of the event loop, so they
/// are `async`; every other call takes effect immediately.
#[allow(async_fn_in_trait)]
pub trait AudioOutput {
    fn context_state(&self) -> ContextState;

    /// Resume a suspended context.
    async fn resume(&mut self) -> Result<(), PlaybackError>;

    /// Start (or continue) the media element.
    async fn play(&mut self) -> Result<(), PlaybackError>;

    fn pause(&mut self);

    fn set_volume(&mut self, volume: f32);

    fn set_muted(&mut self, muted: bool);

    fn set_looping(&mut self, looping: bool);

    /// Whether the element stopped on its own by reaching the end of a non-looping track.
    ///
    /// Cleared by the next successful `play`.
    fn is_ended(&self) -> bool;

    fn sample_rate(&self) -> u32;

    /// Copy the latest time-domain samples into `out`, returning how many were written.
    fn read_samples(&mut self, out: &mut [f32]) -> usize;

    /// Release the context. Further `resume`/`play` calls fail with `ContextClosed`.
    fn close(&mut self);
}

/// Plays a decoded [`TrackData`] against a simulated clock.
///
/// Emulates the browser autoplay policy: the context starts suspended and
/// refuses to resume until [`TrackOutput::grant_user_gesture`] has been called.
///
/// Cloning yields another handle to the same element, so the host can keep
/// one to drive the media clock after handing the other to the player.
#[derive(Debug, Clone)]
pub struct TrackOutput {
    inner: Rc<RefCell<TrackState>>,
}

#[derive(Debug)]
struct TrackState {
    track: Option<TrackData>,
    context: ContextState,
    gesture: bool,
    playing: bool,
    ended: bool,
    looping: bool,
    muted: bool,
    volume: f32,
    playhead: usize,
}

impl TrackOutput {
    /// Output with a mono track attached.
    pub fn new(track: TrackData) -> Self {
        Self::with_track(Some(track.into_mono()))
    }

    /// Output with no source, as when the media file failed to load.
    pub fn empty() -> Self {
        Self::with_track(None)
    }

    fn with_track(track: Option<TrackData>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(TrackState {
                track,
                context: ContextState::Suspended,
                gesture: false,
                playing: false,
                ended: false,
                looping: false,
                muted: false,
                volume: 1.0,
                playhead: 0,
            })),
        }
    }

    /// Record that the user has interacted with the page.
    pub fn grant_user_gesture(&self) {
        self.inner.borrow_mut().gesture = true;
    }

    pub fn is_playing(&self) -> bool {
        self.inner.borrow().playing
    }

    pub fn is_muted(&self) -> bool {
        self.inner.borrow().muted
    }

    pub fn volume(&self) -> f32 {
        self.inner.borrow().volume
    }

    /// Gain actually reaching the speakers.
    pub fn effective_gain(&self) -> f32 {
        let state = self.inner.borrow();
        if state.muted {
            0.0
        } else {
            state.volume
        }
    }

    pub fn playhead(&self) -> usize {
        self.inner.borrow().playhead
    }

    /// Advance the media clock by `seconds` while playing.
    ///
    /// Stops at the end of the track unless looping.
    pub fn advance(&self, seconds: f64) {
        let mut state = self.inner.borrow_mut();
        let state = &mut *state;
        let Some(track) = &state.track else { return };
        if !state.playing || track.samples.is_empty() {
            return;
        }

        let len = track.samples.len();
        let step = (seconds * track.sample_rate as f64).round() as usize;
        let next = state.playhead + step;

        if next < len {
            state.playhead = next;
        } else if state.looping {
            state.playhead = next % len;
        } else {
            state.playhead = len;
            state.playing = false;
            state.ended = true;
            log::debug!("Track ended");
        }
    }
}

impl AudioOutput for TrackOutput {
    fn context_state(&self) -> ContextState {
        self.inner.borrow().context
    }

    async fn resume(&mut self) -> Result<(), PlaybackError> {
        let mut state = self.inner.borrow_mut();
        match state.context {
            ContextState::Closed => Err(PlaybackError::ContextClosed),
            ContextState::Running => Ok(()),
            ContextState::Suspended if !state.gesture => Err(PlaybackError::NotAllowed),
            ContextState::Suspended => {
                state.context = ContextState::Running;
                Ok(())
            }
        }
    }

    async fn play(&mut self) -> Result<(), PlaybackError> {
        let mut state = self.inner.borrow_mut();
        match state.context {
            ContextState::Closed => return Err(PlaybackError::ContextClosed),
            ContextState::Suspended => return Err(PlaybackError::NotAllowed),
            ContextState::Running => {}
        }

        let len = state.track.as_ref().ok_or(PlaybackError::NoSource)?.samples.len();
        if state.playhead >= len {
            state.playhead = 0;
        }
        state.playing = true;
        state.ended = false;
        Ok(())
    }

    fn pause(&mut self) {
        self.inner.borrow_mut().playing = false;
    }

    fn set_volume(&mut self, volume: f32) {
        self.inner.borrow_mut().volume = volume.clamp(0.0, 1.0);
    }

    fn set_muted(&mut self, muted: bool) {
        self.inner.borrow_mut().muted = muted;
    }

    fn set_looping(&mut self, looping: bool) {
        self.inner.borrow_mut().looping = looping;
    }

    fn is_ended(&self) -> bool {
        self.inner.borrow().ended
    }

    fn sample_rate(&self) -> u32 {
        self.inner
            .borrow()
            .track
            .as_ref()
            .map(|t| t.sample_rate)
            .unwrap_or(44_100)
    }

    fn read_samples(&mut self, out: &mut [f32]) -> usize {
        let state = self.inner.borrow();
        let Some(track) = &state.track else { return 0 };
        if !state.playing {
            return 0;
        }

        let len = track.samples.len();
        let mut written = 0;
        for (i, slot) in out.iter_mut().enumerate() {
            let idx = state.playhead + i;
            let sample = if idx < len {
                track.samples[idx]
            } else if state.looping && len > 0 {
                track.samples[idx % len]
            } else {
                break;
            };
            *slot = sample;
            written += 1;
        }
        written
    }

    fn close(&mut self) {
        let mut state = self.inner.borrow_mut();
        state.playing = false;
        state.context = ContextState::Closed;
    }
}
