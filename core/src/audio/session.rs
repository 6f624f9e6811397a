//! Exclusive owner of the audio element's transport, volume and mute state.

use super::output::{AudioOutput, ContextState, PlaybackError};

/// Playback snapshot. `volume` survives mute/unmute untouched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioSessionState {
    pub is_playing: bool,
    pub is_muted: bool,
    pub volume: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    Paused,
    Playing,
}

/// Clamp to `0.0..=1.0`, mapping NaN to silence.
fn clamp_volume(volume: f32) -> f32 {
    if volume.is_nan() {
        0.0
    } else {
        volume.clamp(0.0, 1.0)
    }
}

/// All writes to the output go through here, so the stored state always
/// matches what the element is doing.
pub struct AudioSession<O: AudioOutput> {
    output: O,
    state: AudioSessionState,
}

impl<O: AudioOutput> AudioSession<O> {
    /// Take ownership of the output and push the initial volume, mute and loop settings to it.
    pub fn new(mut output: O, volume: f32, looping: bool) -> Self {
        let volume = clamp_volume(volume);
        output.set_looping(looping);
        output.set_volume(volume);
        output.set_muted(false);

        Self {
            output,
            state: AudioSessionState {
                is_playing: false,
                is_muted: false,
                volume,
            },
        }
    }

    pub fn state(&self) -> AudioSessionState {
        self.state
    }

    pub fn transport(&self) -> Transport {
        if self.state.is_playing {
            Transport::Playing
        } else {
            Transport::Paused
        }
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    /// Start playback, resuming a suspended context first.
    ///
    /// On rejection nothing changes and the error is returned for the caller to surface.
    pub async fn play(&mut self) -> Result<(), PlaybackError> {
        if self.state.is_playing {
            return Ok(());
        }

        if self.output.context_state() == ContextState::Suspended {
            if let Err(err) = self.output.resume().await {
                log::warn!("Audio context resume rejected: {}", err);
                return Err(err);
            }
        }

        if let Err(err) = self.output.play().await {
            log::warn!("Audio playback failed: {}", err);
            self.output.pause();
            return Err(err);
        }

        self.state.is_playing = true;
        log::debug!("Transport -> Playing");
        Ok(())
    }

    /// Returns whether the transport actually changed.
    pub fn pause(&mut self) -> bool {
        if !self.state.is_playing {
            return false;
        }
        self.output.pause();
        self.state.is_playing = false;
        log::debug!("Transport -> Paused");
        true
    }

    /// Drop to Paused if the element finished a non-looping track on its own.
    ///
    /// Returns whether the transport changed.
    pub fn sync_ended(&mut self) -> bool {
        if !self.state.is_playing || !self.output.is_ended() {
            return false;
        }
        self.state.is_playing = false;
        log::debug!("Transport -> Paused (track ended)");
        true
    }

    pub async fn toggle_playback(&mut self) -> Result<Transport, PlaybackError> {
        self.sync_ended();
        if self.state.is_playing {
            self.pause();
        } else {
            self.play().await?;
        }
        Ok(self.transport())
    }

    /// Clamp to `0.0..=1.0` and apply immediately, muted or not.
    pub fn set_volume(&mut self, volume: f32) -> f32 {
        let volume = clamp_volume(volume);
        self.state.volume = volume;
        self.output.set_volume(volume);
        volume
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.state.is_muted = muted;
        self.output.set_muted(muted);
    }

    pub fn toggle_mute(&mut self) -> bool {
        self.set_muted(!self.state.is_muted);
        self.state.is_muted
    }

    /// Read the analysis tap.
    pub fn tap(&mut self, out: &mut [f32]) -> usize {
        self.output.read_samples(out)
    }

    /// Stop playback and release the context.
    pub fn close(&mut self) {
        if self.output.context_state() == ContextState::Closed {
            return;
        }
        self.pause();
        self.output.close();
        log::debug!("Audio context closed");
    }
}

impl<O: AudioOutput> Drop for AudioSession<O> {
    fn drop(&mut self) {
        self.close();
    }
}
