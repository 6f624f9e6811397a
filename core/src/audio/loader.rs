//! Background track decoding using Symphonia.
//!
//! The page ships a single static media file; it is decoded once up front and
//! mixed down to mono for playback and analysis.

use std::fs::File;
use std::io::Cursor;
use std::path::Path;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{Decoder, DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::{FormatOptions, FormatReader, Packet};
use symphonia::core::io::{MediaSource, MediaSourceStream};
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use thiserror::Error;

/// Errors that can occur while loading the track.
#[derive(Error, Debug)]
pub enum AudioError {
    #[error("Failed to open audio file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to decode audio: {0}")]
    DecodeError(#[from] SymphoniaError),

    #[error("No audio track found in file")]
    NoAudioTrack,

    #[error("Unknown sample rate")]
    UnknownSampleRate,

    #[error("Track decoded to zero samples")]
    Empty,
}

/// A fully decoded track.
#[derive(Debug, Clone)]
pub struct TrackData {
    /// Interleaved samples, normalized to -1.0..1.0
    pub samples: Vec<f32>,
    pub sample_rate: u32,
    pub channels: usize,
}

impl TrackData {
    /// Wrap an already-mono buffer.
    pub fn from_mono(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
            channels: 1,
        }
    }

    /// Duration in seconds.
    pub fn duration(&self) -> f64 {
        if self.sample_rate == 0 || self.channels == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / (self.sample_rate as f64 * self.channels as f64)
    }

    /// Number of frames (samples per channel).
    pub fn num_frames(&self) -> usize {
        if self.channels == 0 {
            return 0;
        }
        self.samples.len() / self.channels
    }

    /// Average channels into a mono track.
    pub fn into_mono(self) -> Self {
        if self.channels <= 1 {
            return self;
        }

        let channels = self.channels;
        let samples = self
            .samples
            .chunks(channels)
            .map(|frame| frame.iter().sum::<f32>() / channels as f32)
            .collect();

        Self {
            samples,
            sample_rate: self.sample_rate,
            channels: 1,
        }
    }
}

/// Decode the track at `path`, using its extension as a format hint.
pub fn load_track(path: &Path) -> Result<TrackData, AudioError> {
    let file = File::open(path)?;
    let ext = path.extension().and_then(|e| e.to_str());
    let track = decode_track(Box::new(file), ext)?;
    log::info!(
        "Loaded {} ({:.1}s, {} Hz)",
        path.display(),
        track.duration(),
        track.sample_rate
    );
    Ok(track)
}

/// Decode an in-memory encoded file.
pub fn decode_bytes(bytes: Vec<u8>, extension: Option<&str>) -> Result<TrackData, AudioError> {
    decode_track(Box::new(Cursor::new(bytes)), extension)
}

/// Decode every packet of the first audio track, mixing down to mono as it goes.
fn decode_track(source: Box<dyn MediaSource>, extension: Option<&str>) -> Result<TrackData, AudioError> {
    let mut hint = Hint::new();
    if let Some(ext) = extension {
        hint.with_extension(ext);
    }

    let mut format = symphonia::default::get_probe()
        .format(
            &hint,
            MediaSourceStream::new(source, Default::default()),
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )?
        .format;

    let (track_id, sample_rate, params) = {
        let track = format
            .default_track()
            .filter(|t| t.codec_params.codec != CODEC_TYPE_NULL)
            .or_else(|| format.tracks().iter().find(|t| t.codec_params.codec != CODEC_TYPE_NULL))
            .ok_or(AudioError::NoAudioTrack)?;
        let sample_rate = track.codec_params.sample_rate.ok_or(AudioError::UnknownSampleRate)?;
        (track.id, sample_rate, track.codec_params.clone())
    };

    let mut decoder = symphonia::default::get_codecs().make(&params, &DecoderOptions::default())?;
    let mut mono = Vec::new();
    let mut scratch: Option<SampleBuffer<f32>> = None;
    let mut source_channels = 0;

    while let Some(packet) = next_packet(format.as_mut(), decoder.as_mut())? {
        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(decoded) => decoded,
            Err(SymphoniaError::DecodeError(msg)) => {
                log::debug!("Skipping corrupt packet: {}", msg);
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        let spec = *decoded.spec();
        source_channels = spec.channels.count();
        let needed = decoded.capacity() * source_channels;
        if scratch.as_ref().map_or(true, |buf| buf.capacity() < needed) {
            scratch = Some(SampleBuffer::new(decoded.capacity() as u64, spec));
        }
        if let Some(buf) = scratch.as_mut() {
            buf.copy_interleaved_ref(decoded);
            mix_to_mono(buf.samples(), source_channels, &mut mono);
        }
    }

    if mono.is_empty() {
        return Err(AudioError::Empty);
    }
    log::debug!("Mixed {} source channel(s) down to mono", source_channels);

    Ok(TrackData::from_mono(mono, sample_rate))
}

/// Next packet from the container, or `None` at end of stream.
fn next_packet(
    format: &mut dyn FormatReader,
    decoder: &mut dyn Decoder,
) -> Result<Option<Packet>, AudioError> {
    loop {
        match format.next_packet() {
            Ok(packet) => return Ok(Some(packet)),
            Err(SymphoniaError::IoError(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                return Ok(None)
            }
            Err(SymphoniaError::ResetRequired) => decoder.reset(),
            Err(e) => return Err(e.into()),
        }
    }
}

/// Average each interleaved frame and append it to `out`.
fn mix_to_mono(interleaved: &[f32], channels: usize, out: &mut Vec<f32>) {
    match channels {
        0 => {}
        1 => out.extend_from_slice(interleaved),
        n => out.extend(
            interleaved
                .chunks_exact(n)
                .map(|frame| frame.iter().sum::<f32>() / n as f32),
        ),
    }
}
