//! Integration tests for track decoding and spectrum analysis.

use folio::audio::{
    decode_bytes, generate_chord, generate_sine, generate_white_noise, load_track, log_bands,
    AudioError, SpectrumAnalyzer,
};

const SAMPLE_RATE: u32 = 44100;

/// Encode mono samples as a 16-bit PCM WAV file.
fn wav_bytes(samples: &[f32], sample_rate: u32) -> Vec<u8> {
    let data_size = samples.len() as u32 * 2;
    let mut out = Vec::with_capacity(44 + data_size as usize);

    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + data_size).to_le_bytes());
    out.extend_from_slice(b"WAVE");

    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes()); // PCM
    out.extend_from_slice(&1u16.to_le_bytes()); // mono
    out.extend_from_slice(&sample_rate.to_le_bytes());
    out.extend_from_slice(&(sample_rate * 2).to_le_bytes());
    out.extend_from_slice(&2u16.to_le_bytes());
    out.extend_from_slice(&16u16.to_le_bytes());

    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_size.to_le_bytes());
    for &sample in samples {
        let int_sample = (sample.clamp(-1.0, 1.0) * 32767.0) as i16;
        out.extend_from_slice(&int_sample.to_le_bytes());
    }
    out
}

// ==================== Decoding ====================

#[test]
fn test_decode_generated_wav() {
    let samples = generate_sine(440.0, SAMPLE_RATE, 0.5, 0.5);
    let track = decode_bytes(wav_bytes(&samples, SAMPLE_RATE), Some("wav")).unwrap();

    assert_eq!(track.sample_rate, SAMPLE_RATE);
    assert_eq!(track.channels, 1);
    assert_eq!(track.num_frames(), samples.len());
    assert!((track.duration() - 0.5).abs() < 0.01);

    let max_err = track
        .samples
        .iter()
        .zip(&samples)
        .map(|(a, b)| (a - b).abs())
        .fold(0.0f32, f32::max);
    assert!(max_err < 1e-3, "16-bit round trip error too large: {max_err}");
}

#[test]
fn test_load_track_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("music1.wav");
    std::fs::write(&path, wav_bytes(&generate_sine(220.0, 8000, 0.25, 0.3), 8000)).unwrap();

    let track = load_track(&path).unwrap();
    assert_eq!(track.sample_rate, 8000);
    assert_eq!(track.num_frames(), 2000);
}

#[test]
fn test_truncated_file_is_an_error() {
    let bytes = wav_bytes(&generate_sine(220.0, 8000, 0.25, 0.3), 8000);
    let result = decode_bytes(bytes[..20].to_vec(), Some("wav"));
    assert!(result.is_err());
}

#[test]
fn test_missing_file() {
    let result = load_track(std::path::Path::new("/nope/music1.mp3"));
    assert!(matches!(result, Err(AudioError::IoError(_))));
}

// ==================== Spectrum ====================

#[test]
fn test_sine_wave_spectrum_peak() {
    let freq = 1000.0;
    let samples = generate_sine(freq, SAMPLE_RATE, 1.0, 1.0);

    let mut analyzer = SpectrumAnalyzer::new(2048);
    let spectrum = analyzer.analyze(&samples);

    let peak_bin = spectrum
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
        .map(|(i, _)| i)
        .unwrap();

    let peak_freq = analyzer.bin_to_freq(peak_bin, SAMPLE_RATE);
    assert!(
        (peak_freq - freq).abs() < 50.0,
        "Expected peak at {} Hz, got {} Hz",
        freq,
        peak_freq
    );
}

#[test]
fn test_chord_lights_up_each_note() {
    let notes = [440.0, 880.0];
    let samples = generate_chord(&notes, SAMPLE_RATE, 1.0, 1.0);

    let mut analyzer = SpectrumAnalyzer::new(4096);
    let spectrum = analyzer.analyze(&samples);

    for note in notes {
        let bin = analyzer.freq_to_bin(note, SAMPLE_RATE);
        assert!(spectrum[bin] > 0.05, "Expected energy at {} Hz", note);
    }
}

#[test]
fn test_louder_signal_gives_higher_bytes() {
    let quiet = generate_sine(1378.0, SAMPLE_RATE, 0.1, 0.0005);
    let loud = generate_sine(1378.0, SAMPLE_RATE, 0.1, 0.005);

    let mut a = SpectrumAnalyzer::new(256).with_smoothing(0.0);
    let mut b = SpectrumAnalyzer::new(256).with_smoothing(0.0);
    let bin = a.freq_to_bin(1378.0, SAMPLE_RATE);

    let quiet_level = a.byte_frequency_data(&quiet)[bin];
    let loud_level = b.byte_frequency_data(&loud)[bin];
    assert!(loud_level > quiet_level, "{loud_level} <= {quiet_level}");
}

#[test]
fn test_white_noise_bands_are_even() {
    let samples = generate_white_noise(SAMPLE_RATE, 1.0, 1.0, 42);
    let mut analyzer = SpectrumAnalyzer::new(2048).with_smoothing(0.0).with_decibel_range(-120.0, 0.0);
    let bytes = analyzer.byte_frequency_data(&samples).to_vec();

    // Skip the lowest bands, which may map to a single (DC-adjacent) bin
    let bands = log_bands(&bytes, SAMPLE_RATE, 16);
    let upper = &bands[8..];
    let avg: f32 = upper.iter().sum::<f32>() / upper.len() as f32;
    assert!(upper.iter().all(|&b| (b - avg).abs() < 40.0), "{upper:?}");
}
