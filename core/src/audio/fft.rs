//! FFT spectrum analysis using RustFFT.
//!
//! Mirrors the behaviour of a browser analyser node: a Hann-windowed FFT whose
//! magnitudes are smoothed over time and quantised to bytes for visualisation.

use rustfft::{num_complex::Complex, FftPlanner};

/// Smallest FFT size the analyser accepts.
pub const MIN_FFT_SIZE: usize = 32;

/// Spectrum analyzer for live audio taps.
///
/// Keeps the previous frame's magnitudes so successive calls to
/// [`SpectrumAnalyzer::byte_frequency_data`] decay smoothly instead of jumping.
pub struct SpectrumAnalyzer {
    planner: FftPlanner<f32>,
    fft_size: usize,
    window: Vec<f32>,
    smoothing: f32,
    min_db: f32,
    max_db: f32,
    smoothed: Vec<f32>,
    bytes: Vec<u8>,
}

impl SpectrumAnalyzer {
    /// Create a new spectrum analyzer with the given FFT size.
    ///
    /// Smoothing and decibel range default to 0.8 and -100..-30 dB.
    pub fn new(fft_size: usize) -> Self {
        assert!(fft_size.is_power_of_two(), "FFT size must be a power of 2");
        assert!(fft_size >= MIN_FFT_SIZE, "FFT size must be at least {MIN_FFT_SIZE}");

        let window: Vec<f32> = (0..fft_size)
            .map(|i| {
                let t = i as f32 / (fft_size - 1) as f32;
                0.5 * (1.0 - (2.0 * std::f32::consts::PI * t).cos())
            })
            .collect();

        Self {
            planner: FftPlanner::new(),
            fft_size,
            window,
            smoothing: 0.8,
            min_db: -100.0,
            max_db: -30.0,
            smoothed: vec![0.0; fft_size / 2],
            bytes: vec![0; fft_size / 2],
        }
    }

    /// Set the time-smoothing constant, clamped to `0.0..1.0`.
    pub fn with_smoothing(mut self, smoothing: f32) -> Self {
        self.smoothing = smoothing.clamp(0.0, 0.999);
        self
    }

    /// Set the decibel range mapped onto `0..=255`.
    pub fn with_decibel_range(mut self, min_db: f32, max_db: f32) -> Self {
        assert!(min_db < max_db, "min_db must be below max_db");
        self.min_db = min_db;
        self.max_db = max_db;
        self
    }

    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    /// Number of frequency bins in the output (FFT size / 2).
    pub fn num_bins(&self) -> usize {
        self.fft_size / 2
    }

    /// Compute the instantaneous magnitude spectrum of the first `fft_size` samples.
    ///
    /// Missing samples are treated as silence, so a short tap never panics.
    pub fn analyze(&mut self, samples: &[f32]) -> Vec<f32> {
        let mut buffer: Vec<Complex<f32>> = self
            .window
            .iter()
            .enumerate()
            .map(|(i, w)| Complex::new(samples.get(i).copied().unwrap_or(0.0) * w, 0.0))
            .collect();

        let fft = self.planner.plan_fft_forward(self.fft_size);
        fft.process(&mut buffer);

        buffer[..self.num_bins()]
            .iter()
            .map(|c| c.norm() / self.fft_size as f32)
            .collect()
    }

    /// Analyse a window and return smoothed byte magnitudes, one per bin.
    ///
    /// Each bin is blended with the previous frame using the smoothing constant,
    /// converted to decibels and mapped linearly from `min_db..max_db` to `0..=255`.
    pub fn byte_frequency_data(&mut self, samples: &[f32]) -> &[u8] {
        let magnitudes = self.analyze(samples);
        let range = self.max_db - self.min_db;

        for ((prev, byte), mag) in self
            .smoothed
            .iter_mut()
            .zip(self.bytes.iter_mut())
            .zip(magnitudes)
        {
            *prev = self.smoothing * *prev + (1.0 - self.smoothing) * mag;
            let db = 20.0 * prev.max(1e-10).log10();
            let scaled = 255.0 * (db - self.min_db) / range;
            *byte = scaled.clamp(0.0, 255.0) as u8;
        }

        &self.bytes
    }

    /// Forget the smoothing history, e.g. when playback restarts.
    pub fn reset(&mut self) {
        self.smoothed.iter_mut().for_each(|v| *v = 0.0);
        self.bytes.iter_mut().for_each(|b| *b = 0);
    }

    /// Get the frequency in Hz for a given bin index.
    pub fn bin_to_freq(&self, bin: usize, sample_rate: u32) -> f32 {
        bin as f32 * sample_rate as f32 / self.fft_size as f32
    }

    /// Get the bin index for a given frequency in Hz.
    pub fn freq_to_bin(&self, freq: f32, sample_rate: u32) -> usize {
        (freq * self.fft_size as f32 / sample_rate as f32).round() as usize
    }
}

/// Group `bins` into `num_bands` logarithmically spaced bands between 20 Hz and Nyquist.
///
/// Each band holds the mean of its bins, so the output keeps the input's scale.
pub fn log_bands(bins: &[u8], sample_rate: u32, num_bands: usize) -> Vec<f32> {
    let num_bins = bins.len();
    if num_bins == 0 || num_bands == 0 {
        return vec![0.0; num_bands];
    }

    let fft_size = num_bins * 2;
    let freq_to_bin = |freq: f32| (freq * fft_size as f32 / sample_rate as f32).round() as usize;

    let log_min = 20.0f32.ln();
    let log_max = (sample_rate as f32 / 2.0).ln();

    (0..num_bands)
        .map(|i| {
            let t0 = i as f32 / num_bands as f32;
            let t1 = (i + 1) as f32 / num_bands as f32;

            let bin_low = freq_to_bin((log_min + t0 * (log_max - log_min)).exp()).min(num_bins - 1);
            let bin_high = freq_to_bin((log_min + t1 * (log_max - log_min)).exp()).min(num_bins);

            if bin_high > bin_low {
                let sum: f32 = bins[bin_low..bin_high].iter().map(|&b| b as f32).sum();
                sum / (bin_high - bin_low) as f32
            } else {
                bins[bin_low] as f32
            }
        })
        .collect()
}
