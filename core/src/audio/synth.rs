//! Synthetic signals for tests, benches and the headless demo.

use std::f32::consts::PI;

/// Generate a mono sine wave of `duration` seconds.
pub fn generate_sine(frequency: f32, sample_rate: u32, duration: f32, amplitude: f32) -> Vec<f32> {
    let num_samples = (duration * sample_rate as f32) as usize;
    (0..num_samples)
        .map(|i| {
            let t = i as f32 / sample_rate as f32;
            amplitude * (2.0 * PI * frequency * t).sin()
        })
        .collect()
}

/// Generate reproducible white noise from a linear congruential generator.
pub fn generate_white_noise(sample_rate: u32, duration: f32, amplitude: f32, seed: u64) -> Vec<f32> {
    let num_samples = (duration * sample_rate as f32) as usize;

    let mut state = seed;
    let a: u64 = 6364136223846793005;
    let c: u64 = 1442695040888963407;

    (0..num_samples)
        .map(|_| {
            state = state.wrapping_mul(a).wrapping_add(c);
            let normalized = (state as f32 / u64::MAX as f32) * 2.0 - 1.0;
            amplitude * normalized
        })
        .collect()
}

/// Sum equal-amplitude sines, scaled so the mix stays within `-amplitude..=amplitude`.
pub fn generate_chord(frequencies: &[f32], sample_rate: u32, duration: f32, amplitude: f32) -> Vec<f32> {
    let num_samples = (duration * sample_rate as f32) as usize;
    if frequencies.is_empty() {
        return vec![0.0; num_samples];
    }

    let gain = amplitude / frequencies.len() as f32;
    let mut mix = vec![0.0; num_samples];
    for &freq in frequencies {
        for (out, s) in mix.iter_mut().zip(generate_sine(freq, sample_rate, duration, gain)) {
            *out += s;
        }
    }
    mix
}
