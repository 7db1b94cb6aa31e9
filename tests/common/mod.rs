//! Shared test helpers: a small Goertzel single-bin spectral check, used by
//! `scenarios.rs` for the energy/THD measurements spec.md §8's scenario
//! table calls for, without pulling in an FFT crate solely for tests.

/// Magnitude of the DFT bin nearest `target_hz` in `samples`, sampled at
/// `sample_rate_hz`, computed with the Goertzel algorithm (`O(n)`, no FFT).
pub fn goertzel_magnitude(samples: &[f32], sample_rate_hz: f64, target_hz: f64) -> f64 {
    let n = samples.len();
    let k = (0.5 + (n as f64 * target_hz / sample_rate_hz)).floor();
    let omega = 2.0 * std::f64::consts::PI * k / n as f64;
    let coeff = 2.0 * omega.cos();

    let mut q1 = 0.0f64;
    let mut q2 = 0.0f64;
    for &sample in samples {
        let q0 = coeff * q1 - q2 + sample as f64;
        q2 = q1;
        q1 = q0;
    }
    let real = q1 - q2 * omega.cos();
    let imag = q2 * omega.sin();
    (real * real + imag * imag).sqrt()
}

/// Estimated sinusoid amplitude at `target_hz`, derived from the raw
/// Goertzel magnitude (which scales with `n/2` for a pure tone).
pub fn goertzel_amplitude(samples: &[f32], sample_rate_hz: f64, target_hz: f64) -> f64 {
    goertzel_magnitude(samples, sample_rate_hz, target_hz) / (samples.len() as f64 / 2.0)
}

/// `20 * log10(measured / reference)`, the ratio expressed in decibels.
pub fn amplitude_ratio_db(measured: f64, reference: f64) -> f64 {
    20.0 * (measured / reference).log10()
}

/// Total harmonic distortion, in dB relative to the fundamental: the energy
/// in `harmonics` (given as multiples of `fundamental_hz`) compared to the
/// fundamental's own energy.
pub fn thd_db(samples: &[f32], sample_rate_hz: f64, fundamental_hz: f64, harmonics: &[u32]) -> f64 {
    let fundamental = goertzel_magnitude(samples, sample_rate_hz, fundamental_hz);
    let harmonic_energy: f64 = harmonics
        .iter()
        .map(|&h| {
            let mag = goertzel_magnitude(samples, sample_rate_hz, fundamental_hz * h as f64);
            mag * mag
        })
        .sum();
    20.0 * (harmonic_energy.sqrt() / fundamental).log10()
}
