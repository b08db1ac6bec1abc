use crate::generator::template::p_wave_burst;
use eewcore::alert::WaveSample;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Configuration for generating a synthetic single-channel trace.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub sample_count: usize,
    pub sample_rate_hz: f64,
    pub baseline: f64,
    pub noise: f64,
    /// Index of the first burst sample.
    pub onset_index: usize,
    pub onset_amplitude: f64,
    pub decay: f64,
    pub distance_km: f64,
    pub seed: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            sample_count: 600,
            sample_rate_hz: 50.0,
            baseline: 1.0,
            noise: 0.2,
            onset_index: 300,
            onset_amplitude: 5000.0,
            decay: 0.02,
            distance_km: 300.0,
            seed: 0,
        }
    }
}

/// Builds a noisy baseline followed by a decaying burst.
///
/// `origin_time` of each sample is its offset in seconds from the trace start.
pub fn build_wave_samples(config: &GeneratorConfig) -> anyhow::Result<Vec<WaveSample<f64>>> {
    anyhow::ensure!(
        config.onset_index <= config.sample_count,
        "onset index {} beyond sample count {}",
        config.onset_index,
        config.sample_count
    );
    anyhow::ensure!(
        config.sample_rate_hz.is_finite() && config.sample_rate_hz > 0.0,
        "sample rate must be positive, got {}",
        config.sample_rate_hz
    );

    let mut rng = StdRng::seed_from_u64(config.seed);
    let burst = p_wave_burst(
        config.sample_count - config.onset_index,
        config.onset_amplitude,
        config.decay,
    );

    let samples = (0..config.sample_count)
        .map(|index| {
            let jitter = if config.noise > 0.0 {
                rng.gen_range(-config.noise..config.noise)
            } else {
                0.0
            };
            let sign = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
            let amplitude = match index.checked_sub(config.onset_index) {
                Some(offset) => burst[offset] + sign * jitter,
                None => sign * (config.baseline + jitter),
            };
            let origin_time = index as f64 / config.sample_rate_hz;
            WaveSample::new(amplitude, config.distance_km, origin_time)
        })
        .collect();

    Ok(samples)
}
