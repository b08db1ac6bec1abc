/// Oscillating, exponentially decaying envelope starting at `peak`.
pub fn p_wave_burst(length: usize, peak: f64, decay: f64) -> Vec<f64> {
    (0..length)
        .map(|i| {
            let t = i as f64;
            peak * (-decay * t).exp() * (t * 0.9).cos()
        })
        .collect()
}
