use crate::math::stats::StatsHelper;
use crate::prelude::{DetectorConfig, EewResult, EngineState};
use crate::processing::window::AmplitudeWindow;

/// Short-term / long-term average trigger over an `AmplitudeWindow`.
///
/// Detection is not latched. Every call to `is_triggered` recomputes the
/// ratio from the current window, so a sustained onset reports `true` on
/// every sample for as long as the ratio stays above the threshold.
#[derive(Debug, Clone)]
pub struct StaLtaDetector {
    config: DetectorConfig,
    window: AmplitudeWindow,
}

impl StaLtaDetector {
    pub fn new(config: DetectorConfig) -> EewResult<Self> {
        config.validate()?;
        Ok(Self {
            window: AmplitudeWindow::with_capacity(config.lta),
            config,
        })
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    pub fn window(&self) -> &AmplitudeWindow {
        &self.window
    }

    pub fn add_sample(&mut self, sample: f64) {
        self.window.push(sample);
    }

    /// Current `sta / lta` ratio.
    ///
    /// `None` while the window is still warming up, and `None` when the ratio
    /// is not finite (an all-zero window gives `0 / 0`).
    pub fn ratio(&self) -> Option<f64> {
        if !self.window.is_full() {
            return None;
        }
        let short_avg = StatsHelper::mean(self.window.recent(self.config.sta))?;
        let long_avg = StatsHelper::mean(self.window.iter())?;
        let ratio = short_avg / long_avg;
        ratio.is_finite().then_some(ratio)
    }

    pub fn is_triggered(&self) -> bool {
        self.ratio().is_some_and(|ratio| ratio > self.config.threshold)
    }

    /// Feeds one sample and evaluates the trigger on the resulting window.
    pub fn ingest(&mut self, sample: f64) -> bool {
        self.add_sample(sample);
        self.is_triggered()
    }

    pub fn state(&self) -> EngineState {
        if self.window.is_full() {
            EngineState::Armed
        } else {
            EngineState::Accumulating
        }
    }

    pub fn reset(&mut self) {
        self.window.clear();
    }
}

impl Default for StaLtaDetector {
    fn default() -> Self {
        let config = DetectorConfig::default();
        Self {
            window: AmplitudeWindow::with_capacity(config.lta),
            config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::EewError;

    #[test]
    fn warm_up_never_triggers() {
        let mut detector = StaLtaDetector::default();
        for i in 0..49 {
            let sample = if i % 2 == 0 { 0.0 } else { 10_000.0 };
            assert!(!detector.ingest(sample));
            assert_eq!(detector.state(), EngineState::Accumulating);
        }
        assert_eq!(detector.ratio(), None);
    }

    #[test]
    fn flat_signal_has_unit_ratio() {
        let mut detector = StaLtaDetector::default();
        for _ in 0..120 {
            assert!(!detector.ingest(3.0 * 7.0));
        }
        let ratio = detector.ratio().unwrap();
        assert!((ratio - 1.0).abs() < 1e-12);
    }

    #[test]
    fn step_onset_triggers_on_spike_arrival() {
        let mut detector = StaLtaDetector::default();
        for _ in 0..50 {
            assert!(!detector.ingest(1.0));
        }
        assert!(detector.ingest(1000.0));

        let ratio = detector.ratio().unwrap();
        let expected = (4.0 + 1000.0) / 5.0 / ((49.0 + 1000.0) / 50.0);
        assert!((ratio - expected).abs() < 1e-9);
        assert!((ratio - 9.57).abs() < 0.01);
    }

    #[test]
    fn sustained_onset_retriggers_every_sample() {
        let mut detector = StaLtaDetector::default();
        for _ in 0..50 {
            detector.ingest(1.0);
        }
        let hits = (0..3).filter(|_| detector.ingest(1000.0)).count();
        assert_eq!(hits, 3);
    }

    #[test]
    fn all_zero_window_does_not_trigger() {
        let mut detector = StaLtaDetector::default();
        for _ in 0..60 {
            assert!(!detector.ingest(0.0));
        }
        assert_eq!(detector.state(), EngineState::Armed);
        assert_eq!(detector.ratio(), None);
    }

    #[test]
    fn negative_samples_count_by_magnitude() {
        let mut detector = StaLtaDetector::default();
        for _ in 0..50 {
            detector.ingest(-1.0);
        }
        assert!(detector.ingest(-1000.0));
    }

    #[test]
    fn reset_returns_to_accumulating() {
        let mut detector = StaLtaDetector::new(DetectorConfig::new(2, 4, 2.0)).unwrap();
        for _ in 0..4 {
            detector.ingest(1.0);
        }
        assert_eq!(detector.state(), EngineState::Armed);
        detector.reset();
        assert_eq!(detector.state(), EngineState::Accumulating);
        assert!(!detector.ingest(500.0));
    }

    #[test]
    fn new_rejects_invalid_config() {
        let err = StaLtaDetector::new(DetectorConfig::new(10, 5, 3.0)).unwrap_err();
        assert!(matches!(err, EewError::InvalidConfig(_)));
    }
}
