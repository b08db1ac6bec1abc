use crate::alert::event::{EewEvent, WaveSample};
use crate::prelude::{DetectorConfig, EewError, EewResult, EngineState, MAX_DISTANCE_KM};
use crate::processing::magnitude::{estimate_magnitude, passes_warning_gate};
use crate::processing::sta_lta::StaLtaDetector;
use crate::telemetry::log::LogManager;
use crate::telemetry::metrics::{MetricsRecorder, MetricsSnapshot};

/// Per-channel early-warning decision engine.
///
/// Each sample is processed to completion before the next one is accepted.
/// The engine never terminates on its own; it stays `Armed` for as long as the
/// caller keeps feeding samples.
#[derive(Debug)]
pub struct EewEngine {
    detector: StaLtaDetector,
    logger: LogManager,
    metrics: MetricsRecorder,
}

impl EewEngine {
    pub fn new(config: DetectorConfig) -> EewResult<Self> {
        Self::for_channel("default", config)
    }

    pub fn for_channel(channel: impl Into<String>, config: DetectorConfig) -> EewResult<Self> {
        Ok(Self {
            detector: StaLtaDetector::new(config)?,
            logger: LogManager::for_channel(channel),
            metrics: MetricsRecorder::new(),
        })
    }

    pub fn config(&self) -> &DetectorConfig {
        self.detector.config()
    }

    pub fn channel(&self) -> &str {
        self.logger.channel()
    }

    pub fn state(&self) -> EngineState {
        self.detector.state()
    }

    pub fn detector(&self) -> &StaLtaDetector {
        &self.detector
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Validated entry point.
    ///
    /// Rejects a non-finite amplitude or a non-finite / non-positive distance
    /// before the sample reaches the window, so rejected input leaves the
    /// detector untouched.
    pub fn process<O>(&mut self, sample: WaveSample<O>) -> EewResult<Option<EewEvent<O>>> {
        if let Err(err) = validate_sample(&sample) {
            self.metrics.record_rejected();
            self.logger.warn(&format!("rejected sample: {}", err));
            return Err(err);
        }
        Ok(self.process_unchecked(sample))
    }

    /// Processes a sample without argument validation.
    ///
    /// The window sees `|amplitude|`, but the estimator gets the signed value,
    /// so a non-positive triggering sample fails the gate. Malformed values
    /// flow through as non-finite magnitudes and fail the warning gate. A NaN amplitude also poisons the long-term average until
    /// it is evicted from the window.
    pub fn process_unchecked<O>(&mut self, sample: WaveSample<O>) -> Option<EewEvent<O>> {
        let WaveSample {
            amplitude,
            distance_km,
            origin_time,
        } = sample;

        self.metrics.record_processed();
        if !self.detector.ingest(amplitude) {
            return None;
        }
        self.metrics.record_detection();

        let magnitude = estimate_magnitude(amplitude, distance_km);
        if !passes_warning_gate(magnitude) {
            self.metrics.record_gated();
            self.logger.debug(&format!(
                "P-wave detected, magnitude {:.3} at {:.1} km below warning gate",
                magnitude, distance_km
            ));
            return None;
        }

        let event = EewEvent::from_estimate(magnitude, distance_km, origin_time);
        self.metrics.record_warning();
        self.logger.record(&format!(
            "EEW M{} at {} km, S-wave in {} s",
            event.magnitude_label(),
            event.distance_km,
            event.s_wave_arrive_in_seconds
        ));
        Some(event)
    }

    /// Drops buffered history and counters; the channel starts warming up again.
    pub fn reset(&mut self) {
        self.detector.reset();
        self.metrics.reset();
    }
}

impl Default for EewEngine {
    fn default() -> Self {
        Self {
            detector: StaLtaDetector::default(),
            logger: LogManager::new(),
            metrics: MetricsRecorder::new(),
        }
    }
}

fn validate_sample<O>(sample: &WaveSample<O>) -> EewResult<()> {
    if !sample.amplitude.is_finite() {
        return Err(EewError::InvalidInput(format!(
            "amplitude must be finite, got {}",
            sample.amplitude
        )));
    }
    if !sample.distance_km.is_finite() || sample.distance_km <= 0.0 {
        return Err(EewError::InvalidInput(format!(
            "distance must be a positive finite number of km, got {}",
            sample.distance_km
        )));
    }
    if sample.distance_km > MAX_DISTANCE_KM {
        return Err(EewError::InvalidInput(format!(
            "distance {} km exceeds the maximum epicentral distance of {} km",
            sample.distance_km, MAX_DISTANCE_KM
        )));
    }
    Ok(())
}
