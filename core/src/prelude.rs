use serde::{Deserialize, Serialize};

/// Minimum estimated magnitude that escalates a detection to a warning.
pub const WARNING_MAGNITUDE: f64 = 5.5;

/// Assumed S-wave propagation speed used for the arrival countdown.
pub const S_WAVE_VELOCITY_KM_S: f64 = 3.5;

/// Largest accepted epicentral distance: half the Earth's circumference.
pub const MAX_DISTANCE_KM: f64 = 20_037.5;

/// Tag carried by every emitted warning.
pub const EVENT_TAG: &str = "EEW";

/// STA/LTA parameters for one monitored channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Short-term window length in samples.
    pub sta: usize,
    /// Long-term window length in samples; also the window capacity.
    pub lta: usize,
    /// Trigger ratio that `sta / lta` must strictly exceed.
    pub threshold: f64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            sta: 5,
            lta: 50,
            threshold: 3.0,
        }
    }
}

impl DetectorConfig {
    pub fn new(sta: usize, lta: usize, threshold: f64) -> Self {
        Self {
            sta,
            lta,
            threshold,
        }
    }

    /// Rejects parameter sets for which the ratio test is meaningless.
    pub fn validate(&self) -> EewResult<()> {
        if self.sta == 0 {
            return Err(EewError::InvalidConfig("sta must be at least 1".into()));
        }
        if self.sta >= self.lta {
            return Err(EewError::InvalidConfig(format!(
                "sta ({}) must be shorter than lta ({})",
                self.sta, self.lta
            )));
        }
        if !self.threshold.is_finite() || self.threshold <= 0.0 {
            return Err(EewError::InvalidConfig(format!(
                "threshold must be a positive finite ratio, got {}",
                self.threshold
            )));
        }
        Ok(())
    }
}

/// Logical state of a channel's detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    /// Fewer than `lta` samples seen; no sample can trigger.
    Accumulating,
    /// Window full; every new sample is evaluated.
    Armed,
}

/// Common error type for the decision core.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum EewError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

pub type EewResult<T> = Result<T, EewError>;
