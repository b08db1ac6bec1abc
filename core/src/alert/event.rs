use crate::prelude::{EVENT_TAG, S_WAVE_VELOCITY_KM_S};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One acquired reading handed to the engine.
///
/// `origin_time` is opaque to the core and copied into any resulting event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaveSample<O> {
    pub amplitude: f64,
    pub distance_km: f64,
    pub origin_time: O,
}

impl<O> WaveSample<O> {
    pub fn new(amplitude: f64, distance_km: f64, origin_time: O) -> Self {
        Self {
            amplitude,
            distance_km,
            origin_time,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    #[serde(rename = "EEW")]
    Eew,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::Eew => f.write_str(EVENT_TAG),
        }
    }
}

/// Warning emitted for a detected onset that cleared the magnitude gate.
///
/// All fields hold display precision; the gate comparison happens on the
/// full-precision magnitude before this value is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EewEvent<O> {
    #[serde(rename = "type")]
    pub kind: EventKind,
    /// Rounded to one decimal place.
    pub magnitude: f64,
    /// Rounded to the nearest kilometre.
    pub distance_km: u64,
    pub s_wave_arrive_in_seconds: u64,
    pub origin_time: O,
}

impl<O> EewEvent<O> {
    /// Applies display rounding to full-precision estimates.
    pub fn from_estimate(magnitude: f64, distance_km: f64, origin_time: O) -> Self {
        Self {
            kind: EventKind::Eew,
            magnitude: round_to_tenth(magnitude),
            distance_km: distance_km.round() as u64,
            s_wave_arrive_in_seconds: s_wave_delay_seconds(distance_km),
            origin_time,
        }
    }

    /// Magnitude formatted with exactly one decimal, e.g. `"7.2"`.
    pub fn magnitude_label(&self) -> String {
        format!("{:.1}", self.magnitude)
    }
}

/// Predicted S-wave arrival delay at a fixed propagation speed, whole seconds.
pub fn s_wave_delay_seconds(distance_km: f64) -> u64 {
    (distance_km / S_WAVE_VELOCITY_KM_S).round() as u64
}

/// Rounds on the exact decimal expansion, the same digits `{:.1}` prints.
fn round_to_tenth(value: f64) -> f64 {
    format!("{:.1}", value).parse().unwrap_or(value)
}
