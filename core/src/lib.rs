//! Earthquake early-warning decision core.
//!
//! A single-channel streaming detector: amplitude samples feed an STA/LTA
//! trigger, triggered samples get a magnitude estimate, and estimates that
//! clear the warning gate become `EewEvent`s for an external broadcaster.

pub mod alert;
pub mod math;
pub mod prelude;
pub mod processing;
pub mod telemetry;

pub use alert::{AlertBus, AlertSink, EewEvent, EventKind, WaveSample};
pub use prelude::{DetectorConfig, EewError, EewResult, EngineState};
pub use processing::{AmplitudeWindow, EewEngine, StaLtaDetector, StationMonitor};
