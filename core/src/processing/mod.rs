pub mod engine;
pub mod magnitude;
pub mod monitor;
pub mod sta_lta;
pub mod window;

pub use engine::EewEngine;
pub use magnitude::{estimate_magnitude, passes_warning_gate};
pub use monitor::StationMonitor;
pub use sta_lta::StaLtaDetector;
pub use window::AmplitudeWindow;
