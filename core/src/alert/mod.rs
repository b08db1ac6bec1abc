pub mod event;
pub mod sink;

pub use event::{EewEvent, EventKind, WaveSample};
pub use sink::{dispatch, AlertBus, AlertSink};
