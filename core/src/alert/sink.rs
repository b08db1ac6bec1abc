use crate::alert::event::{EewEvent, WaveSample};
use crate::prelude::EewResult;
use crate::processing::engine::EewEngine;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::broadcast;

/// Outbound boundary for emitted warnings.
///
/// Implementations decide transport and delivery; the core only hands over
/// finished events.
pub trait AlertSink<O> {
    fn publish(&self, event: &EewEvent<O>);
}

/// In-process fan-out of warnings to any number of subscribers.
pub struct AlertBus<O> {
    sender: broadcast::Sender<EewEvent<O>>,
    undelivered: AtomicUsize,
}

impl<O: Clone> AlertBus<O> {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            sender,
            undelivered: AtomicUsize::new(0),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<EewEvent<O>> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Events published while nobody was subscribed.
    pub fn undelivered(&self) -> usize {
        self.undelivered.load(Ordering::Relaxed)
    }
}

impl<O: Clone> AlertSink<O> for AlertBus<O> {
    fn publish(&self, event: &EewEvent<O>) {
        if self.sender.send(event.clone()).is_err() {
            self.undelivered.fetch_add(1, Ordering::Relaxed);
            log::debug!("EEW event dropped: no subscribers");
        }
    }
}

/// Runs one sample through `engine` and forwards any resulting event to `sink`.
pub fn dispatch<O, S>(
    engine: &mut EewEngine,
    sample: WaveSample<O>,
    sink: &S,
) -> EewResult<Option<EewEvent<O>>>
where
    O: Clone,
    S: AlertSink<O> + ?Sized,
{
    let event = engine.process(sample)?;
    if let Some(event) = event.as_ref() {
        sink.publish(event);
    }
    Ok(event)
}
