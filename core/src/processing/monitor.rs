use crate::alert::event::{EewEvent, WaveSample};
use crate::prelude::{DetectorConfig, EewResult, EngineState};
use crate::processing::engine::EewEngine;
use crate::telemetry::metrics::MetricsSnapshot;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

/// Routes samples to one independent `EewEngine` per station.
///
/// Engines are created on first use from a copy of the shared config and
/// never see each other's samples.
#[derive(Debug)]
pub struct StationMonitor {
    config: DetectorConfig,
    engines: BTreeMap<String, EewEngine>,
}

impl StationMonitor {
    pub fn new(config: DetectorConfig) -> EewResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            engines: BTreeMap::new(),
        })
    }

    pub fn process<O>(
        &mut self,
        station: &str,
        sample: WaveSample<O>,
    ) -> EewResult<Option<EewEvent<O>>> {
        let engine = match self.engines.entry(station.to_string()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(EewEngine::for_channel(station, self.config)?),
        };
        engine.process(sample)
    }

    /// `None` for a station that has never received a sample.
    pub fn state(&self, station: &str) -> Option<EngineState> {
        self.engines.get(station).map(EewEngine::state)
    }

    pub fn stations(&self) -> impl Iterator<Item = &str> {
        self.engines.keys().map(String::as_str)
    }

    pub fn remove(&mut self, station: &str) -> Option<EewEngine> {
        self.engines.remove(station)
    }

    /// Counters summed across every station.
    pub fn metrics(&self) -> MetricsSnapshot {
        self.engines
            .values()
            .fold(MetricsSnapshot::default(), |acc, engine| {
                acc.merge(&engine.metrics())
            })
    }
}
