use crate::generator::profile::{build_wave_samples, GeneratorConfig};
use crate::workflow::config::{StationConfig, WorkflowConfig};
use anyhow::Context;
use eewcore::alert::{dispatch, AlertBus, EewEvent, WaveSample};
use eewcore::processing::EewEngine;
use eewcore::telemetry::MetricsSnapshot;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;

const BUS_CAPACITY: usize = 1024;

/// Origin token used for network runs: which station saw the sample, and when.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationOrigin {
    pub station: String,
    pub time_s: f64,
}

pub struct WorkflowResult {
    pub events: Vec<EewEvent<f64>>,
    pub metrics: MetricsSnapshot,
}

pub struct NetworkResult {
    pub events: Vec<EewEvent<StationOrigin>>,
    pub metrics: BTreeMap<String, MetricsSnapshot>,
    /// Events the collector missed because it fell behind the bus.
    pub lagged: u64,
}

#[derive(Clone)]
pub struct Runner {
    config: WorkflowConfig,
}

impl Runner {
    pub fn new(config: WorkflowConfig) -> Self {
        Self { config }
    }

    /// Feeds `samples` through a single engine. Rejected samples are skipped.
    pub fn execute(&self, samples: &[WaveSample<f64>]) -> anyhow::Result<WorkflowResult> {
        let mut engine = EewEngine::for_channel("SIM", self.config.detector)
            .context("initializing EEW engine")?;

        let mut events = Vec::new();
        for sample in samples {
            match engine.process(sample.clone()) {
                Ok(Some(event)) => events.push(event),
                Ok(None) => {}
                Err(err) => log::debug!("skipping sample at {}: {}", sample.origin_time, err),
            }
        }

        Ok(WorkflowResult {
            events,
            metrics: engine.metrics(),
        })
    }

    /// Generates one trace per station and runs each on its own task with its
    /// own engine, fanning warnings in through an `AlertBus`.
    pub async fn execute_network(&self) -> anyhow::Result<NetworkResult> {
        let bus = Arc::new(AlertBus::<StationOrigin>::new(BUS_CAPACITY));
        let mut receiver = bus.subscribe();

        let collector = tokio::spawn(async move {
            let mut events = Vec::new();
            let mut lagged = 0;
            loop {
                match receiver.recv().await {
                    Ok(event) => events.push(event),
                    Err(RecvError::Lagged(skipped)) => lagged += skipped,
                    Err(RecvError::Closed) => break,
                }
            }
            (events, lagged)
        });

        let mut handles = Vec::new();
        for (index, station) in self.config.station_list().into_iter().enumerate() {
            let samples = build_station_samples(&self.config.generator, &station, index as u64)
                .with_context(|| format!("generating trace for {}", station.id))?;
            let mut engine = EewEngine::for_channel(station.id.clone(), self.config.detector)
                .with_context(|| format!("initializing engine for {}", station.id))?;
            let bus = Arc::clone(&bus);

            handles.push(tokio::task::spawn_blocking(move || {
                for sample in samples {
                    if let Err(err) = dispatch(&mut engine, sample, bus.as_ref()) {
                        log::debug!("[{}] skipping sample: {}", station.id, err);
                    }
                }
                (station.id, engine.metrics())
            }));
        }

        let mut metrics = BTreeMap::new();
        for handle in handles {
            let (station, snapshot) = handle.await.context("station task failed")?;
            metrics.insert(station, snapshot);
        }
        drop(bus);

        let (mut events, lagged) = collector.await.context("alert collector failed")?;
        events.sort_by(|a, b| {
            a.origin_time
                .station
                .cmp(&b.origin_time.station)
                .then(a.origin_time.time_s.total_cmp(&b.origin_time.time_s))
        });

        Ok(NetworkResult {
            events,
            metrics,
            lagged,
        })
    }
}

fn build_station_samples(
    generator: &GeneratorConfig,
    station: &StationConfig,
    index: u64,
) -> anyhow::Result<Vec<WaveSample<StationOrigin>>> {
    let config = GeneratorConfig {
        distance_km: station.distance_km,
        seed: generator.seed.wrapping_add(index),
        ..generator.clone()
    };
    let samples = build_wave_samples(&config)?
        .into_iter()
        .map(|sample| {
            WaveSample::new(
                sample.amplitude,
                sample.distance_km,
                StationOrigin {
                    station: station.id.clone(),
                    time_s: sample.origin_time,
                },
            )
        })
        .collect();
    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use eewcore::prelude::WARNING_MAGNITUDE;

    #[test]
    fn runner_emits_for_default_scenario() {
        let cfg = WorkflowConfig::default();
        let runner = Runner::new(cfg.clone());
        let samples = build_wave_samples(&cfg.generator).unwrap();
        let result = runner.execute(&samples).unwrap();

        assert!(!result.events.is_empty());
        assert!(result.events.iter().all(|e| e.magnitude >= WARNING_MAGNITUDE));
        assert_eq!(result.events[0].origin_time, 6.0);
        assert_eq!(result.events[0].s_wave_arrive_in_seconds, 86);
        assert_eq!(result.metrics.processed, 600);
    }

    #[test]
    fn runner_stays_quiet_without_onset() {
        let mut cfg = WorkflowConfig::default();
        cfg.generator.onset_amplitude = cfg.generator.baseline;
        cfg.generator.noise = 0.0;
        let samples = build_wave_samples(&cfg.generator).unwrap();
        let result = Runner::new(cfg).execute(&samples).unwrap();
        assert!(result.events.is_empty());
        assert_eq!(result.metrics.detections, 0);
    }

    #[test]
    fn runner_skips_rejected_samples() {
        let runner = Runner::new(WorkflowConfig::default());
        let samples = vec![
            WaveSample::new(1.0, 10.0, 0.0),
            WaveSample::new(1.0, 0.0, 0.02),
        ];
        let result = runner.execute(&samples).unwrap();
        assert_eq!(result.metrics.processed, 1);
        assert_eq!(result.metrics.rejected, 1);
    }

    #[tokio::test]
    async fn network_run_keeps_stations_independent() {
        let mut cfg = WorkflowConfig::default();
        cfg.stations = vec![
            StationConfig {
                id: "FAR".into(),
                distance_km: 300.0,
            },
            StationConfig {
                id: "NEAR".into(),
                distance_km: 2.0,
            },
        ];
        cfg.generator.onset_amplitude = 400.0;

        let result = Runner::new(cfg).execute_network().await.unwrap();
        assert_eq!(result.metrics.len(), 2);
        assert_eq!(result.metrics["FAR"].processed, 600);
        assert!(result.metrics["NEAR"].detections > 0);
        assert_eq!(result.metrics["NEAR"].warnings, 0);
        assert!(!result.events.is_empty());
        assert!(result.events.iter().all(|e| e.origin_time.station == "FAR"));
        assert_eq!(result.lagged, 0);
    }
}
