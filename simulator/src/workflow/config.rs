use crate::generator::profile::GeneratorConfig;
use anyhow::Context;
use eewcore::prelude::DetectorConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One simulated station in a network run.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct StationConfig {
    pub id: String,
    pub distance_km: f64,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    pub detector: DetectorConfig,
    pub generator: GeneratorConfig,
    pub stations: Vec<StationConfig>,
}

impl WorkflowConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading workflow config {}", path_ref.display()))?;
        let config: WorkflowConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing workflow config {}", path_ref.display()))?;
        config
            .detector
            .validate()
            .with_context(|| format!("validating detector in {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(sta: usize, lta: usize, threshold: f64, distance_km: f64, seed: u64) -> Self {
        Self {
            detector: DetectorConfig::new(sta, lta, threshold),
            generator: GeneratorConfig {
                distance_km,
                seed,
                ..Default::default()
            },
            stations: Vec::new(),
        }
    }

    /// Configured stations, or a single station at the generator distance.
    pub fn station_list(&self) -> Vec<StationConfig> {
        if self.stations.is_empty() {
            vec![StationConfig {
                id: "SIM".to_string(),
                distance_km: self.generator.distance_km,
            }]
        } else {
            self.stations.clone()
        }
    }
}
