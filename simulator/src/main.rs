use anyhow::Context;
use clap::Parser;
use generator::profile::build_wave_samples;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use tokio::runtime::Builder as TokioBuilder;
use workflow::config::WorkflowConfig;
use workflow::replay::read_samples;
use workflow::runner::Runner;

mod generator;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Offline driver for the EEW decision core")]
struct Args {
    /// Load a workflow config from YAML
    #[arg(long)]
    workflow: Option<PathBuf>,
    #[arg(long, default_value_t = 5)]
    sta: usize,
    #[arg(long, default_value_t = 50)]
    lta: usize,
    #[arg(long, default_value_t = 3.0)]
    threshold: f64,
    /// Epicentral distance used by the synthetic trace
    #[arg(long, default_value_t = 300.0)]
    distance_km: f64,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Replay recorded samples (JSON lines) instead of generating a trace
    #[arg(long, conflicts_with = "network")]
    replay: Option<PathBuf>,
    /// Run every configured station on its own task
    #[arg(long, default_value_t = false)]
    network: bool,
    /// File the run summary is appended to
    #[arg(long, default_value = "tools/data/eew_report.log")]
    report: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let workflow_config = if let Some(path) = args.workflow.as_ref() {
        WorkflowConfig::load(path)?
    } else {
        let config = WorkflowConfig::from_args(
            args.sta,
            args.lta,
            args.threshold,
            args.distance_km,
            args.seed,
        );
        config
            .detector
            .validate()
            .context("validating detector arguments")?;
        config
    };

    let runner = Runner::new(workflow_config.clone());

    let report = if args.network {
        let runtime = TokioBuilder::new_multi_thread()
            .enable_all()
            .build()
            .context("creating runtime for network run")?;
        let result = runtime.block_on(runner.execute_network())?;

        for event in &result.events {
            println!("{}", serde_json::to_string(event).context("encoding event")?);
        }
        let per_station = result
            .metrics
            .iter()
            .map(|(station, m)| {
                format!(
                    "{}:processed={},detections={},warnings={}",
                    station, m.processed, m.detections, m.warnings
                )
            })
            .collect::<Vec<_>>()
            .join(" ");
        format!(
            "mode=network events={} lagged={} {}\n",
            result.events.len(),
            result.lagged,
            per_station
        )
    } else {
        let (mode, samples) = match args.replay.as_ref() {
            Some(path) => ("replay", read_samples(path)?),
            None => (
                "synthetic",
                build_wave_samples(&workflow_config.generator)
                    .context("generating synthetic trace")?,
            ),
        };
        let result = runner.execute(&samples)?;

        for event in &result.events {
            println!("{}", serde_json::to_string(event).context("encoding event")?);
        }
        let m = result.metrics;
        format!(
            "mode={} processed={} rejected={} detections={} gated={} warnings={}\n",
            mode, m.processed, m.rejected, m.detections, m.gated, m.warnings
        )
    };

    eprint!("{}", report);
    if let Some(parent) = args.report.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating report directory {}", parent.display()))?;
    }
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&args.report)
        .with_context(|| format!("opening report {}", args.report.display()))?;
    file.write_all(report.as_bytes())?;

    Ok(())
}
