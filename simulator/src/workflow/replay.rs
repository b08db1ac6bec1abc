use anyhow::Context;
use eewcore::alert::WaveSample;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Reads recorded samples, one JSON object per line. Blank lines are skipped.
pub fn read_samples<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<WaveSample<f64>>> {
    let path_ref = path.as_ref();
    let file = File::open(path_ref)
        .with_context(|| format!("opening replay file {}", path_ref.display()))?;

    let mut samples = Vec::new();
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line.with_context(|| format!("reading {}", path_ref.display()))?;
        if line.trim().is_empty() {
            continue;
        }
        let sample: WaveSample<f64> = serde_json::from_str(&line)
            .with_context(|| format!("parsing {} line {}", path_ref.display(), index + 1))?;
        samples.push(sample);
    }
    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn replay_reads_json_lines() {
        let mut temp = NamedTempFile::new().unwrap();
        writeln!(temp, r#"{{"amplitude": 1.5, "distanceKm": 30.0, "originTime": 0.0}}"#).unwrap();
        writeln!(temp).unwrap();
        writeln!(temp, r#"{{"amplitude": -2.0, "distanceKm": 30.0, "originTime": 0.02}}"#).unwrap();
        let samples = read_samples(temp.path()).unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[1].amplitude, -2.0);
    }

    #[test]
    fn replay_reports_bad_line_number() {
        let mut temp = NamedTempFile::new().unwrap();
        writeln!(temp, r#"{{"amplitude": 1.5, "distanceKm": 30.0, "originTime": 0.0}}"#).unwrap();
        writeln!(temp, "not json").unwrap();
        let err = read_samples(temp.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("line 2"));
    }
}
