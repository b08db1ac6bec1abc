use serde::Serialize;
use std::sync::Mutex;

pub struct MetricsRecorder {
    inner: Mutex<MetricsSnapshot>,
}

/// Point-in-time copy of a channel's counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub processed: usize,
    pub rejected: usize,
    pub detections: usize,
    pub warnings: usize,
    /// Detections whose magnitude stayed below the warning gate.
    pub gated: usize,
}

impl MetricsSnapshot {
    pub fn merge(&self, other: &MetricsSnapshot) -> MetricsSnapshot {
        MetricsSnapshot {
            processed: self.processed + other.processed,
            rejected: self.rejected + other.rejected,
            detections: self.detections + other.detections,
            warnings: self.warnings + other.warnings,
            gated: self.gated + other.gated,
        }
    }
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(MetricsSnapshot::default()),
        }
    }

    pub fn record_processed(&self) {
        self.update(|m| m.processed += 1);
    }

    pub fn record_rejected(&self) {
        self.update(|m| m.rejected += 1);
    }

    pub fn record_detection(&self) {
        self.update(|m| m.detections += 1);
    }

    pub fn record_warning(&self) {
        self.update(|m| m.warnings += 1);
    }

    pub fn record_gated(&self) {
        self.update(|m| m.gated += 1);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        if let Ok(metrics) = self.inner.lock() {
            *metrics
        } else {
            MetricsSnapshot::default()
        }
    }

    pub fn reset(&self) {
        self.update(|m| *m = MetricsSnapshot::default());
    }

    fn update(&self, apply: impl FnOnce(&mut MetricsSnapshot)) {
        if let Ok(mut metrics) = self.inner.lock() {
            apply(&mut metrics);
        }
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MetricsRecorder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("MetricsRecorder").field(&self.snapshot()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate_independently() {
        let metrics = MetricsRecorder::new();
        metrics.record_processed();
        metrics.record_processed();
        metrics.record_detection();
        metrics.record_gated();
        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.processed, 2);
        assert_eq!(snapshot.detections, 1);
        assert_eq!(snapshot.gated, 1);
        assert_eq!(snapshot.warnings, 0);
    }

    #[test]
    fn merge_sums_fields() {
        let a = MetricsSnapshot {
            processed: 3,
            warnings: 1,
            ..Default::default()
        };
        let b = MetricsSnapshot {
            processed: 2,
            rejected: 1,
            ..Default::default()
        };
        let merged = a.merge(&b);
        assert_eq!(merged.processed, 5);
        assert_eq!(merged.rejected, 1);
        assert_eq!(merged.warnings, 1);
    }
}
