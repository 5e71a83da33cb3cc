use serde::Serialize;
use std::sync::Mutex;

pub struct MetricsRecorder {
    inner: Mutex<Metrics>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Metrics {
    pub frames: usize,
    pub pointer_handled: usize,
    pub pointer_ignored: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Metrics::default()),
        }
    }

    pub fn record_frame(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.frames += 1;
        }
    }

    pub fn record_pointer(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.pointer_handled += 1;
        }
    }

    pub fn record_pointer_ignored(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.pointer_ignored += 1;
        }
    }

    pub fn snapshot(&self) -> Metrics {
        self.inner
            .lock()
            .map(|metrics| *metrics)
            .unwrap_or_default()
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate() {
        let recorder = MetricsRecorder::new();
        recorder.record_frame();
        recorder.record_frame();
        recorder.record_pointer();
        recorder.record_pointer_ignored();
        let snapshot = recorder.snapshot();
        assert_eq!(snapshot.frames, 2);
        assert_eq!(snapshot.pointer_handled, 1);
        assert_eq!(snapshot.pointer_ignored, 1);
    }
}
