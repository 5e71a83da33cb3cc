use crate::generator::profile::build_scan_records;
use crate::workflow::config::WorkflowConfig;
use anyhow::Context;
use scanradar::render::{DisplayList, ManualScheduler};
use scanradar::scan_interface::parse_scan_json;
use scanradar::selection::VendorTable;
use scanradar::{DebugSnapshot, RadarEngine, ScanRecord};
use std::fs;

pub struct WorkflowResult {
    pub frames_painted: usize,
    pub commands_last_frame: usize,
    pub snapshot: DebugSnapshot,
    /// Detail panel of the strongest access point, selected by a synthetic click.
    pub probe_detail: Vec<String>,
}

#[derive(Clone)]
pub struct Runner {
    config: WorkflowConfig,
}

impl Runner {
    pub fn new(config: WorkflowConfig) -> Self {
        Self { config }
    }

    /// Scan records named by the config, or a generated scan.
    pub fn load_records(&self) -> anyhow::Result<Vec<ScanRecord>> {
        match &self.config.records {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("reading scan records {}", path.display()))?;
                parse_scan_json(&text)
                    .with_context(|| format!("parsing scan records {}", path.display()))
            }
            None => build_scan_records(&self.config.generator).context("generating scan records"),
        }
    }

    pub fn vendor_table(&self) -> anyhow::Result<VendorTable> {
        match &self.config.vendor_table {
            Some(path) => VendorTable::load(path)
                .with_context(|| format!("loading vendor table {}", path.display())),
            None => Ok(VendorTable::builtin()),
        }
    }

    pub fn build_engine(&self) -> anyhow::Result<RadarEngine<DisplayList>> {
        let engine = RadarEngine::mount(
            self.config.to_engine_config(),
            Some(DisplayList::new(self.config.width, self.config.height)),
            Box::new(ManualScheduler::new()),
        )
        .with_vendors(self.vendor_table()?);
        Ok(engine)
    }

    /// Drives the radar headless for the configured number of frames.
    pub fn execute(&self, records: Vec<ScanRecord>) -> anyhow::Result<WorkflowResult> {
        let mut engine = self.build_engine()?;
        engine.load_records(records);

        let mut frames_painted = 0;
        let mut now_ms = 0.0;
        for frame in 0..self.config.frames {
            now_ms = frame as f64 * self.config.frame_interval_ms;
            if engine.tick(now_ms) {
                frames_painted += 1;
            }
        }

        let strongest = engine
            .groups()
            .iter()
            .enumerate()
            .max_by_key(|(_, group)| group.signal_level)
            .map(|(idx, _)| idx);
        let probe_detail = match strongest.and_then(|idx| engine.nodes().get(idx).copied()) {
            Some(node) => {
                engine.handle_pointer(node.x, node.y, now_ms);
                engine.detail().map(|detail| detail.lines()).unwrap_or_default()
            }
            None => Vec::new(),
        };

        let commands_last_frame = engine
            .surface()
            .map(|surface| surface.commands().len())
            .unwrap_or(0);

        Ok(WorkflowResult {
            frames_painted,
            commands_last_frame,
            snapshot: engine.snapshot(),
            probe_detail,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runner_executes_workflow() {
        let cfg = WorkflowConfig::from_args(false, 10, 6, 4);
        let runner = Runner::new(cfg.clone());
        let records = runner.load_records().unwrap();
        let result = runner.execute(records).unwrap();
        assert_eq!(result.frames_painted, cfg.frames);
        assert!(result.commands_last_frame > 4);
        assert!(!result.snapshot.groups.is_empty());
        assert!(result.snapshot.groups.len() <= result.snapshot.record_count);
    }

    #[test]
    fn runner_probe_selects_strongest_group() {
        let cfg = WorkflowConfig::from_args(true, 2, 0, 0);
        let runner = Runner::new(cfg);
        let records = vec![
            ScanRecord::new("Near", "00:1a:11:00:00:01", -35, 6),
            ScanRecord::new("Far", "00:1a:11:99:00:01", -85, 11),
        ];
        let result = runner.execute(records).unwrap();
        assert_eq!(result.snapshot.selected_key.as_deref(), Some("001a11000001"));
        assert_eq!(result.probe_detail[0], "Near");
        assert!(result.snapshot.light_mode);
    }

    #[test]
    fn runner_reads_records_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.json");
        fs::write(
            &path,
            r#"[{"ssid": "Lab", "mac": "b8:27:eb:00:00:01", "signalLevel": "-61", "channel": 6}]"#,
        )
        .unwrap();
        let mut cfg = WorkflowConfig::default();
        cfg.records = Some(path);
        let records = Runner::new(cfg).load_records().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].signal_level, -61);
    }
}
