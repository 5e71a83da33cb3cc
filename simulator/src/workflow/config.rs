use crate::generator::profile::GeneratorConfig;
use anyhow::Context;
use scanradar::EngineConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    pub light_mode: bool,
    pub width: f64,
    pub height: f64,
    pub frames: usize,
    pub frame_interval_ms: f64,
    /// Scan JSON to replay; a synthetic scan is generated when absent.
    pub records: Option<PathBuf>,
    pub vendor_table: Option<PathBuf>,
    pub generator: GeneratorConfig,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            light_mode: false,
            width: 640.0,
            height: 480.0,
            frames: 120,
            frame_interval_ms: 16.0,
            records: None,
            vendor_table: None,
            generator: GeneratorConfig::default(),
        }
    }
}

impl WorkflowConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading workflow config {}", path_ref.display()))?;
        let config: WorkflowConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing workflow config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(light_mode: bool, frames: usize, access_points: usize, seed: u64) -> Self {
        Self {
            light_mode,
            frames,
            generator: GeneratorConfig {
                access_points,
                seed,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    pub fn to_engine_config(&self) -> EngineConfig {
        EngineConfig {
            light_mode: self.light_mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn config_from_args_produces_engine_config() {
        let cfg = WorkflowConfig::from_args(true, 30, 5, 9);
        assert!(cfg.to_engine_config().light_mode);
        assert_eq!(cfg.generator.access_points, 5);
        assert_eq!(cfg.width, 640.0);
    }

    #[test]
    fn config_load_reads_yaml_with_defaults() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"light_mode: true\nframes: 3\ngenerator:\n  access_points: 4\n  seed: 8\n")
            .unwrap();
        let path = temp.into_temp_path();
        let cfg = WorkflowConfig::load(&path).unwrap();
        assert!(cfg.light_mode);
        assert_eq!(cfg.frames, 3);
        assert_eq!(cfg.generator.access_points, 4);
        assert_eq!(cfg.generator.dual_band_ratio, 0.4);
        assert_eq!(cfg.frame_interval_ms, 16.0);
    }
}
