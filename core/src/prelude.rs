use serde::{Deserialize, Serialize};

/// Runtime configuration for a radar engine instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub light_mode: bool,
}

/// Errors raised at the ingestion and lookup-table boundary.
///
/// The engine itself never fails; everything past ingestion degrades instead.
#[derive(thiserror::Error, Debug)]
pub enum RadarError {
    #[error("parse failure: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("io failure: {0}")]
    Io(#[from] std::io::Error),
}

pub type RadarResult<T> = Result<T, RadarError>;
