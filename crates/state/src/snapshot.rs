use configs::{LaunchArgs, ModelConfig};
use serde::Serialize;

use crate::{errors::StateError, status::ModelStatus};

/// Point-in-time view of the process state, suitable for a status report.
///
/// `status` serializes as its numeric code.
#[derive(Debug, Clone, Serialize)]
pub struct StateSnapshot {
    pub status: ModelStatus,
    pub pid: u32,
    pub model_loaded: bool,
    pub model_config: Option<ModelConfig>,
    pub args: Option<LaunchArgs>,
    pub custom_keys: Vec<String>,
}

impl StateSnapshot {
    pub fn to_json(&self) -> Result<serde_json::Value, StateError> {
        Ok(serde_json::to_value(self)?)
    }
}
