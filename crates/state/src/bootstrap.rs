use std::sync::Arc;

use configs::{AppConfig, LaunchArgs};
use tracing::info;

use crate::store::ProcessState;

/// Build the process state at application startup.
///
/// Records the launch arguments and the configured model parameters; the
/// model itself starts unloaded and offline.
pub fn bootstrap<M>(args: LaunchArgs, config: &AppConfig) -> Arc<ProcessState<M>> {
    let state = ProcessState::new();
    state.set_args(args);
    state.set_model_config(config.model.clone());
    info!(status = %state.model_status(), "process state initialized");
    Arc::new(state)
}
