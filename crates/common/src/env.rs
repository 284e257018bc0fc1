//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use std::{io::ErrorKind, path::Path};

use tracing::{info, warn};

/// Check the models directory; warn when it is missing or not a directory.
///
/// Returns whether the directory is usable. A missing directory is not fatal:
/// the backend can still start and wait for a model path to be provided.
pub async fn ensure_env(models_dir: impl AsRef<Path>) -> anyhow::Result<bool> {
    let models_dir = models_dir.as_ref();
    match tokio::fs::metadata(models_dir).await {
        Ok(meta) if meta.is_dir() => {
            info!(models_dir = %models_dir.display(), "models directory found");
            Ok(true)
        }
        Ok(_) => Err(anyhow::anyhow!(
            "{} exists but is not a directory",
            models_dir.display()
        )),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!(models_dir = %models_dir.display(), "models directory not found; model loading will fail until it exists");
            Ok(false)
        }
        Err(e) => Err(anyhow::anyhow!("cannot inspect {}: {e}", models_dir.display())),
    }
}
