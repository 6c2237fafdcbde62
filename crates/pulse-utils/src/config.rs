//! Configuration utilities

use std::path::PathBuf;

/// Load a `.env` file from the current directory or its parents, if any.
///
/// Returns the path that was loaded. A missing file is not an error.
pub fn load_env() -> Option<PathBuf> {
    match dotenvy::dotenv() {
        Ok(path) => {
            tracing::debug!(path = %path.display(), "Loaded environment file");
            Some(path)
        }
        Err(err) if err.not_found() => None,
        Err(err) => {
            tracing::warn!(error = %err, "Failed to load environment file");
            None
        }
    }
}
