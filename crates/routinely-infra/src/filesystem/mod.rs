//! Data directory layout for Routinely.
//!
//! ```text
//! {data_dir}/
//!   config.toml
//!   products.json      (default catalog location)
//!   state/             (see storage::json_file)
//! ```

use std::path::{Path, PathBuf};

/// Environment variable that overrides the data directory.
pub const DATA_DIR_ENV: &str = "ROUTINELY_DATA_DIR";

/// Resolve the data directory from an explicit override, the environment,
/// or platform defaults.
///
/// Priority:
/// 1. `explicit` (the `--data-dir` flag)
/// 2. `ROUTINELY_DATA_DIR` environment variable
/// 3. `~/.routinely`
pub fn resolve_data_dir(explicit: Option<&Path>) -> PathBuf {
    if let Some(dir) = explicit {
        return dir.to_path_buf();
    }

    if let Some(dir) = std::env::var(DATA_DIR_ENV).ok().filter(|d| !d.trim().is_empty()) {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".routinely");
    }

    // Last resort: current directory
    PathBuf::from(".routinely")
}

/// Path of the configuration file inside `data_dir`.
pub fn config_path(data_dir: &Path) -> PathBuf {
    data_dir.join("config.toml")
}
