pub mod schema;
pub mod validate;
pub mod watcher;

pub use schema::{AppConfig, MonitorConfig, SamplerPreference, ThemeConfig, WindowConfig};
pub use validate::validate;
pub use watcher::ConfigWatcher;

use graph_core::{GraphError, Result};
use std::path::{Path, PathBuf};

/// Load configuration from a TOML file.  Returns `AppConfig::default()` if
/// the file doesn't exist so the monitor always has sensible defaults.
///
/// The result is not validated; call [`validate`] once CLI overrides are applied.
pub fn load(path: impl AsRef<Path>) -> Result<AppConfig> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::warn!(
            "Config file not found at '{}'; using defaults.",
            path.display()
        );
        return Ok(AppConfig::default());
    }

    let raw = std::fs::read_to_string(path)
        .map_err(|e| GraphError::Config(format!("cannot read '{}': {e}", path.display())))?;

    toml::from_str(&raw).map_err(|e| GraphError::Config(format!("TOML parse error: {e}")))
}

/// Return the default config path, honouring `$XDG_CONFIG_HOME`.
pub fn default_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("cpugraph").join("cpugraph.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("cpugraph-{}-{name}", std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn missing_file_yields_defaults() {
        let path = std::env::temp_dir().join("cpugraph-does-not-exist.toml");
        assert_eq!(load(path).unwrap(), AppConfig::default());
    }

    #[test]
    fn reads_window_section() {
        let path = scratch_file("window.toml", "[window]\nwidth = 1200\nheight = 400\n");
        let cfg = load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(cfg.window.width, 1200);
        assert_eq!(cfg.window.height, 400);
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        let path = scratch_file("broken.toml", "[monitor\ninterval_ms = ");
        let err = load(&path).unwrap_err();
        std::fs::remove_file(&path).ok();

        assert!(matches!(err, GraphError::Config(msg) if msg.starts_with("TOML parse error")));
    }

    #[test]
    fn default_path_ends_with_app_dir() {
        assert!(default_path().ends_with("cpugraph/cpugraph.toml"));
    }
}
