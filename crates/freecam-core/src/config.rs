use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Engine shell settings, usually the `[engine]` table of the app config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Upper bound for a single frame's raw dt (seconds). Protects against stalls.
    #[serde(default = "default_max_dt_sec")]
    pub max_dt_sec: f32,

    /// `env_logger` filter used when `RUST_LOG` is not set.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_max_dt_sec() -> f32 {
    0.25
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_dt_sec: default_max_dt_sec(),
            log_filter: default_log_filter(),
        }
    }
}

/// Parses a TOML document into `T`.
pub fn from_toml_str<T: DeserializeOwned>(src: &str) -> EngineResult<T> {
    toml::from_str(src).map_err(|e| EngineError::Config(e.to_string()))
}

/// Loads `T` from a TOML file.
///
/// A missing file yields `T::default()`; any other read failure or a parse error is reported.
pub fn load_or_default<T>(path: impl AsRef<Path>) -> EngineResult<T>
where
    T: DeserializeOwned + Default,
{
    let path = path.as_ref();
    match fs::read_to_string(path) {
        Ok(s) => toml::from_str(&s)
            .map_err(|e| EngineError::Config(format!("parse {}: {}", path.display(), e))),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::debug!("config {} not found, using defaults", path.display());
            Ok(T::default())
        }
        Err(e) => Err(EngineError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let cfg: EngineConfig = from_toml_str("").unwrap();
        assert_eq!(cfg, EngineConfig::default());
    }

    #[test]
    fn partial_document_keeps_other_defaults() {
        let cfg: EngineConfig = from_toml_str("max_dt_sec = 0.1").unwrap();
        assert!((cfg.max_dt_sec - 0.1).abs() < 1e-6);
        assert_eq!(cfg.log_filter, "info");
    }

    #[test]
    fn malformed_document_is_config_error() {
        let err = from_toml_str::<EngineConfig>("max_dt_sec = \"fast\"").unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }
}
