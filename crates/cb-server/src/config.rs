use serde::Deserialize;
use serde_json::Value;
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Fallback strip length when `config.json` is absent or unusable.
const DEFAULT_STRIP_LENGTH: usize = 6;
/// Strips shorter than this cannot render a reel window.
const MIN_STRIP_LENGTH: usize = 3;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Deserialize)]
struct ServerConfigFile {
    listen_addr: Option<String>,
    content_root: Option<String>,
}

/// Operator configuration for the server process.
///
/// Unlike the game documents under the content root, this is loaded once at
/// startup and a broken file is a hard error: a misconfigured listen address
/// or missing content root should stop the process, not degrade it.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub listen_addr: String,
    pub content_root: PathBuf,
}

impl ServerConfig {
    /// Load the operator config: `CB_CONFIG` env var first, then
    /// `coinbomb.config.json` in the working directory, then defaults
    /// (localhost:5000, serving the working directory).
    pub fn load() -> Result<Self, ConfigError> {
        if let Ok(p) = std::env::var("CB_CONFIG") {
            return Self::load_from_path(Path::new(&p));
        }

        let candidate = PathBuf::from("coinbomb.config.json");
        if candidate.exists() {
            return Self::load_from_path(&candidate);
        }

        Ok(Self {
            listen_addr: default_listen_addr(),
            content_root: PathBuf::from("."),
        })
    }

    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let file: ServerConfigFile =
            serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        // Relative content roots resolve against the config file location.
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        let content_root = base_dir.join(file.content_root.unwrap_or_else(|| ".".to_string()));

        Ok(Self {
            listen_addr: file.listen_addr.unwrap_or_else(default_listen_addr),
            content_root,
        })
    }

    /// The game config document (`reel_strip_length` lives here).
    pub fn game_config_path(&self) -> PathBuf {
        self.content_root.join("config.json")
    }

    /// The symbol weight override document.
    pub fn weights_path(&self) -> PathBuf {
        self.content_root.join("symbol-weights.json")
    }

    /// Directory scanned for ad video files.
    pub fn ad_video_dir(&self) -> PathBuf {
        self.content_root.join("ad").join("video")
    }

    /// Per-reel strip length from `config.json`, re-read on every call.
    ///
    /// Missing file, missing key, or a value that fails integer coercion all
    /// yield the default of 6; anything below 3 clamps up to 3. Never an
    /// error: the game must always have a usable length.
    pub fn reel_strip_length(&self) -> usize {
        let length = read_json_value(&self.game_config_path())
            .as_ref()
            .and_then(|doc| doc.get("reel_strip_length"))
            .and_then(coerce_int)
            .unwrap_or(DEFAULT_STRIP_LENGTH as i64);
        (length.max(MIN_STRIP_LENGTH as i64)) as usize
    }
}

fn default_listen_addr() -> String {
    "127.0.0.1:5000".to_string()
}

/// Read and parse a JSON document, treating any failure as absence.
fn read_json_value(path: &Path) -> Option<Value> {
    let raw = fs::read_to_string(path).ok()?;
    match serde_json::from_str(&raw) {
        Ok(doc) => Some(doc),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unparseable game config");
            None
        }
    }
}

fn coerce_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_f64().map(|f| f as i64),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        Value::Bool(b) => Some(*b as i64),
        _ => None,
    }
}
