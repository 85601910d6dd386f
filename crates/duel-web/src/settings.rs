//! Runtime server configuration.
//!
//! Sources, lowest precedence first: built-in defaults, an optional TOML
//! file, `DUEL_*` environment variables, and finally an explicit port
//! (the binary takes it from `--port` or `PORT`).

use std::path::{Path, PathBuf};

use config::ConfigError;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
  pub host:           String,
  pub port:           u16,
  /// SQLite database file.
  pub store_path:     PathBuf,
  /// Line-oriented item source, read only when the store is empty.
  pub bootstrap_path: PathBuf,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:           "0.0.0.0".to_string(),
      port:           5000,
      store_path:     PathBuf::from("quotes.db"),
      bootstrap_path: PathBuf::from("quotes.csv"),
    }
  }
}

impl ServerConfig {
  pub fn load(file: &Path, port: Option<u16>) -> Result<Self, ConfigError> {
    config::Config::builder()
      .add_source(config::File::from(file.to_path_buf()).required(false))
      .add_source(config::Environment::with_prefix("DUEL"))
      .set_override_option("port", port.map(i64::from))?
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn missing_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = ServerConfig::load(&dir.path().join("config.toml"), Some(5000)).unwrap();
    assert_eq!(cfg, ServerConfig::default());
    assert_eq!(cfg.address(), "0.0.0.0:5000");
  }

  #[test]
  fn file_values_and_port_override() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
      &path,
      "host = \"127.0.0.1\"\nport = 8000\nstore_path = \"/tmp/duel.db\"\n",
    )
    .unwrap();

    let cfg = ServerConfig::load(&path, None).unwrap();
    assert_eq!(cfg.host, "127.0.0.1");
    assert_eq!(cfg.port, 8000);
    assert_eq!(cfg.store_path, PathBuf::from("/tmp/duel.db"));
    assert_eq!(cfg.bootstrap_path, PathBuf::from("quotes.csv"));

    let cfg = ServerConfig::load(&path, Some(9123)).unwrap();
    assert_eq!(cfg.port, 9123);
  }
}
