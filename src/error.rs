use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = ConfigError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ConfigError {
  /// Unknown flag, bad number or invalid choice. Carries clap's usage text.
  #[error(transparent)]
  Args(#[from] clap::Error),

  #[error("unknown command `{0}`")]
  UnknownCommand(String),

  #[error("either hdr or ldr must be specified as input feature")]
  InvalidFeatures(Vec<String>),

  #[error("config has no field `{0}`")]
  MissingField(String),

  #[error("config field `{name}` is {found}, expected {expected}")]
  WrongType {
    name: String,
    expected: &'static str,
    found: &'static str,
  },

  #[error("failed to access {path}: {source}")]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("invalid config document {path}: {source}")]
  Json {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },
}
