use std::{
  fs::File,
  io::{BufReader, BufWriter, Write},
  path::{Path, PathBuf},
};

use crate::{
  error::{ConfigError, Result},
  record::Config,
};

pub const CONFIG_FILE: &str = "config.json";

pub fn config_path(dir: impl AsRef<Path>) -> PathBuf {
  dir.as_ref().join(CONFIG_FILE)
}

/// Loads `<dir>/config.json` as it was saved. No option is re-validated.
pub fn load_config(dir: impl AsRef<Path>) -> Result<Config> {
  let path = config_path(dir);

  let file = match File::open(&path) {
    Ok(file) => file,
    Err(source) => return Err(ConfigError::Io { path, source }),
  };

  let cfg: Config = match serde_json::from_reader(BufReader::new(file)) {
    Ok(cfg) => cfg,
    Err(source) if source.is_io() => {
      return Err(ConfigError::Io {
        path,
        source: source.into(),
      })
    }
    Err(source) => return Err(ConfigError::Json { path, source }),
  };

  tracing::info!("Loaded {} options from {}", cfg.len(), path.display());

  Ok(cfg)
}

/// Writes `cfg` to `<dir>/config.json`, replacing an existing file. `dir` must exist.
pub fn save_config(dir: impl AsRef<Path>, cfg: &Config) -> Result<()> {
  let path = config_path(dir);

  let io_err = |source| ConfigError::Io {
    path: path.clone(),
    source,
  };

  let mut writer = BufWriter::new(File::create(&path).map_err(io_err)?);

  serde_json::to_writer_pretty(&mut writer, cfg).map_err(|source| ConfigError::Json {
    path: path.clone(),
    source,
  })?;
  writer.write_all(b"\n").map_err(io_err)?;
  writer.flush().map_err(io_err)?;

  tracing::info!("Saved config to {}", path.display());

  Ok(())
}

#[cfg(test)]
mod tests {
  use std::fs;

  use super::*;
  use crate::record::Value;

  fn sample() -> Config {
    let mut cfg = Config::new();
    cfg.insert("features", vec!["hdr".to_owned(), "alb".to_owned(), "nrm".to_owned()]);
    cfg.insert("transfer", "pu");
    cfg.insert("batch_size", 8i64);
    cfg.insert("max_lr", 2e-4);
    cfg.insert("deterministic", true);
    cfg
  }

  #[test]
  fn round_trips_through_the_directory() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = sample();

    save_config(dir.path(), &cfg).unwrap();
    let loaded = load_config(dir.path()).unwrap();

    assert_eq!(loaded, cfg);
    assert_eq!(loaded.get("max_lr"), Some(&Value::Float(2e-4)));
  }

  #[test]
  fn overwrites_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    save_config(dir.path(), &sample()).unwrap();

    let mut other = Config::new();
    other.insert("input", "a.exr");
    save_config(dir.path(), &other).unwrap();

    assert_eq!(load_config(dir.path()).unwrap(), other);
  }

  #[test]
  fn writes_a_flat_object() {
    let dir = tempfile::tempdir().unwrap();
    save_config(dir.path(), &sample()).unwrap();

    let text = fs::read_to_string(config_path(dir.path())).unwrap();
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    let object = json.as_object().unwrap();
    assert_eq!(object.len(), 5);
    assert_eq!(object["transfer"], "pu");
    assert_eq!(object["deterministic"], true);
  }

  #[test]
  fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_config(dir.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Io { path, .. } if path.ends_with(CONFIG_FILE)));
  }

  #[test]
  fn malformed_document_is_a_json_error() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(config_path(dir.path()), "{\"epochs\": 2100,").unwrap();
    let err = load_config(dir.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Json { .. }));
  }

  #[test]
  fn saving_into_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("results").join("5e0be100");
    let err = save_config(&missing, &sample()).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(!missing.exists());
  }
}
