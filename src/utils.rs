use std::time::{SystemTime, UNIX_EPOCH};

use candle_core::{utils::cuda_is_available, Device};

/// Values of the options whose defaults depend on the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Defaults {
  pub device: String,
  pub result: String,
}

impl Defaults {
  pub fn detect() -> Self {
    Self {
      device: default_device().to_owned(),
      result: default_result(),
    }
  }
}

/// `cuda` when this build has CUDA support and device 0 can be opened.
pub fn default_device() -> &'static str {
  if cuda_is_available() && Device::new_cuda(0).is_ok() {
    "cuda"
  } else {
    "cpu"
  }
}

pub fn default_result() -> String {
  result_from_time(SystemTime::now())
}

/// Lower-case hex of the Unix time in whole seconds.
pub fn result_from_time(time: SystemTime) -> String {
  let secs = match time.duration_since(UNIX_EPOCH) {
    Ok(elapsed) => elapsed.as_secs(),
    Err(err) => {
      tracing::warn!("System clock is {:?} before the Unix epoch", err.duration());
      0
    }
  };
  format!("{secs:x}")
}
