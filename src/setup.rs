use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use crate::{
  command::Command,
  error::Result,
  features::{check_features, default_transfer, normalize_features},
  record::Config,
};

pub fn setup_tracing() {
  let subscriber = FmtSubscriber::builder()
    .with_max_level(Level::INFO)
    .with_target(false)
    .with_writer(std::io::stderr)
    .finish();

  tracing::subscriber::set_global_default(subscriber).expect("Setting default subscriber failed");
}

/// Post-processing that clap cannot express: feature normalization, the
/// hdr/ldr check and the transfer function fallback.
pub fn setup_args(command: Command, cfg: &mut Config) -> Result<()> {
  if !command.uses_features() {
    return Ok(());
  }

  let features = normalize_features(cfg.list("features")?);
  check_features(&features)?;

  if !cfg.contains("transfer") {
    let transfer = default_transfer(&features);
    tracing::debug!("No transfer function given, using `{transfer}`");
    cfg.insert("transfer", transfer);
  }

  cfg.insert("features", features);

  Ok(())
}
