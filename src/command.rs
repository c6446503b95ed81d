use std::{ffi::OsStr, fmt, path::Path, str::FromStr};

use crate::error::ConfigError;

/// Tools of the training toolkit. Each one owns a different set of options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
  Preprocess,
  Train,
  FindLr,
  Infer,
  Export,
  Visualize,
  CompareExr,
  ConvertExr,
  SplitExr,
}

impl Command {
  pub const ALL: [Command; 9] = [
    Command::Preprocess,
    Command::Train,
    Command::FindLr,
    Command::Infer,
    Command::Export,
    Command::Visualize,
    Command::CompareExr,
    Command::ConvertExr,
    Command::SplitExr,
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      Command::Preprocess => "preprocess",
      Command::Train => "train",
      Command::FindLr => "find_lr",
      Command::Infer => "infer",
      Command::Export => "export",
      Command::Visualize => "visualize",
      Command::CompareExr => "compare_exr",
      Command::ConvertExr => "convert_exr",
      Command::SplitExr => "split_exr",
    }
  }

  /// Commands that take input features and a transfer function.
  pub fn uses_features(self) -> bool {
    matches!(self, Command::Preprocess | Command::Train | Command::FindLr)
  }

  /// Infers the command from an executable path, e.g. `/opt/bin/train.exe` -> `train`.
  pub fn from_program_name(program: impl AsRef<OsStr>) -> Result<Self, ConfigError> {
    let path = Path::new(program.as_ref());
    let stem = path.file_stem().unwrap_or_default().to_string_lossy();
    stem.parse()
  }
}

impl FromStr for Command {
  type Err = ConfigError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Command::ALL
      .into_iter()
      .find(|cmd| cmd.as_str() == s)
      .ok_or_else(|| ConfigError::UnknownCommand(s.to_owned()))
  }
}

impl fmt::Display for Command {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}
