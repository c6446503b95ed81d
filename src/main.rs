use std::{env, ffi::OsString, path::PathBuf, process::ExitCode};

use clap::error::ErrorKind;

use denoise_config::{
  load_config, parse_from, save_config, setup::setup_tracing, Command, Config, ConfigError,
  Defaults, Result,
};

const DESCRIPTION: &str = "Parses the options of a toolkit command and prints them as JSON";

fn main() -> ExitCode {
  setup_tracing();

  match run(env::args_os().collect()) {
    Ok(cfg) => match cfg.to_json_string() {
      Ok(json) => {
        println!("{json}");
        ExitCode::SUCCESS
      }
      Err(err) => {
        tracing::error!("Failed to print config: {err}");
        ExitCode::FAILURE
      }
    },
    Err(ConfigError::Args(err)) => err.exit(),
    Err(err) => {
      tracing::error!("{err}");
      ExitCode::FAILURE
    }
  }
}

/// Installed under a command name (`train`, `infer`, ...) the binary behaves
/// like that tool. Otherwise the first argument selects what to do:
///
/// - `show <dir>` prints `<dir>/config.json`
/// - `save <dir> <command> [args]` parses and writes `<dir>/config.json`
/// - `<command> [args]` parses and prints
fn run(args: Vec<OsString>) -> Result<Config> {
  let program = args.first().cloned().unwrap_or_default();

  if let Ok(command) = Command::from_program_name(&program) {
    return parse_from(command, Some(DESCRIPTION), args, &Defaults::detect());
  }

  let mut args: Vec<OsString> = args.into_iter().skip(1).collect();

  let mode = args.first().and_then(|arg| arg.to_str()).map(str::to_owned);

  match mode.as_deref() {
    Some("show") => {
      let dir = dir_arg(&args, "show <DIR>")?;
      load_config(dir)
    }

    Some("save") => {
      let dir = dir_arg(&args, "save <DIR> <COMMAND> [ARGS]...")?;
      let cfg = parse_command(args.split_off(2))?;
      save_config(&dir, &cfg)?;
      Ok(cfg)
    }

    _ => parse_command(args),
  }
}

fn parse_command(args: Vec<OsString>) -> Result<Config> {
  let Some(name) = args.first() else {
    return Err(usage_error(format!(
      "expected one of: {}",
      Command::ALL.map(Command::as_str).join(", ")
    )));
  };

  let command: Command = name.to_string_lossy().parse()?;
  parse_from(command, Some(DESCRIPTION), args, &Defaults::detect())
}

fn dir_arg(args: &[OsString], usage: &str) -> Result<PathBuf> {
  args
    .get(1)
    .map(PathBuf::from)
    .ok_or_else(|| usage_error(format!("usage: denoise-config {usage}")))
}

fn usage_error(message: String) -> ConfigError {
  clap::Error::raw(ErrorKind::MissingRequiredArgument, format!("{message}\n")).into()
}
