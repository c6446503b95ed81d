use std::{env, ffi::OsString};

use clap::ArgMatches;

use crate::{
  cli::{build_command, options_for, Kind, OptionSpec},
  command::Command,
  error::Result,
  record::{Config, Value},
  setup::setup_args,
  utils::Defaults,
};

/// Parses the process arguments for `command`.
///
/// Without a command, it is taken from the executable name, so a binary
/// installed as `train` parses training options.
pub fn parse_args(command: Option<Command>, description: Option<&str>) -> Result<Config> {
  let command = match command {
    Some(command) => command,
    None => {
      let program = env::args_os().next().unwrap_or_default();
      Command::from_program_name(program)?
    }
  };

  parse_from(command, description, env::args_os(), &Defaults::detect())
}

/// Same as [`parse_args`], but over an explicit argument list whose first
/// item is the program name.
pub fn parse_from<I, T>(
  command: Command,
  description: Option<&str>,
  args: I,
  defaults: &Defaults,
) -> Result<Config>
where
  I: IntoIterator<Item = T>,
  T: Into<OsString> + Clone,
{
  let matches = build_command(command, description, defaults).try_get_matches_from(args)?;

  let mut cfg = Config::new();
  for spec in options_for(command) {
    if let Some(value) = extract(&matches, spec) {
      cfg.insert(spec.name, value);
    }
  }

  setup_args(command, &mut cfg)?;

  tracing::debug!("Parsed {} options for `{command}`", cfg.len());
  for (name, value) in &cfg {
    tracing::debug!("  {name} = {value}");
  }

  Ok(cfg)
}

/// Options without a default that were not given are left out of the record.
fn extract(matches: &ArgMatches, spec: &OptionSpec) -> Option<Value> {
  let id = spec.name;

  match spec.kind {
    Kind::Str | Kind::Choice(_) => matches.get_one::<String>(id).cloned().map(Value::Str),
    Kind::Int => matches.get_one::<i64>(id).copied().map(Value::Int),
    Kind::Float => matches.get_one::<f64>(id).copied().map(Value::Float),
    Kind::Flag => Some(Value::Bool(matches.get_flag(id))),
    Kind::List(_) => Some(Value::List(
      matches
        .get_many::<String>(id)
        .map(|values| values.cloned().collect())
        .unwrap_or_default(),
    )),
    Kind::Tuple(_) => matches
      .get_many::<String>(id)
      .map(|values| Value::List(values.cloned().collect())),
  }
}
