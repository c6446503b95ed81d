//! Option table shared by every tool of the toolkit.
//!
//! Each row lists the commands that accept it; the clap schema of a command
//! is built by filtering [`OPTIONS`].

use clap::{builder::PossibleValuesParser, value_parser, Arg, ArgAction};

use crate::{command::Command, utils::Defaults};

use Command::*;

pub const FEATURES: &[&str] = &["hdr", "ldr", "albedo", "alb", "normal", "nrm"];
pub const TRANSFERS: &[&str] = &["srgb", "pu", "log"];
pub const LOSSES: &[&str] = &[
  "l1",
  "mape",
  "smape",
  "l2",
  "ssim",
  "msssim",
  "l1_msssim",
  "l1_grad",
];
pub const METRICS: &[&str] = &["mse", "ssim"];
pub const FORMATS: &[&str] = &["exr", "pfm", "png"];
pub const DEVICES: &[&str] = &["cpu", "cuda"];

const BANNER: &str = "Denoiser training toolkit";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Kind {
  Str,
  Int,
  Float,
  Flag,
  Choice(&'static [&'static str]),
  /// Zero or more values, optionally restricted to a choice set.
  List(Option<&'static [&'static str]>),
  /// Exactly `n` values.
  Tuple(usize),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DefaultValue {
  None,
  Text(&'static str),
  List(&'static [&'static str]),
  Device,
  Result,
}

#[derive(Debug, Clone, Copy)]
pub struct OptionSpec {
  pub name: &'static str,
  pub short: Option<char>,
  pub aliases: &'static [&'static str],
  pub positional: bool,
  pub kind: Kind,
  pub default: DefaultValue,
  pub help: &'static str,
  pub commands: &'static [Command],
}

impl OptionSpec {
  const fn flag(name: &'static str, kind: Kind) -> Self {
    Self {
      name,
      short: None,
      aliases: &[],
      positional: false,
      kind,
      default: DefaultValue::None,
      help: "",
      commands: &[],
    }
  }

  const fn positional(name: &'static str, kind: Kind) -> Self {
    Self {
      positional: true,
      ..Self::flag(name, kind)
    }
  }

  const fn short(self, short: char) -> Self {
    Self {
      short: Some(short),
      ..self
    }
  }

  const fn aliases(self, aliases: &'static [&'static str]) -> Self {
    Self { aliases, ..self }
  }

  const fn default(self, default: DefaultValue) -> Self {
    Self { default, ..self }
  }

  const fn help(self, help: &'static str) -> Self {
    Self { help, ..self }
  }

  const fn commands(self, commands: &'static [Command]) -> Self {
    Self { commands, ..self }
  }

  pub fn accepts(&self, command: Command) -> bool {
    self.commands.contains(&command)
  }

  /// Positionals without a default must be given, like `input` of `convert_exr`.
  pub fn required(&self) -> bool {
    self.positional && self.default == DefaultValue::None && !matches!(self.kind, Kind::List(_))
  }

  pub fn to_arg(&self, defaults: &Defaults) -> Arg {
    let mut arg = Arg::new(self.name).help(self.help);

    if !self.positional {
      arg = arg.long(self.name);
    }
    if let Some(short) = self.short {
      arg = arg.short(short);
    }
    if !self.aliases.is_empty() {
      arg = arg.visible_aliases(self.aliases.iter().copied());
    }

    arg = match self.kind {
      Kind::Str => arg.value_parser(value_parser!(String)),
      Kind::Int => arg
        .allow_negative_numbers(true)
        .value_parser(value_parser!(i64)),
      Kind::Float => arg.allow_negative_numbers(true).value_parser(finite_float),
      Kind::Flag => arg.action(ArgAction::SetTrue),
      Kind::Choice(choices) => arg.value_parser(PossibleValuesParser::new(choices.to_vec())),
      Kind::List(Some(choices)) => arg
        .num_args(0..)
        .value_parser(PossibleValuesParser::new(choices.to_vec())),
      Kind::List(None) => arg.num_args(0..).value_parser(value_parser!(String)),
      Kind::Tuple(n) => arg.num_args(n).value_parser(value_parser!(String)),
    };

    arg = match self.default {
      DefaultValue::None => arg,
      DefaultValue::Text(text) => arg.default_value(text),
      DefaultValue::List(values) => arg.default_values(values.iter().copied()),
      DefaultValue::Device => arg.default_value(defaults.device.clone()),
      DefaultValue::Result => arg.default_value(defaults.result.clone()),
    };

    arg.required(self.required())
  }
}

pub const OPTIONS: &[OptionSpec] = &[
  OptionSpec::positional("features", Kind::List(Some(FEATURES)))
    .help("set of input features")
    .commands(&[Preprocess, Train, FindLr]),
  OptionSpec::flag("transfer", Kind::Choice(TRANSFERS))
    .short('x')
    .help("transfer function")
    .commands(&[Preprocess, Train, FindLr]),
  OptionSpec::flag("preproc_dir", Kind::Str)
    .short('P')
    .default(DefaultValue::Text("preproc"))
    .help("directory of preprocessed datasets")
    .commands(&[Preprocess, Train, FindLr]),
  OptionSpec::flag("train_data", Kind::Str)
    .short('t')
    .default(DefaultValue::Text("train"))
    .help("name of the training dataset")
    .commands(&[Preprocess, Train, FindLr]),
  OptionSpec::flag("valid_data", Kind::Str)
    .short('v')
    .default(DefaultValue::Text("valid"))
    .help("name of the validation dataset")
    .commands(&[Preprocess, Train]),
  OptionSpec::flag("data_dir", Kind::Str)
    .short('D')
    .default(DefaultValue::Text("data"))
    .help("directory of datasets (e.g. training, validation, test)")
    .commands(&[Preprocess, Infer]),
  OptionSpec::flag("clean", Kind::Flag)
    .help("delete existing preprocessed datasets")
    .commands(&[Preprocess]),
  OptionSpec::flag("results_dir", Kind::Str)
    .short('R')
    .default(DefaultValue::Text("results"))
    .help("directory of training results")
    .commands(&[Train, FindLr, Infer, Export, Visualize]),
  OptionSpec::flag("result", Kind::Str)
    .short('r')
    .default(DefaultValue::Result)
    .help("name of the result to save/load")
    .commands(&[Train, FindLr, Infer, Export, Visualize]),
  OptionSpec::flag("checkpoint", Kind::Int)
    .short('c')
    .default(DefaultValue::Text("0"))
    .help("result checkpoint to restore")
    .commands(&[Train, Infer, Export]),
  OptionSpec::flag("batch_size", Kind::Int)
    .aliases(&["bs"])
    .default(DefaultValue::Text("8"))
    .help("size of the mini-batches")
    .commands(&[Train, FindLr]),
  OptionSpec::flag("tile_size", Kind::Int)
    .aliases(&["ts"])
    .default(DefaultValue::Text("256"))
    .help("size of the cropped image tiles")
    .commands(&[Train, FindLr]),
  OptionSpec::flag("loss", Kind::Choice(LOSSES))
    .short('l')
    .default(DefaultValue::Text("l1_msssim"))
    .help("loss function")
    .commands(&[Train, FindLr]),
  OptionSpec::flag("seed", Kind::Int)
    .short('s')
    .default(DefaultValue::Text("42"))
    .help("seed for random number generation")
    .commands(&[Train, FindLr]),
  OptionSpec::flag("loaders", Kind::Int)
    .default(DefaultValue::Text("4"))
    .help("number of data loader threads")
    .commands(&[Train, FindLr]),
  OptionSpec::flag("epochs", Kind::Int)
    .short('e')
    .default(DefaultValue::Text("2100"))
    .help("number of training epochs")
    .commands(&[Train]),
  OptionSpec::flag("lr", Kind::Float)
    .aliases(&["learning_rate"])
    .default(DefaultValue::Text("2e-6"))
    .help("minimum learning rate")
    .commands(&[Train]),
  OptionSpec::flag("max_lr", Kind::Float)
    .aliases(&["max_learning_rate"])
    .default(DefaultValue::Text("2e-4"))
    .help("maximum learning rate")
    .commands(&[Train]),
  OptionSpec::flag("lr_cycle_epochs", Kind::Int)
    .default(DefaultValue::Text("250"))
    .help("number of training epochs per learning rate cycle")
    .commands(&[Train]),
  OptionSpec::flag("valid_epochs", Kind::Int)
    .default(DefaultValue::Text("10"))
    .help("validate every this many epochs")
    .commands(&[Train]),
  OptionSpec::flag("save_epochs", Kind::Int)
    .default(DefaultValue::Text("10"))
    .help("save checkpoints every this many epochs")
    .commands(&[Train]),
  OptionSpec::flag("log_steps", Kind::Int)
    .default(DefaultValue::Text("100"))
    .help("save summaries every this many steps")
    .commands(&[Train]),
  OptionSpec::flag("metric", Kind::List(Some(METRICS)))
    .short('m')
    .default(DefaultValue::List(&["ssim"]))
    .help("metrics to compute")
    .commands(&[Infer, CompareExr]),
  OptionSpec::flag("input_data", Kind::Str)
    .short('i')
    .default(DefaultValue::Text("test"))
    .help("name of the input dataset")
    .commands(&[Infer]),
  OptionSpec::flag("output_dir", Kind::Str)
    .short('O')
    .default(DefaultValue::Text("infer"))
    .help("directory of output images")
    .commands(&[Infer]),
  OptionSpec::flag("format", Kind::List(Some(FORMATS)))
    .short('f')
    .default(DefaultValue::List(&["png"]))
    .help("output image formats")
    .commands(&[Infer]),
  OptionSpec::positional("input", Kind::Tuple(2))
    .help("input images")
    .commands(&[CompareExr]),
  OptionSpec::positional("input", Kind::Str)
    .help("input image")
    .commands(&[ConvertExr, SplitExr]),
  OptionSpec::positional("output", Kind::Str)
    .help("output image")
    .commands(&[ConvertExr]),
  OptionSpec::flag("exposure", Kind::Float)
    .aliases(&["ev"])
    .default(DefaultValue::Text("1.0"))
    .help("exposure value for HDR image")
    .commands(&[CompareExr, ConvertExr]),
  OptionSpec::flag("device", Kind::Choice(DEVICES))
    .short('d')
    .default(DefaultValue::Device)
    .help("device to use")
    .commands(&[Preprocess, Train, FindLr, Infer, Export]),
  OptionSpec::flag("deterministic", Kind::Flag)
    .aliases(&["det"])
    .help("makes computations deterministic (slower performance)")
    .commands(&[Preprocess, Train, FindLr, Infer, Export]),
];

/// `inf` and `nan` parse as `f64` but cannot be stored in `config.json`.
fn finite_float(value: &str) -> Result<f64, String> {
  match value.parse::<f64>() {
    Ok(v) if v.is_finite() => Ok(v),
    Ok(_) => Err(format!("`{value}` is not a finite number")),
    Err(err) => Err(err.to_string()),
  }
}

/// Usage line with the toolkit banner in front, so argument errors show it too.
fn usage(command: Command) -> String {
  let mut usage = format!("{BANNER}\n       {command} [OPTIONS]");

  for spec in options_for(command).filter(|spec| spec.positional) {
    let name = spec.name;
    match spec.kind {
      Kind::List(_) => usage.push_str(&format!(" [{name}]...")),
      Kind::Tuple(n) => {
        for _ in 0..n {
          usage.push_str(&format!(" <{name}>"));
        }
      }
      _ => usage.push_str(&format!(" <{name}>")),
    }
  }

  usage
}

pub fn options_for(command: Command) -> impl Iterator<Item = &'static OptionSpec> {
  OPTIONS.iter().filter(move |spec| spec.accepts(command))
}

pub fn build_command(
  command: Command,
  description: Option<&str>,
  defaults: &Defaults,
) -> clap::Command {
  let mut cmd = clap::Command::new(command.as_str())
    .override_usage(usage(command))
    .infer_long_args(true);

  if let Some(description) = description {
    cmd = cmd.about(description.to_owned());
  }

  for spec in options_for(command) {
    cmd = cmd.arg(spec.to_arg(defaults));
  }

  cmd
}
