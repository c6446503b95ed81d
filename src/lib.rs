pub mod cli;
pub mod command;
mod config;
pub mod error;
pub mod features;
pub mod record;
pub mod setup;
pub mod store;
pub mod utils;

pub use command::Command;
pub use config::{parse_args, parse_from};
pub use error::{ConfigError, Result};
pub use record::{Config, Value};
pub use store::{load_config, save_config};
pub use utils::Defaults;
