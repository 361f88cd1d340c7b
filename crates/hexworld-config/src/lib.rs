//! Configuration for the hexworld tools.
//!
//! Settings persist to disk as RON, can be overridden from the command line
//! via clap, and are re-read when the file changes.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    CONFIG_FILE, Config, DebugConfig, ExportConfig, IcosphereConfig, MAX_ISO_DIVISIONS,
    MAX_ZONE_DIVISIONS, TriangulationSetting, default_config_dir,
};
pub use error::ConfigError;
