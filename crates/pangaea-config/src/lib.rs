//! Configuration system for Pangaea.
//!
//! Provides generation settings that persist to disk as RON files.
//! Supports CLI overrides via clap, reload detection, and forward/backward
//! compatible serialization.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{Config, DebugConfig, Selection, WorldConfig, default_config_dir};
pub use error::ConfigError;
