//! Configuration management for quasar.
//!
//! This module handles loading and saving configuration from `~/.quasar/`.

mod paths;
mod settings;

pub use paths::Paths;
pub use settings::{ColorSetting, Config, GeneralConfig, StatsConfig};
