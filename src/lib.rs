//! quasar - a life-planning CLI
//!
//! Keeps a life plan (purpose, vision, values), goals, scheduled tasks and a
//! reflection journal in a local `SQLite` store, and derives progress
//! statistics from them.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod features;
pub mod model;
pub mod output;
pub mod storage;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::QuasarError;
pub use storage::PlanStore;
