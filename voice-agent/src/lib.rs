//! Command line front end for the Fish Speech and RuNorm adapters.

pub mod commands;
pub mod config;
pub mod logging;
pub mod speak;

pub use config::{Cli, Command};
pub use logging::init_logging;
pub use speak::{synthesize, write_wav};
