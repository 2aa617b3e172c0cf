//! CLI module for tomato-clock.
//!
//! This module provides the command-line interface:
//! - `commands`: Command definitions using clap derive
//! - `display`: Output formatting and display logic
//! - `session`: The interactive session loop

pub mod commands;
pub mod display;
pub mod session;

pub use commands::{Cli, Commands, PrefsAction, PrefsArgs, RunArgs};
pub use display::Display;
pub use session::{Flow, Session, SessionCommand, SessionOptions};
