//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the mosaic binary.

mod commands;
mod encode;
mod normalize;
mod sweep;

pub use commands::{Cli, Commands};
pub use encode::{handle_check_key_command, handle_encode_command};
pub use normalize::handle_normalize_command;
pub use sweep::handle_sweep_command;
