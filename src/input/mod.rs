pub mod commands;

pub use commands::{help_lines, parse_command, CommandError, ReplayCommand};
