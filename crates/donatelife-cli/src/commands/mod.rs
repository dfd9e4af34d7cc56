//! One module per top-level subcommand.

pub mod completions;
pub mod config;
pub mod init;
pub mod shell;
pub mod validate;
