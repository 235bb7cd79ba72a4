//! Mode routing
//!
//! - Server mode (HTTP server, default)
//! - CLI mode (one-shot commands against the configured store)
//!
//! The mode selection is based on the parsed subcommand and feature flags.

#[cfg(feature = "server")]
pub mod server;

#[cfg(feature = "cli")]
pub mod cli;

#[cfg(feature = "server")]
pub use server::run_server;

#[cfg(feature = "cli")]
pub use cli::run_cli;

use crate::cli::Commands;

/// Mode detection result
#[derive(Debug, PartialEq)]
pub enum Mode {
    #[cfg(feature = "server")]
    Server,
    #[cfg(feature = "cli")]
    Cli(Commands),
    Unknown,
}

/// Detect which mode to run
///
/// 1. No subcommand or `serve` -> Server mode (requires `server`)
/// 2. Any other subcommand -> CLI mode (requires `cli`)
/// 3. Otherwise -> Unknown
pub fn detect_mode(command: Option<Commands>) -> Mode {
    match command {
        None | Some(Commands::Serve) => server_mode(),
        Some(command) => cli_mode(command),
    }
}

#[cfg(feature = "server")]
fn server_mode() -> Mode {
    Mode::Server
}

#[cfg(not(feature = "server"))]
fn server_mode() -> Mode {
    Mode::Unknown
}

#[cfg(feature = "cli")]
fn cli_mode(command: Commands) -> Mode {
    Mode::Cli(command)
}

#[cfg(not(feature = "cli"))]
fn cli_mode(_command: Commands) -> Mode {
    Mode::Unknown
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "server")]
    #[test]
    fn test_no_command_is_server() {
        assert_eq!(detect_mode(None), Mode::Server);
        assert_eq!(detect_mode(Some(Commands::Serve)), Mode::Server);
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_subcommand_is_cli() {
        let command = Commands::Shard {
            ip: "1.160.0.0".to_string(),
        };
        assert_eq!(detect_mode(Some(command.clone())), Mode::Cli(command));
    }

    #[cfg(not(feature = "cli"))]
    #[test]
    fn test_subcommand_without_cli_feature() {
        let command = Commands::Shard {
            ip: "1.160.0.0".to_string(),
        };
        assert_eq!(detect_mode(Some(command)), Mode::Unknown);
    }
}
