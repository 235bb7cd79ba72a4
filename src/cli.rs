//! Command-line interface definitions using clap

use clap::{Parser, Subcommand};

/// IpLocations - IPv4 to country resolution service
#[derive(Parser, Debug)]
#[command(name = "iplocations")]
#[command(version)]
#[command(about = "IPv4 to country resolution service", long_about = None)]
pub struct Cli {
    /// Configuration file path (default: config.toml)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve,

    /// Resolve an IPv4 address to its country code
    Resolve {
        /// Dotted-decimal IPv4 address
        ip: String,
    },

    /// Load a single range into the store
    Load {
        start_ip: String,
        end_ip: String,
        country: String,
    },

    /// Import ranges from a CSV file (start_ip,end_ip,country)
    Import {
        /// Input file path
        file_path: String,
    },

    /// Show the ordinal and shard of an address
    Shard {
        ip: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// Configuration management commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: config.example.toml)
        output_path: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["iplocations"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_global_config_flag() {
        let cli = Cli::try_parse_from(["iplocations", "resolve", "1.2.3.4", "-c", "custom.toml"])
            .unwrap();
        assert_eq!(cli.config.as_deref(), Some("custom.toml"));
        assert_eq!(
            cli.command,
            Some(Commands::Resolve {
                ip: "1.2.3.4".to_string()
            })
        );
    }

    #[test]
    fn test_load_requires_three_args() {
        assert!(Cli::try_parse_from(["iplocations", "load", "1.0.0.0", "1.0.0.255"]).is_err());
        let cli =
            Cli::try_parse_from(["iplocations", "load", "1.0.0.0", "1.0.0.255", "AU"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Load { .. })));
    }
}
