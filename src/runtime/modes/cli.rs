//! CLI mode
//!
//! One-shot commands. Each command connects to the configured store,
//! does one thing and exits; nothing is warmed up. `serve` falls through
//! to server mode.

use colored::Colorize;

use crate::cli::{Commands, ConfigCommands};
use crate::config::{StaticConfig, get_config};
use crate::errors::IpLocationsError;
use crate::runtime::lifetime::startup::build_store;
use crate::store::{IpRange, LoadOutcome, Lookup, read_seed_file, shard_for};
use crate::utils::{decode, encode};

/// Run a CLI command, returning the process exit code
pub async fn run_cli(command: Commands) -> i32 {
    let config = get_config();
    match execute(&config, command).await {
        Ok(()) => 0,
        Err(e) => {
            match e.downcast_ref::<IpLocationsError>() {
                Some(err) => eprintln!("{} {}", "Error:".red().bold(), err.format_simple()),
                None => eprintln!("{} {:#}", "Error:".red().bold(), e),
            }
            1
        }
    }
}

async fn execute(config: &StaticConfig, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Serve => super::run_server().await?,
        Commands::Resolve { ip } => {
            let store = build_store(config).await?;
            match store.lookup(&ip).await? {
                Lookup::Found(range) => {
                    println!("{}", range.country.green().bold());
                    println!("  range: {}", describe(&range));
                }
                Lookup::InvalidIp => println!("{} is not a valid IPv4 address", ip.yellow()),
                Lookup::NoCandidate => println!("{}: not found", ip.yellow()),
                Lookup::OutsideRange(nearest) => {
                    println!("{}: not found (nearest preceding range {})", ip.yellow(), nearest)
                }
            }
        }
        Commands::Load {
            start_ip,
            end_ip,
            country,
        } => {
            let store = build_store(config).await?;
            report_load(&store.load(&start_ip, &end_ip, &country).await?, &start_ip, &end_ip);
        }
        Commands::Import { file_path } => {
            let store = build_store(config).await?;
            let seeds = read_seed_file(&file_path)?;
            let report = store.warm_up(&seeds).await?;
            println!(
                "{} {} ranges from {} ({} new, {} already present)",
                "Imported".green().bold(),
                report.total(),
                file_path,
                report.inserted,
                report.already_present
            );
        }
        Commands::Shard { ip } => {
            let Some(ordinal) = encode(&ip) else {
                let err = IpLocationsError::validation(format!("Invalid IPv4 address: '{}'", ip));
                return Err(err.into());
            };
            let shard = shard_for(ordinal);
            let (lower, upper) = shard.bounds();
            println!("ordinal: {}", ordinal);
            println!(
                "shard:   {} ({} - {})",
                shard.to_string().cyan(),
                decode(lower),
                decode(upper)
            );
        }
        Commands::Config { action } => match action {
            ConfigCommands::Generate { output_path } => {
                let path = output_path.unwrap_or_else(|| "config.example.toml".to_string());
                StaticConfig::default()
                    .save_to_file(&path)
                    .map_err(|e| IpLocationsError::file_operation(e.to_string()))?;
                println!("{} {}", "Configuration written to".green(), path);
            }
        },
    }
    Ok(())
}

fn report_load(outcome: &LoadOutcome, start_ip: &str, end_ip: &str) {
    match outcome {
        LoadOutcome::Inserted => println!("{} {} - {}", "Loaded".green().bold(), start_ip, end_ip),
        LoadOutcome::AlreadyPresent => {
            println!("{} - {} {}", start_ip, end_ip, "already present".yellow())
        }
    }
}

fn describe(range: &IpRange) -> String {
    format!("{} ({} addresses)", range, u64::from(range.end - range.start) + 1)
}
