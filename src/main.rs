use clap::Parser;

use iplocations::cli::Cli;
use iplocations::config::init_config;
use iplocations::runtime::modes::{self, Mode};
use iplocations::system::init_logging;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = init_config(cli.config.as_deref());

    // 必须持有到进程结束，保证日志刷盘
    let log_guard = init_logging(&config.logging);

    let exit_code = match modes::detect_mode(cli.command) {
        #[cfg(feature = "server")]
        Mode::Server => match modes::run_server().await {
            Ok(()) => 0,
            Err(e) => {
                match e.downcast_ref::<iplocations::errors::IpLocationsError>() {
                    Some(err) => eprintln!("{}", err.format_colored()),
                    None => eprintln!("{:#}", e),
                }
                1
            }
        },
        #[cfg(feature = "cli")]
        Mode::Cli(command) => modes::run_cli(command).await,
        Mode::Unknown => {
            eprintln!("No execution mode available: build with the `server` or `cli` feature");
            2
        }
    };

    drop(log_guard);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }

    Ok(())
}
