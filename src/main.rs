use clap::Parser;

use linktrack::cli::Cli;
use linktrack::config::StaticConfig;
use linktrack::runtime::modes::{self, Mode};
use linktrack::system::init_logging;

fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = match StaticConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e.format_colored());
            std::process::exit(1);
        }
    };

    let system = actix_web::rt::System::new();

    match modes::detect_mode(cli.command) {
        Mode::Server => {
            let _guard = match init_logging(&config.logging) {
                Ok(guard) => guard,
                Err(e) => {
                    eprintln!("Failed to initialize logging: {:#}", e);
                    std::process::exit(1);
                }
            };

            if let Err(e) = system.block_on(modes::run_server(config)) {
                tracing::error!("Server exited with error: {:#}", e);
                std::process::exit(1);
            }
        }
        Mode::Cli(cmd) => {
            if let Err(e) = system.block_on(modes::run_cli(cmd, &config)) {
                eprintln!("{}", e.format_colored());
                std::process::exit(1);
            }
        }
    }
}
