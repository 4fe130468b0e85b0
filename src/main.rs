use clap::{CommandFactory, Parser};
use sfdeploy::cli::{deploy, Cli, Commands};
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let Some(Commands::Deploy(args)) = cli.command else {
        let _ = Cli::command().print_help();
        std::process::exit(1);
    };

    let config = match deploy::build_config(&args) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            std::process::exit(1);
        }
    };

    config.init_logging();
    info!("sfdeploy starting");

    tokio::select! {
        result = deploy::execute(&args, &config) => {
            if let Err(e) = result {
                error!(error = %e, "Deployment failed");
                std::process::exit(1);
            }
        }
        _ = signal::ctrl_c() => {
            info!("Shutdown signal received, aborting deployment");
            std::process::exit(1);
        }
    }

    info!("sfdeploy finished");
}
