use clap::Parser;
use relicworth::app::App;
use relicworth::cli::Cli;
use relicworth::config::Config;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let mut config = match Config::load(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            std::process::exit(1);
        }
    };

    if let Some(catalog) = cli.catalog {
        config.catalog.path = catalog;
    }
    if let Some(cache_dir) = cli.cache_dir {
        config.cache.dir = cache_dir;
    }

    config.logging.init();
    info!("relicworth starting");

    tokio::select! {
        result = App::run(config) => {
            if let Err(e) = result {
                error!(error = %e, "Fatal error");
                eprintln!("relicworth: {e}");
                std::process::exit(1);
            }
        }
        _ = signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
    }

    info!("relicworth stopped");
}
