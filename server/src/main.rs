mod cleanup_task;
mod server_config;
mod session_store;
mod web_server;

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use common::config::{ConfigManager, Validate};
use common::{log, logger};

use cleanup_task::CleanupTask;
use server_config::{CLEANUP_CHECK_INTERVAL, DEFAULT_CONFIG_FILE, INACTIVITY_TIMEOUT, ServerConfig};
use session_store::SessionStore;
use web_server::{WebServerState, run_web_server};

#[derive(Parser)]
#[command(name = "tictactoe_server")]
struct Args {
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: String,

    /// Overrides the address from the config file.
    #[arg(long)]
    address: Option<String>,

    #[arg(long)]
    use_log_prefix: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Server".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let config_manager: ConfigManager<_, ServerConfig> = ConfigManager::from_yaml_file(&args.config);
    let mut config = config_manager.get_config()?;
    if let Some(address) = args.address {
        config.address = address;
        config.validate()?;
    }

    let address: SocketAddr = config.address.parse()?;
    let session_store = SessionStore::new();

    let cleanup_task = CleanupTask::new(
        session_store.clone(),
        CLEANUP_CHECK_INTERVAL,
        INACTIVITY_TIMEOUT,
    );
    tokio::spawn(async move {
        cleanup_task.run().await;
    });

    log!("Tic-tac-toe server starting with the {} bot", config.bot);

    let state = WebServerState {
        session_store,
        bot_type: config.bot,
    };
    run_web_server(address, state, config.static_files_path.map(PathBuf::from)).await?;

    log!("Server shut down gracefully");

    Ok(())
}
