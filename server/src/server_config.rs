use std::net::SocketAddr;
use std::time::Duration;

use common::config::Validate;
use common::games::tictactoe::BotType;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_FILE: &str = "tictactoe_server_config.yaml";
pub const CLEANUP_CHECK_INTERVAL: Duration = Duration::from_secs(300);
pub const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(3600);

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct ServerConfig {
    pub address: String,
    #[serde(default)]
    pub bot: BotType,
    #[serde(default)]
    pub static_files_path: Option<String>,
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), String> {
        self.address
            .parse::<SocketAddr>()
            .map_err(|e| format!("address \"{}\" is not a socket address: {}", self.address, e))?;
        if let Some(path) = &self.static_files_path
            && path.is_empty()
        {
            return Err("static_files_path must not be empty if provided".to_string());
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: "0.0.0.0:5000".to_string(),
            bot: BotType::Minimax,
            static_files_path: None,
        }
    }
}
