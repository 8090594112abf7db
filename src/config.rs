use serde::{Deserialize, Serialize};

use std::time::Duration;
use std::{env, fs, path::Path};

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: Server,
    #[serde(with = "humantime_serde", default = "default_request_timeout")]
    pub request_timeout: Duration,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Server {
    pub base_url: String,
    pub port: u16,
}

impl Server {
    pub fn rest_url(&self) -> String {
        format!("http://{}:{}", self.base_url, self.port)
    }
}

const fn default_request_timeout() -> Duration {
    DEFAULT_REQUEST_TIMEOUT
}

fn load_from_env() -> Result<Config, Box<dyn std::error::Error>> {
    let server = Server {
        base_url: env::var("NOTES_SERVER_BASE_URL")
            .map_err(|_| "NOTES_SERVER_BASE_URL environment variable is required")?,
        port: env::var("NOTES_SERVER_PORT")
            .map_err(|_| "NOTES_SERVER_PORT environment variable is required")?
            .parse::<u16>()
            .map_err(|e| format!("Failed to parse NOTES_SERVER_PORT: {}", e))?,
    };

    let request_timeout = match env::var("REQUEST_TIMEOUT_SECS") {
        Ok(secs) => Duration::from_secs(
            secs.parse::<u64>()
                .map_err(|e| format!("Failed to parse REQUEST_TIMEOUT_SECS: {}", e))?,
        ),
        Err(_) => DEFAULT_REQUEST_TIMEOUT,
    };

    Ok(Config {
        server,
        request_timeout,
    })
}

pub fn load_config() -> Result<Config, Box<dyn std::error::Error>> {
    // Retrieve env variable
    let config_path = env::var("NOTES_CLIENT_CONFIG").unwrap_or_else(|_| "config.yaml".to_string());

    // Try env path
    if Path::new(&config_path).exists() {
        let contents = fs::read_to_string(&config_path)?;
        return serde_yaml::from_str(&contents).map_err(Into::into);
    }

    // Fallback to config.yaml
    if Path::new("config.yaml").exists() {
        tracing::warn!(
            "Config file '{}' not found, falling back to 'config.yaml'",
            config_path
        );
        let contents = fs::read_to_string("config.yaml")?;
        return serde_yaml::from_str(&contents).map_err(Into::into);
    }

    // Fallback to config.example.yaml
    if Path::new("config.example.yaml").exists() {
        tracing::warn!(
            "Config file '{}' and 'config.yaml' not found, falling back to 'config.example.yaml'\
             \n This file should not be used and should be replaced with actual data",
            config_path
        );
        let contents = fs::read_to_string("config.example.yaml")?;
        return serde_yaml::from_str(&contents).map_err(Into::into);
    }

    // Fallback to environment variables
    tracing::info!(
        "No config file found, attempting to load configuration from environment variables"
    );
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Successfully loaded configuration from environment variables");
            Ok(config)
        }
        Err(e) => Err(format!(
            "Config file not found and environment variables are incomplete. \
             Tried: '{}', 'config.yaml', 'config.example.yaml', and environment variables. \
             Error: {}",
            config_path, e
        )
        .into()),
    }
}
