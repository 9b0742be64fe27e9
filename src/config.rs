use std::env;
use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub service_port: u16,
    pub service_host: String,
    /// Server the `convert` client talks to
    pub converter_base_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let service_port = env::var("SERVICE_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .context("SERVICE_PORT must be a valid port number (0-65535)")?;

        let service_host = env::var("SERVICE_HOST")
            .unwrap_or_else(|_| "0.0.0.0".to_string());

        let converter_base_url = env::var("CONVERTER_BASE_URL")
            .unwrap_or_else(|_| format!("http://127.0.0.1:{}", service_port));

        if converter_base_url.trim().is_empty() {
            anyhow::bail!("CONVERTER_BASE_URL must not be empty");
        }

        Ok(Config {
            service_port,
            service_host,
            converter_base_url,
        })
    }

    pub fn log_startup(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Service listening on: {}:{}", self.service_host, self.service_port);
        tracing::info!("  Converter base URL: {}", self.converter_base_url);
    }
}
