// ============================================================
// SERVER CONFIGURATION
// ============================================================
// Defaults layered under an optional TOML file and DATASWEEPER_* env vars

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::domain::error::{AppError, Result};

/// Runtime configuration for the service and pipeline defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address for the HTTP interface (default: 127.0.0.1)
    pub host: String,

    /// Bind port (default: 3001)
    pub port: u16,

    /// Number of rows shown in table previews (default: 5)
    pub preview_rows: usize,

    /// Maximum numeric columns handed to the chart renderer (default: 2)
    pub chart_columns: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3001,
            preview_rows: 5,
            chart_columns: 2,
        }
    }
}

impl ServerConfig {
    /// Load configuration: defaults, then `datasweeper.toml` if present,
    /// then `DATASWEEPER_*` environment variables.
    pub fn load() -> Result<Self> {
        let config: ServerConfig = Figment::from(Serialized::defaults(ServerConfig::default()))
            .merge(Toml::file("datasweeper.toml"))
            .merge(Env::prefixed("DATASWEEPER_"))
            .extract()
            .map_err(|e| AppError::ValidationError(format!("Invalid configuration: {}", e)))?;

        config.validate().map_err(AppError::ValidationError)?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.host.is_empty() {
            return Err("host must not be empty".to_string());
        }
        if self.preview_rows == 0 {
            return Err("preview_rows must be > 0".to_string());
        }
        if self.chart_columns == 0 {
            return Err("chart_columns must be > 0".to_string());
        }
        Ok(())
    }
}
