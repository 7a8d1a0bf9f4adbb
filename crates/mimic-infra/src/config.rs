//! Configuration loader for Mimic.
//!
//! Reads `config.toml` from the data directory (`~/.mimic/` in production)
//! into [`BotConfig`]. A missing file yields defaults. A malformed one is an
//! error: the allow-list lives in this file, so silently falling back to an
//! empty list would hide a broken deployment.
//!
//! Process-level settings (`GEMINI_API_KEY`, `PORT`) come from the environment.

use std::path::Path;

use secrecy::SecretString;

use mimic_types::config::BotConfig;
use mimic_types::error::ConfigError;

pub const CONFIG_FILE: &str = "config.toml";
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";
pub const PORT_VAR: &str = "PORT";
pub const DEFAULT_PORT: u16 = 3000;

/// Load configuration from `{data_dir}/config.toml`.
pub async fn load_config(data_dir: &Path) -> Result<BotConfig, ConfigError> {
    let config_path = data_dir.join(CONFIG_FILE);

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return Ok(BotConfig::default());
        }
        Err(err) => {
            return Err(ConfigError::Read {
                path: config_path.display().to_string(),
                message: err.to_string(),
            });
        }
    };

    let config: BotConfig = toml::from_str(&content).map_err(|err| ConfigError::Parse {
        path: config_path.display().to_string(),
        message: err.to_string(),
    })?;

    if config.allow_list.is_empty() {
        tracing::warn!(
            "allow_list in {} is empty; every inbound message will be ignored",
            config_path.display()
        );
    }

    Ok(config)
}

/// Render the effective configuration as TOML. Tokens are never included.
pub fn render_config(config: &BotConfig) -> Result<String, ConfigError> {
    toml::to_string_pretty(config).map_err(|err| ConfigError::Invalid {
        key: "config",
        message: err.to_string(),
    })
}

/// Read the generation API key from `GEMINI_API_KEY`.
pub fn api_key_from_env() -> Result<SecretString, ConfigError> {
    api_key_from(std::env::var(API_KEY_VAR).ok())
}

fn api_key_from(raw: Option<String>) -> Result<SecretString, ConfigError> {
    match raw {
        Some(key) if !key.trim().is_empty() => Ok(SecretString::from(key.trim().to_string())),
        _ => Err(ConfigError::MissingEnv(API_KEY_VAR)),
    }
}

/// Listening port: explicit override, else `PORT`, else 3000.
pub fn resolve_port(explicit: Option<u16>) -> Result<u16, ConfigError> {
    match explicit {
        Some(port) => Ok(port),
        None => parse_port(std::env::var(PORT_VAR).ok().as_deref()),
    }
}

fn parse_port(raw: Option<&str>) -> Result<u16, ConfigError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(DEFAULT_PORT),
        Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
            key: PORT_VAR,
            message: format!("'{value}' is not a valid port"),
        }),
    }
}
