//! Configuration management
//!
//! Settings come from a TOML file (`triage.toml` by default) with CLI and
//! environment overrides layered on top. The database URL is the only
//! required value; everything else has a default.

use config::{Config, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::cli::Cli;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub database: DatabaseSettings,
    #[serde(default)]
    pub llm: LlmSettings,
    #[serde(default)]
    pub agent: AgentSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseSettings {
    /// Database connection URL (sqlite://, postgres://, mysql://).
    /// Required; typically supplied via the DATABASE_URL environment
    /// variable.
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LlmSettings {
    /// Model name/identifier
    #[serde(default = "default_model")]
    pub model: String,
    /// Environment variable containing the API key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,
    /// Custom base URL (for self-hosted or proxied endpoints)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Default temperature for completions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Default max tokens for completions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_key_env: None,
            base_url: None,
            temperature: Some(0.0),
            max_tokens: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AgentSettings {
    /// System prompt for the agent
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
    /// Maximum model round-trips per chat request
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
    /// Number of history messages included in the prompt
    #[serde(default = "default_history_window")]
    pub history_window: usize,
    /// Temperature override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            system_prompt: default_system_prompt(),
            max_iterations: default_max_iterations(),
            history_window: default_history_window(),
            temperature: None,
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_max_connections() -> u32 {
    5
}

fn default_connect_timeout() -> u64 {
    30
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_system_prompt() -> String {
    "You are TicketAgent, helpful and concise. Use tools when helpful.".to_string()
}

fn default_max_iterations() -> u32 {
    8
}

fn default_history_window() -> usize {
    20
}

impl Settings {
    /// Load settings from the default config file location
    pub fn new() -> Result<Self, anyhow::Error> {
        Self::from_file(Path::new("triage.toml"))
    }

    /// Load settings from CLI arguments (config file plus CLI overrides)
    pub fn new_with_cli(cli: &Cli) -> Result<Self, anyhow::Error> {
        let mut settings = Self::from_file(&cli.config)?;
        settings.apply_cli_overrides(cli);
        settings.validate()?;
        Ok(settings)
    }

    fn from_file(path: &Path) -> Result<Self, anyhow::Error> {
        let s = Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .build()?;

        Ok(s.try_deserialize()?)
    }

    fn apply_cli_overrides(&mut self, cli: &Cli) {
        if let Some(host) = &cli.host {
            self.server.host = host.clone();
        }
        if let Some(port) = cli.port {
            self.server.port = port;
        }
        if let Some(url) = &cli.database_url {
            self.database.url = url.clone();
        }
    }

    /// Validate the loaded configuration
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.database.url.is_empty() {
            anyhow::bail!(
                "Database URL is required: set DATABASE_URL or [database].url in the config file"
            );
        }
        if self.agent.max_iterations == 0 {
            anyhow::bail!("agent.max_iterations must be at least 1");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings {
            server: ServerSettings::default(),
            database: DatabaseSettings::default(),
            llm: LlmSettings::default(),
            agent: AgentSettings::default(),
        };

        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.server.port, 3000);
        assert_eq!(settings.llm.model, "gpt-4o-mini");
        assert_eq!(settings.agent.max_iterations, 8);
    }

    #[test]
    fn test_validate_requires_database_url() {
        let settings = Settings {
            server: ServerSettings::default(),
            database: DatabaseSettings::default(),
            llm: LlmSettings::default(),
            agent: AgentSettings::default(),
        };
        assert!(settings.validate().is_err());

        let mut with_url = settings;
        with_url.database.url = "sqlite::memory:".to_string();
        assert!(with_url.validate().is_ok());
    }
}
