use anyhow::Result;
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub llm: LLMConfig,
    pub agent: AgentConfig,
    pub demo: DemoConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LLMConfig {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    pub max_iterations: usize,
    pub max_orchestration_steps: usize,
}

/// Defaults for the smoke demo (which server to pull logs for, lookback).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoConfig {
    pub server_id: String,
    pub hours: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let config_env = env::var("CONFIG_ENV").unwrap_or_else(|_| "default".to_string());

        // Coded defaults keep the binary usable without a config directory;
        // the optional file and APP__ env vars layer on top.
        let config = Config::builder()
            .set_default("llm.model", "gpt-4o-mini")?
            .set_default("llm.max_tokens", 2048_i64)?
            .set_default("llm.temperature", 0.2_f64)?
            .set_default("agent.max_iterations", 8_i64)?
            .set_default("agent.max_orchestration_steps", 12_i64)?
            .set_default("demo.server_id", "prod-app-01")?
            .set_default("demo.hours", 12_i64)?
            .set_default("logging.level", "info")?
            .add_source(File::with_name(&format!("config/{}", config_env)).required(false))
            .add_source(Environment::with_prefix("APP").separator("__"))
            .build()?;

        config.try_deserialize()
    }

    pub fn api_key() -> Result<String> {
        env::var("OPENAI_API_KEY")
            .map_err(|_| anyhow::anyhow!("OPENAI_API_KEY environment variable not set"))
    }
}
