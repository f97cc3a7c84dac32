use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Environment variable consulted when `generation.api_key` is empty
pub const API_KEY_ENV: &str = "JANUS_API_KEY";

/// Top-level configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Generation service configuration
    pub generation: GenerationConfig,

    /// Analysis run configuration
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Transcript logging configuration
    #[serde(default)]
    pub transcript: TranscriptConfig,
}

/// Generation service configuration
#[derive(Debug, Deserialize, Clone)]
pub struct GenerationConfig {
    /// Service name ("mock" or "command")
    pub provider: String,

    /// API key forwarded to the service
    #[serde(default)]
    pub api_key: String,

    /// Model name to use
    #[serde(default = "default_model")]
    pub model: String,

    /// Program and arguments for the "command" service
    #[serde(default)]
    pub command: Vec<String>,

    /// Timeout for a single generation call in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

/// Analysis run configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AnalysisConfig {
    /// Run the two independent analyses of a two-lens run concurrently
    #[serde(default)]
    pub parallel_analyses: bool,
}

/// Configuration for transcript logging of generation exchanges
#[derive(Debug, Deserialize, Clone)]
pub struct TranscriptConfig {
    #[serde(default)]
    pub enabled: bool,

    /// Directory receiving transcript files
    #[serde(default = "default_log_dir")]
    pub log_dir: String,

    #[serde(default = "default_true")]
    pub include_full_prompts: bool,

    #[serde(default = "default_true")]
    pub include_full_responses: bool,

    /// Echo transcript entries to stdout
    #[serde(default)]
    pub console_logging: bool,

    /// Number of transcript files kept on disk
    #[serde(default = "default_log_files_to_keep")]
    pub log_files_to_keep: u32,
}

impl Default for TranscriptConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            log_dir: default_log_dir(),
            include_full_prompts: true,
            include_full_responses: true,
            console_logging: false,
            log_files_to_keep: default_log_files_to_keep(),
        }
    }
}

// Default values for optional configuration
fn default_model() -> String {
    "gemini-1.5-pro-latest".to_string()
}

fn default_timeout() -> u64 {
    600
}

fn default_log_dir() -> String {
    "./logs".to_string()
}

fn default_log_files_to_keep() -> u32 {
    10
}

fn default_true() -> bool {
    true
}

impl GenerationConfig {
    /// Credential from the config file, falling back to the environment
    pub fn resolve_api_key(&self) -> Option<String> {
        if !self.api_key.trim().is_empty() {
            return Some(self.api_key.clone());
        }
        std::env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config_text = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        let config: Config = toml::from_str(&config_text)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;

        Ok(config)
    }

    /// Create a new config with default values for testing
    #[cfg(test)]
    pub fn for_testing() -> Self {
        Self {
            generation: GenerationConfig {
                provider: "mock".to_string(),
                api_key: "test-key".to_string(),
                model: "test-model".to_string(),
                command: Vec::new(),
                timeout_seconds: default_timeout(),
            },
            analysis: AnalysisConfig::default(),
            transcript: TranscriptConfig::default(),
        }
    }
}
