//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Global application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Default transcription settings.
    pub transcribe: TranscribeDefaults,

    /// Remote service endpoints.
    pub service: ServiceConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Default transcription parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscribeDefaults {
    /// Per-request duration ceiling imposed by the transcription service (seconds).
    pub window_secs: f64,

    /// Maximum simultaneous transcription requests.
    pub concurrency: usize,

    /// Audio sample rate expected by the transcriber (Hz).
    pub sample_rate: u32,
}

/// Remote service endpoints and credentials.
///
/// Tokens are read from the named environment variables, never stored in the
/// config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Transcription endpoint URL.
    pub whisper_url: String,

    /// Environment variable holding the transcription bearer token.
    pub whisper_token_env: String,

    /// Chapter-summary endpoint URL.
    pub chapters_url: String,

    /// Environment variable holding the chapter-summary bearer token.
    pub chapters_token_env: String,

    /// Chat model used for chapter summaries.
    pub chapters_model: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "clipscribe=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            transcribe: TranscribeDefaults::default(),
            service: ServiceConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for TranscribeDefaults {
    fn default() -> Self {
        Self {
            window_secs: 120.0,
            concurrency: 4,
            sample_rate: 16000,
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            whisper_url: "https://api.cloudflare.com/client/v4/accounts/default/ai/run/@cf/openai/whisper".to_string(),
            whisper_token_env: "CLIPSCRIBE_WHISPER_TOKEN".to_string(),
            chapters_url: "https://api.openai.com/v1/chat/completions".to_string(),
            chapters_token_env: "CLIPSCRIBE_CHAPTERS_TOKEN".to_string(),
            chapters_model: "gpt-4-1106-preview".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if config_path.exists() {
            match std::fs::read_to_string(&config_path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {:?}: {}", config_path, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Save config to the standard location.
    pub fn save(&self) -> Result<(), std::io::Error> {
        let config_path = config_file_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(config_path, json)
    }
}

/// Standard config file location.
fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("clipscribe").join("config.json")
}
