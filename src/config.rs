use crate::data::GameMode;
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_BASE_URL: &str = "https://lichess.org";
pub const TOKEN_ENV: &str = "LICHESS_TOKEN";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub mode: GameMode,
    pub bucket_size: i64,
    pub max_games: Option<u32>,
    pub timeout_secs: u64,
    pub log_level: String,
    #[serde(skip_serializing)]
    pub token: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            mode: GameMode::Blitz,
            bucket_size: 10,
            max_games: None,
            timeout_secs: 30,
            log_level: "info".to_string(),
            token: None,
        }
    }
}

impl AppConfig {
    pub fn sanitized(mut self) -> Self {
        if self.base_url.trim().is_empty() {
            self.base_url = DEFAULT_BASE_URL.to_string();
        }

        if self.log_level.trim().is_empty() {
            self.log_level = "info".to_string();
        }

        if self.token.as_deref().is_some_and(|t| t.trim().is_empty()) {
            self.token = None;
        }

        self.timeout_secs = self.timeout_secs.clamp(1, 300);
        self
    }

    /// Falls back to `LICHESS_TOKEN` (a `.env` file is honoured) when no token is configured.
    pub fn with_env_token(mut self) -> Self {
        if self.token.is_none() {
            let _ = dotenvy::dotenv();
            self.token = std::env::var(TOKEN_ENV).ok();
        }
        self.sanitized()
    }
}

pub fn config_path() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(".lichess-candles.json")
}

/// The config to run with, and why the file was ignored if it was.
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: AppConfig,
    pub error: Option<AppError>,
}

impl LoadedConfig {
    /// Logs the reason the file was ignored. Call once logging is up.
    pub fn report(&self, path: &Path) {
        if let Some(err) = &self.error {
            tracing::warn!(path = %path.display(), %err, "ignoring unreadable config, using defaults");
        }
    }
}

/// A missing file silently gives defaults; an unreadable one gives defaults plus the error.
pub fn load_config(path: &Path) -> LoadedConfig {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return LoadedConfig {
                config: AppConfig::default(),
                error: None,
            }
        }
        Err(err) => {
            return LoadedConfig {
                config: AppConfig::default(),
                error: Some(err.into()),
            }
        }
    };

    match serde_json::from_str::<AppConfig>(&contents) {
        Ok(cfg) => LoadedConfig {
            config: cfg.sanitized(),
            error: None,
        },
        Err(err) => LoadedConfig {
            config: AppConfig::default(),
            error: Some(err.into()),
        },
    }
}

pub fn save_config(path: &Path, config: &AppConfig) -> std::io::Result<()> {
    let payload = serde_json::to_string_pretty(config)?;
    std::fs::write(path, payload)
}
