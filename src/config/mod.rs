mod api;
mod defaults;
mod validation;

use crate::cli::Args;
use crate::models::Language;
use crate::store::FilesystemStore;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

pub use api::ApiConfig;
pub use defaults::{default_model, default_request_timeout, example_config, DEFAULT_API_ENDPOINT};
pub use validation::{expand_with, normalize_endpoint};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub verbose: Option<bool>,
    #[serde(default)]
    pub data_dir: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ModelConfig {
    #[serde(default)]
    pub default_model: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub api_endpoint: String,
    pub model: String,
    pub request_timeout: u64,
    pub verbose: bool,
    pub data_dir: PathBuf,
    /// Language requested for this run; `None` keeps the stored preference.
    pub language: Option<Language>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct JsonConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

impl Config {
    pub fn from_env_and_args(args: &Args) -> Result<Self, String> {
        // Load JSON configuration first
        let json_config = JsonConfig::load().unwrap_or_default();
        Self::resolve(args, &json_config, |name| env::var(name).ok())
    }

    /// Merge settings with precedence CLI args > env vars > config file > defaults.
    pub fn resolve<F>(args: &Args, json_config: &JsonConfig, lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        // API key: env var > config file (with ${VAR} expansion)
        let api_key = lookup("GEMINI_API_KEY")
            .or_else(|| lookup("API_KEY"))
            .or_else(|| {
                json_config
                    .api
                    .api_key
                    .as_deref()
                    .map(|key| expand_with(key, &lookup))
            })
            .filter(|key| !key.is_empty() && !key.contains("${"));

        let api_endpoint = args
            .api_endpoint
            .clone()
            .or_else(|| lookup("LENS_API_ENDPOINT"))
            .or_else(|| {
                json_config
                    .api
                    .endpoint
                    .as_deref()
                    .map(|endpoint| expand_with(endpoint, &lookup))
            })
            .map(|endpoint| normalize_endpoint(&endpoint))
            .unwrap_or_else(|| DEFAULT_API_ENDPOINT.to_string());

        let model = args
            .model
            .clone()
            .or_else(|| lookup("LENS_MODEL"))
            .or(json_config.model.default_model.clone())
            .unwrap_or_else(default_model);

        let request_timeout = lookup("LENS_TIMEOUT")
            .and_then(|s| s.parse::<u64>().ok())
            .or(json_config.api.request_timeout)
            .unwrap_or_else(default_request_timeout);

        let verbose = args.verbose
            || lookup("LENS_VERBOSE")
                .map(|v| matches!(v.to_lowercase().as_str(), "true" | "1" | "yes"))
                .or(json_config.session.verbose)
                .unwrap_or(false);

        let data_dir = lookup("LENS_DATA_DIR")
            .filter(|dir| !dir.is_empty())
            .or(json_config.session.data_dir.clone())
            .map(PathBuf::from)
            .unwrap_or_else(FilesystemStore::default_data_dir);

        let language = match (&args.lang, &json_config.session.language) {
            (Some(lang), _) => Some(lang.parse::<Language>()?),
            (None, Some(lang)) => lang.parse::<Language>().ok(),
            (None, None) => None,
        };

        Ok(Config {
            api_key,
            api_endpoint,
            model,
            request_timeout,
            verbose,
            data_dir,
            language,
        })
    }
}

impl JsonConfig {
    pub fn load() -> Result<Self> {
        let config_paths = Self::get_config_paths();

        for path in config_paths {
            if path.exists() {
                let contents = fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read config file: {}", path.display()))?;

                let config: JsonConfig = if path.extension().and_then(|s| s.to_str())
                    == Some("yaml")
                    || path.extension().and_then(|s| s.to_str()) == Some("yml")
                {
                    serde_yaml::from_str(&contents).with_context(|| {
                        format!("Failed to parse YAML config file: {}", path.display())
                    })?
                } else {
                    serde_json::from_str(&contents).with_context(|| {
                        format!("Failed to parse JSON config file: {}", path.display())
                    })?
                };

                return Ok(config);
            }
        }

        // No config file found, return default
        Ok(JsonConfig::default())
    }

    pub fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. Current directory (highest priority - local override)
        paths.push(PathBuf::from(".lens.yaml"));
        paths.push(PathBuf::from(".lens.yml"));
        paths.push(PathBuf::from(".lens.json"));

        // 2. User's config directory (global config)
        if let Some(config_dir) = Self::global_config_dir() {
            paths.push(config_dir.join("lens.yaml"));
            paths.push(config_dir.join("lens.yml"));
            paths.push(config_dir.join("lens.json"));
        }

        paths
    }

    pub fn global_config_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".config").join("lens"))
    }

    /// Write the example config to the global config dir, refusing to overwrite.
    pub fn init_config_file() -> Result<PathBuf> {
        let config_dir =
            Self::global_config_dir().context("Could not determine home directory")?;
        let path = config_dir.join("lens.yaml");
        if path.exists() {
            anyhow::bail!("Config file already exists: {}", path.display());
        }
        fs::create_dir_all(&config_dir)
            .with_context(|| format!("Failed to create {}", config_dir.display()))?;
        fs::write(&path, example_config())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }
}
