use std::env;
use std::fs;
use std::path::PathBuf;

use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;

use crate::engine::{RecommenderConfig, ASSISTED_TOP_K, DEFAULT_TOP_K};

/// Effective application configuration. Defaults < file < environment.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub recommender: RecommenderSettings,
    pub gemini: GeminiConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecommenderSettings {
    /// Result-list size for local-only recommendations.
    pub top_k: usize,
    /// Result-list size when the AI analyzer participates.
    pub assisted_top_k: usize,
}

impl RecommenderSettings {
    pub fn local(&self) -> RecommenderConfig {
        RecommenderConfig { top_k: self.top_k }
    }

    pub fn assisted(&self) -> RecommenderConfig {
        RecommenderConfig { top_k: self.assisted_top_k }
    }
}

#[derive(Clone, Debug)]
pub struct GeminiConfig {
    /// Absent key disables the AI boundary; the pipeline then runs local-only.
    pub api_key: Option<SecretString>,
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

const DEFAULT_GEMINI_BASE_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models";
const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
const DEFAULT_TIMEOUT_SECS: u64 = 15;
const DEFAULT_CONFIG_FILE: &str = "bharatshop.toml";

/// File-level schema: every field optional, layered over defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    recommender: FileRecommender,
    #[serde(default)]
    gemini: FileGemini,
    #[serde(default)]
    logging: FileLogging,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileRecommender {
    top_k: Option<usize>,
    assisted_top_k: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileGemini {
    api_key: Option<String>,
    base_url: Option<String>,
    model: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileLogging {
    level: Option<String>,
    format: Option<LogFormat>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            recommender: RecommenderSettings {
                top_k: DEFAULT_TOP_K,
                assisted_top_k: ASSISTED_TOP_K,
            },
            gemini: GeminiConfig {
                api_key: None,
                base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
                model: DEFAULT_GEMINI_MODEL.to_string(),
                timeout_secs: DEFAULT_TIMEOUT_SECS,
            },
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let path = options
            .config_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        match fs::read_to_string(&path) {
            Ok(contents) => {
                let file: FileConfig = toml::from_str(&contents)
                    .map_err(|source| ConfigError::ParseFile { path: path.clone(), source })?;
                config.apply_file(file);
            }
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                if options.require_file {
                    return Err(ConfigError::MissingConfigFile(path));
                }
            }
            Err(source) => return Err(ConfigError::ReadFile { path, source }),
        }

        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    fn apply_file(&mut self, file: FileConfig) {
        if let Some(top_k) = file.recommender.top_k {
            self.recommender.top_k = top_k;
        }
        if let Some(assisted_top_k) = file.recommender.assisted_top_k {
            self.recommender.assisted_top_k = assisted_top_k;
        }
        if let Some(api_key) = file.gemini.api_key {
            self.gemini.api_key = Some(SecretString::from(api_key));
        }
        if let Some(base_url) = file.gemini.base_url {
            self.gemini.base_url = base_url;
        }
        if let Some(model) = file.gemini.model {
            self.gemini.model = model;
        }
        if let Some(timeout_secs) = file.gemini.timeout_secs {
            self.gemini.timeout_secs = timeout_secs;
        }
        if let Some(level) = file.logging.level {
            self.logging.level = level;
        }
        if let Some(format) = file.logging.format {
            self.logging.format = format;
        }
    }

    fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Ok(api_key) = env::var("GEMINI_API_KEY") {
            if !api_key.trim().is_empty() {
                self.gemini.api_key = Some(SecretString::from(api_key));
            }
        }
        if let Ok(model) = env::var("BHARATSHOP_GEMINI_MODEL") {
            self.gemini.model = model;
        }
        if let Ok(level) = env::var("BHARATSHOP_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = env::var("BHARATSHOP_LOG_FORMAT") {
            self.logging.format = match format.as_str() {
                "compact" => LogFormat::Compact,
                "pretty" => LogFormat::Pretty,
                "json" => LogFormat::Json,
                _ => {
                    return Err(ConfigError::InvalidEnvOverride {
                        key: "BHARATSHOP_LOG_FORMAT".to_string(),
                        value: format,
                    })
                }
            };
        }
        if let Ok(top_k) = env::var("BHARATSHOP_TOP_K") {
            self.recommender.top_k = top_k.parse().map_err(|_| {
                ConfigError::InvalidEnvOverride {
                    key: "BHARATSHOP_TOP_K".to_string(),
                    value: top_k,
                }
            })?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.recommender.top_k == 0 {
            return Err(ConfigError::Validation("recommender.top_k must be at least 1".into()));
        }
        if self.recommender.assisted_top_k == 0 {
            return Err(ConfigError::Validation(
                "recommender.assisted_top_k must be at least 1".into(),
            ));
        }
        if self.gemini.timeout_secs == 0 {
            return Err(ConfigError::Validation("gemini.timeout_secs must be positive".into()));
        }
        if self.gemini.base_url.is_empty() || self.gemini.model.is_empty() {
            return Err(ConfigError::Validation("gemini.base_url and gemini.model are required".into()));
        }
        Ok(())
    }

    pub fn gemini_enabled(&self) -> bool {
        self.gemini.api_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn defaults_validate() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.recommender.top_k, DEFAULT_TOP_K);
        assert_eq!(config.recommender.assisted_top_k, ASSISTED_TOP_K);
        assert!(!config.gemini_enabled());
    }

    #[test]
    fn file_values_override_defaults() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(
            file,
            "[recommender]\ntop_k = 8\n\n[gemini]\nmodel = \"gemini-test\"\n\n[logging]\nformat = \"json\""
        )
        .expect("write config");

        let config = AppConfig::load(LoadOptions {
            config_path: Some(file.path().to_path_buf()),
            require_file: true,
        })
        .expect("load config");

        assert_eq!(config.recommender.top_k, 8);
        assert_eq!(config.gemini.model, "gemini-test");
        assert_eq!(config.logging.format, LogFormat::Json);
        // Untouched fields keep their defaults.
        assert_eq!(config.gemini.base_url, DEFAULT_GEMINI_BASE_URL);
    }

    #[test]
    fn unknown_file_keys_are_rejected() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "[recommender]\nmax_results = 8").expect("write config");

        let result = AppConfig::load(LoadOptions {
            config_path: Some(file.path().to_path_buf()),
            require_file: true,
        });
        assert!(matches!(result, Err(ConfigError::ParseFile { .. })));
    }

    #[test]
    fn missing_required_file_is_an_error() {
        let result = AppConfig::load(LoadOptions {
            config_path: Some(PathBuf::from("/nonexistent/bharatshop.toml")),
            require_file: true,
        });
        assert!(matches!(result, Err(ConfigError::MissingConfigFile(_))));
    }

    #[test]
    fn zero_top_k_fails_validation() {
        let mut config = AppConfig::default();
        config.recommender.top_k = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }
}
