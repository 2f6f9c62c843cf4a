use crate::error::AppError;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

const DEFAULT_USERNAME: &str = "Devikamatta";
const DEFAULT_GRAPHQL_URL: &str = "https://leetcode.com/graphql";
const DEFAULT_TEMPLATE_PATH: &str = "Design.svg";
const DEFAULT_OUTPUT_PATH: &str = "Display.svg";
const DEFAULT_LOG_LEVEL: &str = "info";

const USERNAME_ENV: &str = "LEETCARD_USERNAME";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub username: String,
    pub graphql_url: String,
    pub template_path: PathBuf,
    pub output_path: PathBuf,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            username: DEFAULT_USERNAME.to_string(),
            graphql_url: DEFAULT_GRAPHQL_URL.to_string(),
            template_path: PathBuf::from(DEFAULT_TEMPLATE_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

/// On-disk form; every field is optional and falls back to the default.
#[derive(Deserialize, Default)]
struct FileConfig {
    username: Option<String>,
    graphql_url: Option<String>,
    template_path: Option<PathBuf>,
    output_path: Option<PathBuf>,
    log_level: Option<String>,
}

fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("leetcard").join("config.toml"))
}

impl Config {
    /// Defaults, then the optional config file, then `LEETCARD_USERNAME`.
    pub fn load() -> Result<Self, AppError> {
        let config = match get_config_path() {
            Some(path) if path.exists() => Self::from_toml_str(&fs::read_to_string(path)?)?,
            _ => Self::default(),
        };

        Ok(config.with_env_overrides())
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(username) = std::env::var(USERNAME_ENV) {
            let username = username.trim();
            if !username.is_empty() {
                self.username = username.to_string();
            }
        }
        self
    }

    fn from_toml_str(contents: &str) -> Result<Self, AppError> {
        let file: FileConfig =
            toml::from_str(contents).map_err(|e| AppError::Config(e.to_string()))?;

        let defaults = Self::default();
        Ok(Self {
            username: file.username.unwrap_or(defaults.username),
            graphql_url: file.graphql_url.unwrap_or(defaults.graphql_url),
            template_path: file.template_path.unwrap_or(defaults.template_path),
            output_path: file.output_path.unwrap_or(defaults.output_path),
            log_level: file.log_level.unwrap_or(defaults.log_level),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.username, "Devikamatta");
        assert_eq!(config.graphql_url, "https://leetcode.com/graphql");
        assert_eq!(config.template_path, PathBuf::from("Design.svg"));
        assert_eq!(config.output_path, PathBuf::from("Display.svg"));
    }

    #[test]
    fn test_config_partial_file_keeps_defaults() {
        let config = Config::from_toml_str("username = \"someone\"").unwrap();
        assert_eq!(config.username, "someone");
        assert_eq!(config.graphql_url, DEFAULT_GRAPHQL_URL);
        assert_eq!(config.output_path, PathBuf::from(DEFAULT_OUTPUT_PATH));
    }

    #[test]
    fn test_config_full_file() {
        let toml_str = r#"
            username = "alice"
            graphql_url = "http://localhost:9000/graphql"
            template_path = "templates/card.svg"
            output_path = "out/card.svg"
            log_level = "debug"
        "#;
        let config = Config::from_toml_str(toml_str).unwrap();
        assert_eq!(config.username, "alice");
        assert_eq!(config.graphql_url, "http://localhost:9000/graphql");
        assert_eq!(config.template_path, PathBuf::from("templates/card.svg"));
        assert_eq!(config.output_path, PathBuf::from("out/card.svg"));
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_config_malformed_file() {
        let result = Config::from_toml_str("username = ");
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_username_env_priority() {
        let original_env = std::env::var(USERNAME_ENV).ok();

        unsafe {
            std::env::set_var(USERNAME_ENV, "  env_user ");
        }
        let base = Config {
            graphql_url: "http://localhost:9000/graphql".to_string(),
            ..Config::default()
        };
        let config = base.with_env_overrides();

        unsafe {
            if let Some(val) = original_env {
                std::env::set_var(USERNAME_ENV, val);
            } else {
                std::env::remove_var(USERNAME_ENV);
            }
        }

        assert_eq!(config.username, "env_user");
        assert_eq!(config.graphql_url, "http://localhost:9000/graphql");
    }
}
