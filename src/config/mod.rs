#[cfg(feature = "cli")]
pub mod cli;

use crate::core::policy::SyncPolicy;
use crate::utils::error::{AdminError, Result};
use crate::utils::validation::{
    validate_positive_number, validate_resource_path, validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub service: ServiceConfig,
    #[serde(default)]
    pub sync: SyncPolicy,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub mock: MockConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub base_url: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default = "default_companies_path")]
    pub companies_path: String,
    #[serde(default = "default_employees_path")]
    pub employees_path: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    #[serde(default)]
    pub json: bool,
}

/// Files that replace the bundled mock lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MockConfig {
    pub companies_file: Option<PathBuf>,
    pub employees_file: Option<PathBuf>,
}

fn default_timeout_seconds() -> u64 {
    10
}

fn default_companies_path() -> String {
    "companies".to_string()
}

fn default_employees_path() -> String {
    "employees".to_string()
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: default_timeout_seconds(),
            companies_path: default_companies_path(),
            employees_path: default_employees_path(),
        }
    }
}

impl AppConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AdminError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| AdminError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replace `${VAR}` with the environment value; unknown variables stay.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| AdminError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.service.timeout_seconds)
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_url("service.base_url", &self.service.base_url)?;
        validate_positive_number("service.timeout_seconds", self.service.timeout_seconds, 1)?;
        validate_resource_path("service.companies_path", &self.service.companies_path)?;
        validate_resource_path("service.employees_path", &self.service.employees_path)?;

        if let Some(level) = &self.logging.level {
            let valid_levels = ["trace", "debug", "info", "warn", "error"];
            if !valid_levels.contains(&level.as_str()) {
                return Err(AdminError::InvalidConfigValueError {
                    field: "logging.level".to_string(),
                    value: level.clone(),
                    reason: format!("Valid levels: {}", valid_levels.join(", ")),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::policy::{IdPolicy, Mode};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[service]
base_url = "https://admin.example.com/api"
timeout_seconds = 3
companies_path = "orgs"

[sync]
mode = "development"
id_policy = "monotonic"

[logging]
level = "debug"
json = true

[mock]
companies_file = "fixtures/companies.json"
"#;

        let config = AppConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.service.base_url, "https://admin.example.com/api");
        assert_eq!(config.service.companies_path, "orgs");
        assert_eq!(config.service.employees_path, "employees");
        assert_eq!(config.timeout(), Duration::from_secs(3));
        assert_eq!(config.sync.mode, Mode::Development);
        assert_eq!(config.sync.id_policy, IdPolicy::Monotonic);
        assert!(config.logging.json);
        assert_eq!(
            config.mock.companies_file,
            Some(PathBuf::from("fixtures/companies.json"))
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_minimal_config_defaults_to_production() {
        let config = AppConfig::from_toml_str(
            r#"
[service]
base_url = "http://localhost:8080"
"#,
        )
        .unwrap();
        assert_eq!(config.sync, SyncPolicy::production());
        assert_eq!(config.service.timeout_seconds, 10);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("COMPANY_ADMIN_TEST_URL", "https://test.api.com");

        let config = AppConfig::from_toml_str(
            r#"
[service]
base_url = "${COMPANY_ADMIN_TEST_URL}"
"#,
        )
        .unwrap();
        assert_eq!(config.service.base_url, "https://test.api.com");

        std::env::remove_var("COMPANY_ADMIN_TEST_URL");
    }

    #[test]
    fn test_config_validation() {
        let mut config = AppConfig::default();
        assert!(config.validate().is_ok());

        config.service.base_url = "invalid-url".to_string();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.logging.level = Some("loud".to_string());
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.service.timeout_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_mode_is_a_parse_error() {
        let err = AppConfig::from_toml_str(
            r#"
[service]
base_url = "http://localhost:8080"

[sync]
mode = "staging"
"#,
        )
        .unwrap_err();
        assert!(matches!(err, AdminError::ConfigError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[service]\nbase_url = \"https://api.example.com\"\n")
            .unwrap();

        let config = AppConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.service.base_url, "https://api.example.com");
    }
}
