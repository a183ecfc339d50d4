#[cfg(feature = "cli")]
pub mod cli;

use crate::utils::error::{ErganiError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_positive_number, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

pub const DEFAULT_BASE_URL: &str = "https://trialeservices.yeka.gr/WebServicesAPI/api";

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

/// Connection settings for the Ergani API, handed to the transport once.
#[derive(Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"***")
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl ClientConfig {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            base_url: default_base_url(),
            username: username.into(),
            password: password.into(),
            timeout_seconds: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = Some(seconds);
        self
    }

    /// Reads `ERGANI_USERNAME`, `ERGANI_PASSWORD` and optionally `ERGANI_BASE_URL`.
    pub fn from_env() -> Result<Self> {
        let read = |name: &str| {
            std::env::var(name).map_err(|_| ErganiError::Config {
                field: name.to_string(),
                message: "environment variable is not set".to_string(),
            })
        };

        let mut config = Self::new(read("ERGANI_USERNAME")?, read("ERGANI_PASSWORD")?);
        if let Ok(base_url) = std::env::var("ERGANI_BASE_URL") {
            config.base_url = base_url;
        }
        Ok(config)
    }
}

impl Validate for ClientConfig {
    fn validate(&self) -> Result<()> {
        validate_url("client.base_url", &self.base_url)?;
        validate_non_empty_string("client.username", &self.username)?;
        validate_non_empty_string("client.password", &self.password)?;
        if let Some(timeout) = self.timeout_seconds {
            validate_positive_number("client.timeout_seconds", timeout, 1)?;
        }
        Ok(())
    }
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// `[logging]` table: output format and the level of the crate's own events.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub json: bool,
    #[serde(default)]
    pub level: Option<String>,
}

impl Validate for LoggingConfig {
    fn validate(&self) -> Result<()> {
        match self.level.as_deref() {
            Some(level) if !LOG_LEVELS.contains(&level) => Err(ErganiError::Config {
                field: "logging.level".to_string(),
                message: format!("expected one of {}", LOG_LEVELS.join(", ")),
            }),
            _ => Ok(()),
        }
    }
}

/// Layout of the TOML configuration file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileConfig {
    pub client: ClientConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl FileConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ErganiError::Config {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR_NAME}` with the variable's value; unknown variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ErganiError::Config {
            field: "toml_parsing".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl Validate for FileConfig {
    fn validate(&self) -> Result<()> {
        self.client.validate()?;
        self.logging.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_minimal_config() {
        let toml_content = r#"
[client]
username = "employer"
password = "secret"
"#;

        let config = FileConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.client.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.client.username, "employer");
        assert_eq!(config.client.timeout_seconds, None);
        assert!(!config.logging.json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("ERGANI_TEST_PASSWORD", "from-env");

        let toml_content = r#"
[client]
base_url = "https://eservices.yeka.gr/WebServicesAPI/api"
username = "employer"
password = "${ERGANI_TEST_PASSWORD}"
timeout_seconds = 30

[logging]
json = true
level = "debug"
"#;

        let config = FileConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.client.password, "from-env");
        assert_eq!(config.client.timeout_seconds, Some(30));
        assert!(config.logging.json);
        assert_eq!(config.logging.level.as_deref(), Some("debug"));
        assert!(config.validate().is_ok());

        std::env::remove_var("ERGANI_TEST_PASSWORD");
    }

    #[test]
    fn test_config_validation() {
        let config = ClientConfig::new("employer", "").with_base_url("invalid-url");
        assert!(config.validate().is_err());

        let config = ClientConfig::new("employer", "").with_base_url("https://example.com");
        assert!(config.validate().is_err());

        let config = ClientConfig::new("employer", "secret").with_timeout(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_log_level_is_rejected() {
        let config = FileConfig::from_toml_str(
            "[client]\nusername = \"employer\"\npassword = \"secret\"\n\n[logging]\nlevel = \"loud\"\n",
        )
        .unwrap();

        match config.validate() {
            Err(ErganiError::Config { field, .. }) => assert_eq!(field, "logging.level"),
            other => panic!("expected config error, got {:?}", other),
        }
    }

    #[test]
    fn test_debug_hides_password() {
        let config = ClientConfig::new("employer", "hunter2");
        assert!(!format!("{:?}", config).contains("hunter2"));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[client]\nusername = \"file-user\"\npassword = \"secret\"\n")
            .unwrap();

        let config = FileConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.client.username, "file-user");
    }

    #[test]
    fn test_invalid_toml() {
        let err = FileConfig::from_toml_str("[client\nusername=").unwrap_err();
        assert!(matches!(err, ErganiError::Config { .. }));
    }
}
