use crate::core::http_api::{DEFAULT_BASE_URL, DEFAULT_REGISTER_PATH};
use crate::core::ConfigProvider;
use crate::session::DEFAULT_SESSION_FILE;
use crate::utils::error::{Result, SignupError};
use crate::utils::validation::{validate_path, validate_route_path, validate_url, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_SESSION_DIR: &str = "./.signup";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub client: ClientConfig,
    pub session: Option<SessionConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    pub base_url: Option<String>,
    pub register_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub dir: Option<String>,
    pub file: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SignupError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SignupError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SIGNUP_BASE_URL})；未設定的保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SignupError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }
}

impl ConfigProvider for TomlConfig {
    fn base_url(&self) -> &str {
        self.client.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    fn register_path(&self) -> &str {
        self.client
            .register_path
            .as_deref()
            .unwrap_or(DEFAULT_REGISTER_PATH)
    }

    fn session_dir(&self) -> &str {
        self.session
            .as_ref()
            .and_then(|s| s.dir.as_deref())
            .unwrap_or(DEFAULT_SESSION_DIR)
    }

    fn session_file(&self) -> &str {
        self.session
            .as_ref()
            .and_then(|s| s.file.as_deref())
            .unwrap_or(DEFAULT_SESSION_FILE)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_url("client.base_url", self.base_url())?;
        validate_route_path("client.register_path", self.register_path())?;
        validate_path("session.dir", self.session_dir())?;
        validate_path("session.file", self.session_file())?;

        if let Some(level) = self.log_level() {
            let valid_levels = ["trace", "debug", "info", "warn", "error"];
            if !valid_levels.contains(&level) {
                return Err(SignupError::InvalidConfigValueError {
                    field: "logging.level".to_string(),
                    value: level.to_string(),
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
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[client]
base_url = "https://auth.example.com"
register_path = "/v2/register"

[session]
dir = "/tmp/signup"
file = "token.json"

[logging]
level = "debug"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.base_url(), "https://auth.example.com");
        assert_eq!(config.register_path(), "/v2/register");
        assert_eq!(config.session_dir(), "/tmp/signup");
        assert_eq!(config.session_file(), "token.json");
        assert_eq!(config.log_level(), Some("debug"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults_for_missing_values() {
        let config = TomlConfig::from_toml_str("[client]\n").unwrap();
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.register_path(), DEFAULT_REGISTER_PATH);
        assert_eq!(config.session_dir(), DEFAULT_SESSION_DIR);
        assert_eq!(config.session_file(), DEFAULT_SESSION_FILE);
        assert_eq!(config.log_level(), None);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("SIGNUP_TEST_BASE_URL", "http://10.0.0.5:5000");
        let config =
            TomlConfig::from_toml_str("[client]\nbase_url = \"${SIGNUP_TEST_BASE_URL}\"\n").unwrap();
        assert_eq!(config.base_url(), "http://10.0.0.5:5000");
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let bad_url = TomlConfig::from_toml_str("[client]\nbase_url = \"ftp://host\"\n").unwrap();
        assert!(bad_url.validate().is_err());

        let bad_path = TomlConfig::from_toml_str("[client]\nregister_path = \"register\"\n").unwrap();
        assert!(bad_path.validate().is_err());

        let bad_level =
            TomlConfig::from_toml_str("[client]\n[logging]\nlevel = \"loud\"\n").unwrap();
        assert!(bad_level.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_a_config_error() {
        let err = TomlConfig::from_toml_str("[client\nbase_url = 1").unwrap_err();
        assert!(matches!(err, SignupError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[client]\nbase_url = \"http://localhost:5001\"").unwrap();

        let config = TomlConfig::from_file(file.path()).unwrap();
        assert_eq!(config.base_url(), "http://localhost:5001");
    }
}
