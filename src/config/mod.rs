pub mod cli;
pub mod toml_config;

use crate::core::http_api::{DEFAULT_BASE_URL, DEFAULT_REGISTER_PATH};
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::core::FormField;
use crate::session::DEFAULT_SESSION_FILE;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_route_path, validate_url, Validate};
use toml_config::{TomlConfig, DEFAULT_SESSION_DIR};

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "signup")]
#[command(about = "Register a user account against the registration API")]
pub struct CliConfig {
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    #[arg(long, default_value = DEFAULT_REGISTER_PATH)]
    pub register_path: String,

    #[arg(long, default_value = DEFAULT_SESSION_DIR)]
    pub session_dir: String,

    #[arg(long, help = "TOML config file; its values replace the defaults above")]
    pub config: Option<String>,

    #[arg(long)]
    pub username: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long, env = "SIGNUP_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    #[arg(long, help = "Clear the stored session token and exit")]
    pub logout: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

/// 最終生效的 client 設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub base_url: String,
    pub register_path: String,
    pub session_dir: String,
    pub session_file: String,
    pub log_level: Option<String>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            register_path: DEFAULT_REGISTER_PATH.to_string(),
            session_dir: DEFAULT_SESSION_DIR.to_string(),
            session_file: DEFAULT_SESSION_FILE.to_string(),
            log_level: None,
        }
    }
}

impl From<&TomlConfig> for ClientSettings {
    fn from(config: &TomlConfig) -> Self {
        Self {
            base_url: config.base_url().to_string(),
            register_path: config.register_path().to_string(),
            session_dir: config.session_dir().to_string(),
            session_file: config.session_file().to_string(),
            log_level: config.log_level().map(str::to_string),
        }
    }
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 有 `--config` 時以 TOML 為準，否則使用命令列參數
    pub fn settings(&self) -> Result<ClientSettings> {
        let settings = match &self.config {
            Some(path) => {
                tracing::debug!("Loading config file: {}", path);
                let file_config = TomlConfig::from_file(path)?;
                file_config.validate()?;
                ClientSettings::from(&file_config)
            }
            None => ClientSettings {
                base_url: self.base_url.clone(),
                register_path: self.register_path.clone(),
                session_dir: self.session_dir.clone(),
                session_file: DEFAULT_SESSION_FILE.to_string(),
                log_level: None,
            },
        };
        settings.validate()?;
        Ok(settings)
    }

    /// 命令列上對應表單欄位的值
    pub fn field_value(&self, field: FormField) -> Option<&str> {
        match field {
            FormField::Username => self.username.as_deref(),
            FormField::Email => self.email.as_deref(),
            FormField::Password => self.password.as_deref(),
        }
    }
}

impl ConfigProvider for ClientSettings {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn register_path(&self) -> &str {
        &self.register_path
    }

    fn session_dir(&self) -> &str {
        &self.session_dir
    }

    fn session_file(&self) -> &str {
        &self.session_file
    }
}

impl Validate for ClientSettings {
    fn validate(&self) -> Result<()> {
        validate_url("base_url", &self.base_url)?;
        validate_route_path("register_path", &self.register_path)?;
        validate_path("session_dir", &self.session_dir)?;
        validate_path("session_file", &self.session_file)?;
        Ok(())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_cli_defaults() {
        let cli = CliConfig::parse_from(["signup"]);
        let settings = cli.settings().unwrap();
        assert_eq!(settings, ClientSettings::default());
    }

    #[test]
    fn test_cli_overrides() {
        let cli = CliConfig::parse_from([
            "signup",
            "--base-url",
            "https://auth.example.com/",
            "--session-dir",
            "/tmp/session",
            "--username",
            "alice",
        ]);
        let settings = cli.settings().unwrap();
        assert_eq!(settings.base_url, "https://auth.example.com/");
        assert_eq!(settings.session_dir, "/tmp/session");
        assert_eq!(cli.username.as_deref(), Some("alice"));
    }

    #[test]
    fn test_config_file_replaces_cli_values() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[client]\nbase_url = \"http://localhost:7000\"\n[logging]\nlevel = \"warn\""
        )
        .unwrap();

        let cli = CliConfig::parse_from([
            "signup",
            "--base-url",
            "http://ignored:1",
            "--config",
            file.path().to_str().unwrap(),
        ]);
        let settings = cli.settings().unwrap();
        assert_eq!(settings.base_url, "http://localhost:7000");
        assert_eq!(settings.log_level.as_deref(), Some("warn"));
    }

    #[test]
    fn test_config_file_with_unknown_log_level_is_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[client]\n[logging]\nlevel = \"loud\"").unwrap();

        let cli = CliConfig::parse_from(["signup", "--config", file.path().to_str().unwrap()]);
        let err = cli.settings().unwrap_err();

        assert!(matches!(
            err,
            crate::utils::error::SignupError::InvalidConfigValueError { ref field, .. }
                if field == "logging.level"
        ));
    }

    #[test]
    fn test_field_value_maps_form_fields() {
        let cli = CliConfig::parse_from([
            "signup",
            "--username",
            "alice",
            "--email",
            "alice@example.com",
        ]);
        assert_eq!(cli.field_value(FormField::Username), Some("alice"));
        assert_eq!(cli.field_value(FormField::Email), Some("alice@example.com"));
        assert_eq!(cli.field_value(FormField::Password), cli.password.as_deref());
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let cli = CliConfig::parse_from(["signup", "--base-url", "localhost:5000"]);
        assert!(cli.settings().is_err());
    }
}
