use thiserror::Error;

/// 註冊流程會用到的預設錯誤訊息
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong";

#[derive(Error, Debug)]
pub enum SignupError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Server responded with status {status}: {body}")]
    HttpStatusError { status: u16, body: String },

    #[error("Malformed registration response: {message}")]
    MalformedResponse { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid {field}: {reason}")]
    ValidationError { field: String, reason: String },

    #[error("A registration request is already in flight")]
    SubmitInProgress,

    #[error("Session context has been torn down")]
    SessionClosed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Protocol,
    Storage,
    Configuration,
    Input,
    State,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SignupError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SignupError::HttpError(_) => ErrorCategory::Network,
            SignupError::HttpStatusError { .. } | SignupError::MalformedResponse { .. } => {
                ErrorCategory::Protocol
            }
            SignupError::IoError(_) | SignupError::SerializationError(_) => ErrorCategory::Storage,
            SignupError::ConfigError { .. }
            | SignupError::ConfigValidationError { .. }
            | SignupError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            SignupError::ValidationError { .. } => ErrorCategory::Input,
            SignupError::SubmitInProgress | SignupError::SessionClosed => ErrorCategory::State,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::State => ErrorSeverity::Low,
            ErrorCategory::Network | ErrorCategory::Protocol => ErrorSeverity::Medium,
            ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Storage | ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    /// 使用者可以直接重新送出的錯誤
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Network | ErrorCategory::Protocol | ErrorCategory::State
        )
    }

    /// 給畫面（banner）顯示的訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            SignupError::HttpError(e) => {
                let text = e.to_string();
                if text.trim().is_empty() {
                    GENERIC_FAILURE_MESSAGE.to_string()
                } else {
                    format!("Network error: {}", text)
                }
            }
            SignupError::HttpStatusError { status, .. } => {
                format!("Request failed with status code {}", status)
            }
            SignupError::MalformedResponse { .. } => {
                "The server sent a response that could not be understood".to_string()
            }
            SignupError::ValidationError { field, reason } => {
                format!("Please check the {} field: {}", field, reason)
            }
            SignupError::SubmitInProgress => "Registration is already in progress".to_string(),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check that the registration server is reachable and try again",
            ErrorCategory::Protocol => "The server may be misconfigured; try again later",
            ErrorCategory::Storage => "Check permissions on the session directory",
            ErrorCategory::Configuration => "Fix the configuration value and rerun",
            ErrorCategory::Input => "Correct the highlighted field and submit again",
            ErrorCategory::State => "Wait for the current request to finish",
        }
    }
}

pub type Result<T> = std::result::Result<T, SignupError>;
