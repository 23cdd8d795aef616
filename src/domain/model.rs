use crate::utils::error::Result;
use crate::utils::validation::{validate_email, validate_min_length, validate_required, Validate};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MIN_PASSWORD_LENGTH: usize = 8;

/// 表單上的欄位（封閉集合）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Username,
    Email,
    Password,
}

impl FormField {
    pub const ALL: [FormField; 3] = [FormField::Username, FormField::Email, FormField::Password];

    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::Username => "username",
            FormField::Email => "email",
            FormField::Password => "password",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 送往 `/api/user/register` 的 payload
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl RegistrationRequest {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    /// 回傳替換單一欄位後的新快照
    pub fn with_field(&self, field: FormField, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        let value = value.into();
        match field {
            FormField::Username => next.username = value,
            FormField::Email => next.email = value,
            FormField::Password => next.password = value,
        }
        next
    }

    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Username => &self.username,
            FormField::Email => &self.email,
            FormField::Password => &self.password,
        }
    }
}

// 密碼不可出現在 log
impl fmt::Debug for RegistrationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"********")
            .finish()
    }
}

impl Validate for RegistrationRequest {
    fn validate(&self) -> Result<()> {
        validate_required(FormField::Username.as_str(), &self.username)?;
        validate_email(FormField::Email.as_str(), &self.email)?;
        validate_min_length(
            FormField::Password.as_str(),
            &self.password,
            MIN_PASSWORD_LENGTH,
        )?;
        Ok(())
    }
}

/// 伺服器回傳的結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    pub busy: bool,
    pub error_message: Option<String>,
}

impl UiState {
    pub fn can_submit(&self) -> bool {
        !self.busy
    }

    pub fn submit_label(&self) -> &'static str {
        if self.busy {
            "Loading..."
        } else {
            "Sign Up"
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitState {
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    SignIn,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::SignIn => "/sign-in",
        }
    }
}

/// 失敗的呈現方式：Rejected 是短暫通知，Transport 是常駐 banner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Rejected,
    Transport,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Registered { token: String },
    Rejected { message: String },
    Failed { message: String },
    Cancelled,
}

impl SubmitOutcome {
    pub fn is_registered(&self) -> bool {
        matches!(self, SubmitOutcome::Registered { .. })
    }
}
