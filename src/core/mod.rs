pub mod http_api;
pub mod submitter;
pub mod teardown;

pub use crate::domain::model::{
    FailureKind, FormField, RegistrationRequest, RegistrationResult, Route, SubmitOutcome,
    SubmitState, UiState,
};
pub use crate::domain::ports::{ConfigProvider, Navigator, Notifier, RegistrationApi, Storage};
pub use crate::utils::error::Result;
