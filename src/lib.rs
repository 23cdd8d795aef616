pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod session;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{cli::LocalStorage, toml_config::TomlConfig, ClientSettings};
pub use crate::core::{
    http_api::HttpRegistrationApi,
    submitter::RegistrationSubmitter,
    teardown::{Teardown, TeardownSignal},
};
pub use domain::model::{
    FailureKind, FormField, RegistrationRequest, RegistrationResult, Route, SubmitOutcome,
    SubmitState, UiState,
};
pub use session::SessionContext;
pub use utils::error::{Result, SignupError};
