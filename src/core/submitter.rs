use crate::core::teardown::TeardownSignal;
use crate::core::{
    FailureKind, FormField, Navigator, Notifier, RegistrationApi, RegistrationRequest,
    RegistrationResult, Route, Storage, SubmitOutcome, SubmitState, UiState,
};
use crate::session::SessionContext;
use crate::utils::error::{Result, SignupError, GENERIC_FAILURE_MESSAGE};
use crate::utils::validation::Validate;
use std::ops::{Deref, DerefMut};

/// 註冊表單的狀態機
///
/// `Idle → Submitting → Succeeded | Failed`，`Failed` 在下一次編輯或送出時回到 `Idle`。
/// 同一個實例同時最多只有一個請求在進行。
pub struct RegistrationSubmitter<A, S, N, F>
where
    A: RegistrationApi,
    S: Storage,
    N: Navigator,
    F: Notifier,
{
    api: A,
    session: SessionContext<S>,
    navigator: N,
    notifier: F,
    form: RegistrationRequest,
    ui: UiState,
    state: SubmitState,
    teardown: Option<TeardownSignal>,
}

impl<A, S, N, F> RegistrationSubmitter<A, S, N, F>
where
    A: RegistrationApi,
    S: Storage,
    N: Navigator,
    F: Notifier,
{
    pub fn new(api: A, session: SessionContext<S>, navigator: N, notifier: F) -> Self {
        Self {
            api,
            session,
            navigator,
            notifier,
            form: RegistrationRequest::default(),
            ui: UiState::default(),
            state: SubmitState::Idle,
            teardown: None,
        }
    }

    pub fn with_teardown(mut self, signal: TeardownSignal) -> Self {
        self.teardown = Some(signal);
        self
    }

    pub fn form(&self) -> &RegistrationRequest {
        &self.form
    }

    pub fn ui_state(&self) -> &UiState {
        &self.ui
    }

    pub fn state(&self) -> SubmitState {
        self.state
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn notifier(&self) -> &F {
        &self.notifier
    }

    pub fn session(&self) -> &SessionContext<S> {
        &self.session
    }

    /// 替換單一欄位。不做驗證，也不清除 banner。
    pub fn update_field(&mut self, field: FormField, value: impl Into<String>) -> &RegistrationRequest {
        self.form = self.form.with_field(field, value);
        if self.state == SubmitState::Failed {
            self.state = SubmitState::Idle;
        }
        &self.form
    }

    /// 「Have an account? Sign in」連結
    pub fn go_to_sign_in(&self) {
        self.navigator.navigate(Route::SignIn);
    }

    pub async fn submit(&mut self) -> Result<SubmitOutcome> {
        let snapshot = self.form.clone();
        self.submit_snapshot(snapshot).await
    }

    pub async fn submit_snapshot(&mut self, snapshot: RegistrationRequest) -> Result<SubmitOutcome> {
        if self.ui.busy {
            return Err(SignupError::SubmitInProgress);
        }
        if self.teardown.as_ref().is_some_and(|s| s.is_torn_down()) {
            tracing::debug!("Submit ignored after teardown");
            return Ok(SubmitOutcome::Cancelled);
        }
        // 重新送出即離開 Failed，即使這次驗證沒過
        if self.state == SubmitState::Failed {
            self.state = SubmitState::Idle;
        }
        snapshot.validate()?;

        self.ui.busy = true;
        self.ui.error_message = None;
        self.state = SubmitState::Submitting;
        tracing::info!("Submitting registration for '{}'", snapshot.username);

        // future 被中途 drop 時由 guard 清除 busy
        let mut in_flight = InFlight { submitter: self };

        let response = match in_flight.teardown.clone() {
            Some(mut signal) => {
                tokio::select! {
                    response = in_flight.api.register(&snapshot) => Some(response),
                    _ = signal.cancelled() => None,
                }
            }
            None => Some(in_flight.api.register(&snapshot).await),
        };

        let outcome = match response {
            None => {
                tracing::warn!("Registration request abandoned on teardown");
                SubmitOutcome::Cancelled
            }
            Some(Ok(result)) => in_flight.handle_result(result).await,
            Some(Err(e)) => in_flight.fail_transport(&e),
        };

        drop(in_flight);
        Ok(outcome)
    }

    async fn handle_result(&mut self, result: RegistrationResult) -> SubmitOutcome {
        if !result.success {
            let message = result
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string());
            tracing::warn!("Registration rejected: {}", message);
            self.notifier.present_failure(FailureKind::Rejected, &message);
            self.state = SubmitState::Failed;
            return SubmitOutcome::Rejected { message };
        }

        let Some(token) = result.token else {
            return self.fail_transport(&SignupError::MalformedResponse {
                message: "success response without a token".to_string(),
            });
        };

        if let Err(e) = self.session.set_token(&token).await {
            return self.fail_transport(&e);
        }

        tracing::info!("Registration succeeded, navigating to {}", Route::Home.path());
        self.state = SubmitState::Succeeded;
        self.navigator.navigate(Route::Home);
        SubmitOutcome::Registered { token }
    }

    fn fail_transport(&mut self, error: &SignupError) -> SubmitOutcome {
        let message = error.user_friendly_message();
        let message = if message.trim().is_empty() {
            GENERIC_FAILURE_MESSAGE.to_string()
        } else {
            message
        };
        tracing::warn!("Registration failed: {}", error);

        self.ui.error_message = Some(message.clone());
        self.notifier.present_failure(FailureKind::Transport, &message);
        self.state = SubmitState::Failed;
        SubmitOutcome::Failed { message }
    }
}

/// 送出期間持有 submitter；結束或被 drop 時 busy 歸零，
/// 仍停在 `Submitting` 的狀態回到 `Idle`
struct InFlight<'a, A, S, N, F>
where
    A: RegistrationApi,
    S: Storage,
    N: Navigator,
    F: Notifier,
{
    submitter: &'a mut RegistrationSubmitter<A, S, N, F>,
}

impl<A, S, N, F> Deref for InFlight<'_, A, S, N, F>
where
    A: RegistrationApi,
    S: Storage,
    N: Navigator,
    F: Notifier,
{
    type Target = RegistrationSubmitter<A, S, N, F>;

    fn deref(&self) -> &Self::Target {
        self.submitter
    }
}

impl<A, S, N, F> DerefMut for InFlight<'_, A, S, N, F>
where
    A: RegistrationApi,
    S: Storage,
    N: Navigator,
    F: Notifier,
{
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.submitter
    }
}

impl<A, S, N, F> Drop for InFlight<'_, A, S, N, F>
where
    A: RegistrationApi,
    S: Storage,
    N: Navigator,
    F: Notifier,
{
    fn drop(&mut self) {
        self.submitter.ui.busy = false;
        if self.submitter.state == SubmitState::Submitting {
            self.submitter.state = SubmitState::Idle;
        }
    }
}
