use crate::core::{ConfigProvider, RegistrationApi, RegistrationRequest, RegistrationResult};
use crate::utils::error::{Result, SignupError};
use reqwest::header::ACCEPT;
use reqwest::Client;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_REGISTER_PATH: &str = "/api/user/register";

/// 透過 HTTP 呼叫註冊服務
#[derive(Debug, Clone)]
pub struct HttpRegistrationApi {
    client: Client,
    endpoint: String,
}

impl HttpRegistrationApi {
    pub fn new(base_url: &str, register_path: &str) -> Self {
        Self::with_client(Client::new(), base_url, register_path)
    }

    pub fn with_client(client: Client, base_url: &str, register_path: &str) -> Self {
        Self {
            client,
            endpoint: join_endpoint(base_url, register_path),
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self::new(config.base_url(), config.register_path())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn join_endpoint(base_url: &str, path: &str) -> String {
    let base = base_url.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}

#[async_trait::async_trait]
impl RegistrationApi for HttpRegistrationApi {
    async fn register(&self, request: &RegistrationRequest) -> Result<RegistrationResult> {
        tracing::debug!(
            "POST {} for username '{}'",
            self.endpoint,
            request.username
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header(ACCEPT, "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Registration response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!("Registration error body: {}", body);
            return Err(SignupError::HttpStatusError {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice::<RegistrationResult>(&bytes).map_err(|e| {
            SignupError::MalformedResponse {
                message: e.to_string(),
            }
        })
    }
}
