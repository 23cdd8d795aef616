use crate::domain::model::{FailureKind, RegistrationRequest, RegistrationResult, Route};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn remove_file(&self, path: &str) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn register_path(&self) -> &str;
    fn session_dir(&self) -> &str;
    fn session_file(&self) -> &str;
}

/// 註冊 API 的呼叫端
#[async_trait]
pub trait RegistrationApi: Send + Sync {
    async fn register(&self, request: &RegistrationRequest) -> Result<RegistrationResult>;
}

pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// 所有使用者可見的失敗都經過這裡
pub trait Notifier: Send + Sync {
    fn present_failure(&self, kind: FailureKind, message: &str);
}

impl<T: Navigator + ?Sized> Navigator for std::sync::Arc<T> {
    fn navigate(&self, route: Route) {
        (**self).navigate(route)
    }
}

impl<T: Notifier + ?Sized> Notifier for std::sync::Arc<T> {
    fn present_failure(&self, kind: FailureKind, message: &str) {
        (**self).present_failure(kind, message)
    }
}
