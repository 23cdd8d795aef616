//! Session context: 保存註冊成功後拿到的 token。
//!
//! `SessionContext` 是明確注入的物件，生命週期為
//! `restore`（啟動時讀回）→ `set_token` / `clear_token` → `teardown`。
//! Clone 共用同一份狀態，最後寫入者為準。

use crate::domain::ports::Storage;
use crate::utils::error::{Result, SignupError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;

pub const DEFAULT_SESSION_FILE: &str = "session.json";

/// 寫入 storage 的格式
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    pub token: String,
    pub saved_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct SessionState {
    token: Option<String>,
    closed: bool,
}

pub struct SessionContext<S: Storage> {
    storage: Arc<S>,
    file: String,
    state: Arc<RwLock<SessionState>>,
}

impl<S: Storage> Clone for SessionContext<S> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            file: self.file.clone(),
            state: Arc::clone(&self.state),
        }
    }
}

impl<S: Storage> SessionContext<S> {
    /// 空的 session，不讀取 storage
    pub fn new(storage: S, file: impl Into<String>) -> Self {
        Self {
            storage: Arc::new(storage),
            file: file.into(),
            state: Arc::new(RwLock::new(SessionState::default())),
        }
    }

    /// 從 storage 讀回之前存的 token
    pub async fn restore(storage: S, file: impl Into<String>) -> Result<Self> {
        let context = Self::new(storage, file);
        let restored = context.load().await?;
        if let Some(stored) = restored {
            tracing::info!("Restored session saved at {}", stored.saved_at);
            context.state.write().await.token = Some(stored.token);
        }
        Ok(context)
    }

    async fn load(&self) -> Result<Option<StoredSession>> {
        let data = match self.storage.read_file(&self.file).await {
            Ok(data) => data,
            Err(SignupError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No stored session at '{}'", self.file);
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        match serde_json::from_slice::<StoredSession>(&data) {
            Ok(stored) => Ok(Some(stored)),
            Err(e) => {
                tracing::warn!("Ignoring unreadable session file '{}': {}", self.file, e);
                Ok(None)
            }
        }
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub async fn token(&self) -> Option<String> {
        self.state.read().await.token.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.token.is_some()
    }

    pub async fn is_closed(&self) -> bool {
        self.state.read().await.closed
    }

    pub async fn set_token(&self, token: &str) -> Result<()> {
        let mut state = self.state.write().await;
        if state.closed {
            return Err(SignupError::SessionClosed);
        }

        let stored = StoredSession {
            token: token.to_string(),
            saved_at: Utc::now(),
        };
        let data = serde_json::to_vec_pretty(&stored)?;
        self.storage.write_file(&self.file, &data).await?;

        state.token = Some(stored.token);
        tracing::debug!("Session token stored in '{}'", self.file);
        Ok(())
    }

    pub async fn clear_token(&self) -> Result<()> {
        let mut state = self.state.write().await;
        if state.closed {
            return Err(SignupError::SessionClosed);
        }

        self.storage.remove_file(&self.file).await?;
        state.token = None;
        tracing::debug!("Session token cleared");
        Ok(())
    }

    /// 之後的寫入都會被拒絕；已存的 token 保留在 storage
    pub async fn teardown(&self) {
        let mut state = self.state.write().await;
        state.closed = true;
        state.token = None;
    }
}
