use crate::core::{FailureKind, Navigator, Notifier, Route};
use std::sync::Mutex;

/// 把失敗訊息輸出到 stderr
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn present_failure(&self, kind: FailureKind, message: &str) {
        match kind {
            FailureKind::Rejected => {
                tracing::warn!("Registration rejected: {}", message);
                eprintln!("⚠️  {}", message);
            }
            FailureKind::Transport => {
                tracing::error!("Registration failed: {}", message);
                eprintln!("❌ {}", message);
            }
        }
    }
}

/// 終端機沒有真正的路由，只記錄目前位置
#[derive(Debug, Default)]
pub struct TerminalNavigator {
    current: Mutex<Option<Route>>,
}

impl TerminalNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<Route> {
        self.current.lock().ok().and_then(|route| *route)
    }
}

impl Navigator for TerminalNavigator {
    fn navigate(&self, route: Route) {
        tracing::info!("Navigating to {}", route.path());
        if let Ok(mut current) = self.current.lock() {
            *current = Some(route);
        }
    }
}
