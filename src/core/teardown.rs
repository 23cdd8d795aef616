use tokio::sync::watch;

/// 元件的擁有者持有；觸發或 drop 時通知所有 `TeardownSignal`
#[derive(Debug)]
pub struct Teardown {
    sender: watch::Sender<bool>,
}

#[derive(Debug, Clone)]
pub struct TeardownSignal {
    receiver: watch::Receiver<bool>,
}

impl Teardown {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(false);
        Self { sender }
    }

    pub fn signal(&self) -> TeardownSignal {
        TeardownSignal {
            receiver: self.sender.subscribe(),
        }
    }

    pub fn trigger(&self) {
        tracing::debug!("Component teardown requested");
        self.sender.send_replace(true);
    }
}

impl Default for Teardown {
    fn default() -> Self {
        Self::new()
    }
}

impl TeardownSignal {
    pub fn is_torn_down(&self) -> bool {
        *self.receiver.borrow() || self.receiver.has_changed().is_err()
    }

    /// 等到 teardown 發生才返回
    pub async fn cancelled(&mut self) {
        loop {
            if *self.receiver.borrow_and_update() {
                return;
            }
            if self.receiver.changed().await.is_err() {
                return;
            }
        }
    }
}
