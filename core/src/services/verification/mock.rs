//! Recording notifier used by service and route tests

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::{Mutex, Notify};

use crate::domain::value_objects::Purpose;

use super::traits::NotifierTrait;

/// How the mock answers delivery attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockBehavior {
    /// Record the code and succeed
    Deliver,
    /// Fail immediately
    Fail,
    /// Sleep for the given duration before succeeding
    Hang(Duration),
}

/// A code the mock accepted for delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentCode {
    pub address: String,
    pub code: String,
    pub purpose: Purpose,
}

/// Mock notifier for testing
pub struct MockNotifier {
    behavior: MockBehavior,
    sent: Mutex<Vec<SentCode>>,
    attempts: AtomicUsize,
    notify: Notify,
}

impl MockNotifier {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            sent: Mutex::new(Vec::new()),
            attempts: AtomicUsize::new(0),
            notify: Notify::new(),
        }
    }

    pub fn delivering() -> Self {
        Self::new(MockBehavior::Deliver)
    }

    pub fn failing() -> Self {
        Self::new(MockBehavior::Fail)
    }

    pub fn hanging(duration: Duration) -> Self {
        Self::new(MockBehavior::Hang(duration))
    }

    /// Delivery attempts started so far, successful or not
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    pub async fn sent(&self) -> Vec<SentCode> {
        self.sent.lock().await.clone()
    }

    /// Most recent code delivered to an address
    pub async fn last_code_for(&self, address: &str) -> Option<String> {
        self.sent
            .lock()
            .await
            .iter()
            .rev()
            .find(|sent| sent.address == address)
            .map(|sent| sent.code.clone())
    }

    /// Wait until at least `count` delivery attempts have started.
    ///
    /// Returns `false` if the timeout elapses first.
    pub async fn wait_for_attempts(&self, count: usize, timeout: Duration) -> bool {
        tokio::time::timeout(timeout, async {
            loop {
                let notified = self.notify.notified();
                if self.attempts() >= count {
                    return;
                }
                notified.await;
            }
        })
        .await
        .is_ok()
    }

    /// Wait for the next delivered code for an address beyond the first `already_seen`
    pub async fn wait_for_code(
        &self,
        address: &str,
        already_seen: usize,
        timeout: Duration,
    ) -> Option<String> {
        tokio::time::timeout(timeout, async {
            loop {
                let notified = self.notify.notified();
                {
                    let sent = self.sent.lock().await;
                    let mut for_address = sent.iter().filter(|sent| sent.address == address);
                    if let Some(found) = for_address.nth(already_seen) {
                        return found.code.clone();
                    }
                }
                notified.await;
            }
        })
        .await
        .ok()
    }
}

impl Default for MockNotifier {
    fn default() -> Self {
        Self::delivering()
    }
}

#[async_trait]
impl NotifierTrait for MockNotifier {
    async fn send_code(
        &self,
        address: &str,
        code: &str,
        purpose: Purpose,
    ) -> Result<String, String> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;

        let result = match self.behavior {
            MockBehavior::Fail => Err(String::from("mock delivery failure")),
            MockBehavior::Hang(duration) => {
                self.notify.notify_waiters();
                tokio::time::sleep(duration).await;
                Ok(format!("mock-msg-{}", attempt))
            }
            MockBehavior::Deliver => {
                self.sent.lock().await.push(SentCode {
                    address: address.to_string(),
                    code: code.to_string(),
                    purpose,
                });
                Ok(format!("mock-msg-{}", attempt))
            }
        };

        self.notify.notify_waiters();
        result
    }
}
