//! Toast notifications, injected into the form flow.

use serde::Serialize;
use std::sync::Mutex;
use tracing::{info, warn};

pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Writes toasts to the log only.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, message: &str) {
        info!(toast = "success", "{}", message);
    }

    fn error(&self, message: &str) {
        warn!(toast = "error", "{}", message);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Collects toasts so a response (or a test) can hand them to the client.
#[derive(Debug, Default)]
pub struct FlashNotifier {
    toasts: Mutex<Vec<Toast>>,
}

impl FlashNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, level: ToastLevel, message: &str) {
        self.toasts
            .lock()
            .expect("Toast buffer lock poisoned")
            .push(Toast {
                level,
                message: message.to_string(),
                timestamp: chrono::Utc::now(),
            });
    }

    /// Snapshot of the collected toasts.
    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts
            .lock()
            .expect("Toast buffer lock poisoned")
            .clone()
    }

    /// Drains the collected toasts.
    pub fn take(&self) -> Vec<Toast> {
        std::mem::take(&mut *self.toasts.lock().expect("Toast buffer lock poisoned"))
    }
}

impl Notifier for FlashNotifier {
    fn success(&self, message: &str) {
        TracingNotifier.success(message);
        self.push(ToastLevel::Success, message);
    }

    fn error(&self, message: &str) {
        TracingNotifier.error(message);
        self.push(ToastLevel::Error, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flash_notifier_collects_in_order() {
        let notifier = FlashNotifier::new();
        notifier.success("Jurusan berhasil ditambahkan");
        notifier.error("Gagal memperbarui Kelas");

        let toasts = notifier.toasts();
        assert_eq!(toasts.len(), 2);
        assert_eq!(toasts[0].level, ToastLevel::Success);
        assert_eq!(toasts[1].message, "Gagal memperbarui Kelas");

        assert_eq!(notifier.take().len(), 2);
        assert!(notifier.toasts().is_empty());
    }
}
