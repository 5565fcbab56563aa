use std::fmt;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Success,
    Warning,
    Error,
}

/// Short-lived message shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: Level,
    pub message: String,
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let icon = match self.level {
            Level::Info => "ℹ️ ",
            Level::Success => "✅",
            Level::Warning => "⚠️ ",
            Level::Error => "❌",
        };
        write!(f, "{} {}", icon, self.message)
    }
}

/// Sending half of the toast queue. Cheap to clone.
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: mpsc::UnboundedSender<Notification>,
}

/// Receiving half, drained by whoever renders the toasts
pub type Toasts = mpsc::UnboundedReceiver<Notification>;

impl Notifier {
    pub fn channel() -> (Self, Toasts) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn info(&self, message: impl Into<String>) {
        self.push(Level::Info, message.into());
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(Level::Success, message.into());
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.push(Level::Warning, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(Level::Error, message.into());
    }

    fn push(&self, level: Level, message: String) {
        match level {
            Level::Warning => warn!("{}", message),
            Level::Error => error!("{}", message),
            _ => info!("{}", message),
        }
        // Nobody rendering toasts is not an error.
        let _ = self.tx.send(Notification { level, message });
    }
}

/// Everything queued so far, without waiting
pub fn drain(toasts: &mut Toasts) -> Vec<Notification> {
    let mut out = Vec::new();
    while let Ok(notification) = toasts.try_recv() {
        out.push(notification);
    }
    out
}
