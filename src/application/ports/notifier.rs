//! Toast display port interface

use std::sync::Arc;

use thiserror::Error;

use crate::domain::style::ToastStyle;

/// Notification errors
#[derive(Debug, Clone, Error)]
pub enum NotificationError {
    #[error("notify-send not found")]
    NotifySendNotFound,

    #[error("Failed to show notification: {0}")]
    SendFailed(String),
}

/// Notification icon types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationIcon {
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationIcon {
    /// Pick the icon for a toast style from its suffix
    pub fn for_style(style: &ToastStyle) -> Self {
        match style.suffix() {
            "error" => Self::Error,
            "success" => Self::Success,
            "warning" | "warn" => Self::Warning,
            _ => Self::Info,
        }
    }

    /// Get the freedesktop icon name
    pub const fn icon_name(&self) -> &'static str {
        match self {
            Self::Info => "dialog-information",
            Self::Success => "dialog-ok",
            Self::Warning => "dialog-warning",
            Self::Error => "dialog-error",
        }
    }
}

/// A display-invocation callable: shows one toast for a message body
pub type ToastFn = Arc<dyn Fn(&str) + Send + Sync>;

/// Port for the toast display engine
pub trait ToastFactory: Send + Sync {
    /// Create a callable that shows toasts with the given style.
    ///
    /// Calling it must not block; failures are the adapter's to report.
    fn spawn(&self, style: &ToastStyle) -> ToastFn;
}
