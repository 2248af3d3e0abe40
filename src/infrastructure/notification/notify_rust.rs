//! Desktop toast adapter using notify-rust
//!
//! Works on Windows, macOS, and Linux.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::application::ports::{NotificationError, NotificationIcon, ToastFactory, ToastFn};
use crate::domain::config::DEFAULT_APP_NAME;
use crate::domain::style::ToastStyle;

use super::toast_title;

/// Desktop toasts via notify-rust
pub struct NotifyRustToasts {
    /// Application name for notifications
    app_name: String,
}

impl NotifyRustToasts {
    /// Create with the default app name
    pub fn new() -> Self {
        Self::with_app_name(DEFAULT_APP_NAME)
    }

    /// Create with custom app name
    pub fn with_app_name(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
        }
    }
}

impl Default for NotifyRustToasts {
    fn default() -> Self {
        Self::new()
    }
}

fn show(
    app_name: &str,
    title: &str,
    body: &str,
    icon: NotificationIcon,
) -> Result<(), NotificationError> {
    notify_rust::Notification::new()
        .appname(app_name)
        .summary(title)
        .body(body)
        .icon(icon.icon_name())
        .show()
        .map_err(|e| NotificationError::SendFailed(e.to_string()))?;
    Ok(())
}

impl ToastFactory for NotifyRustToasts {
    fn spawn(&self, style: &ToastStyle) -> ToastFn {
        let app_name = self.app_name.clone();
        let title = toast_title(style);
        let icon = NotificationIcon::for_style(style);
        let class = style.addn_cls().to_string();

        Arc::new(move |body: &str| {
            debug!(style = %class, "showing toast");
            let app_name = app_name.clone();
            let title = title.clone();
            let body = body.to_owned();

            // notify-rust can block on the session bus
            match tokio::runtime::Handle::try_current() {
                Ok(handle) => {
                    handle.spawn_blocking(move || {
                        if let Err(e) = show(&app_name, &title, &body, icon) {
                            warn!(error = %e, "toast failed");
                        }
                    });
                }
                Err(_) => {
                    if let Err(e) = show(&app_name, &title, &body, icon) {
                        warn!(error = %e, "toast failed");
                    }
                }
            }
        })
    }
}
