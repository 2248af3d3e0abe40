//! notify-send toast adapter

use std::process::Stdio;
use std::sync::Arc;

use tokio::process::Command;
use tracing::warn;

use crate::application::ports::{NotificationError, NotificationIcon, ToastFactory, ToastFn};
use crate::domain::config::DEFAULT_APP_NAME;
use crate::domain::style::ToastStyle;

use super::toast_title;

/// Desktop toasts via the `notify-send` command
pub struct NotifySendToasts {
    /// Application name for notifications
    app_name: String,
}

impl NotifySendToasts {
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

impl Default for NotifySendToasts {
    fn default() -> Self {
        Self::new()
    }
}

/// Command line for one toast. `--` keeps a dash-leading body out of option parsing.
fn notify_send_args<'a>(
    app_name: &'a str,
    category: &'a str,
    title: &'a str,
    body: &'a str,
    icon: NotificationIcon,
) -> Vec<&'a str> {
    vec![
        "--app-name",
        app_name,
        "--icon",
        icon.icon_name(),
        "--category",
        category,
        "--",
        title,
        body,
    ]
}

async fn notify_send(
    app_name: &str,
    category: &str,
    title: &str,
    body: &str,
    icon: NotificationIcon,
) -> Result<(), NotificationError> {
    let status = Command::new("notify-send")
        .args(notify_send_args(app_name, category, title, body, icon))
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                NotificationError::NotifySendNotFound
            } else {
                NotificationError::SendFailed(e.to_string())
            }
        })?;

    if !status.success() {
        return Err(NotificationError::SendFailed(format!(
            "notify-send exited with status: {}",
            status
        )));
    }

    Ok(())
}

impl ToastFactory for NotifySendToasts {
    fn spawn(&self, style: &ToastStyle) -> ToastFn {
        let app_name = self.app_name.clone();
        let title = toast_title(style);
        let icon = NotificationIcon::for_style(style);
        let category = style.suffix().to_string();

        Arc::new(move |body: &str| {
            let Ok(handle) = tokio::runtime::Handle::try_current() else {
                warn!("notify-send toasts need a tokio runtime; toast dropped");
                return;
            };
            let app_name = app_name.clone();
            let category = category.clone();
            let title = title.clone();
            let body = body.to_owned();
            handle.spawn(async move {
                if let Err(e) = notify_send(&app_name, &category, &title, &body, icon).await {
                    warn!(error = %e, "toast failed");
                }
            });
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toasts_default_app_name() {
        assert_eq!(NotifySendToasts::new().app_name, "Pushflash");
    }

    #[test]
    fn dash_leading_body_is_not_an_option() {
        let args = notify_send_args("Pushflash", "info", "Info", "--help", NotificationIcon::Info);
        assert_eq!(&args[args.len() - 3..], ["--", "Info", "--help"]);
        assert_eq!(args.iter().filter(|a| **a == "--help").count(), 1);
    }

    #[test]
    fn toast_without_runtime_is_dropped() {
        let toasts = NotifySendToasts::new();
        let toast = toasts.spawn(&ToastStyle::new("humane-jackedup", "info"));
        // Must return without panicking
        toast("hello");
    }
}
