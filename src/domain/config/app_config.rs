//! Application configuration value object

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::style::{ToastBackend, DEFAULT_BASE_CLASS};

/// Default server the subscriber connects to
pub const DEFAULT_URL: &str = "http://localhost:3000";

/// Default transport namespace
pub const DEFAULT_NAMESPACE: &str = "notifications";

/// Default application name shown on desktop notifications
pub const DEFAULT_APP_NAME: &str = "Pushflash";

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub url: Option<String>,
    pub channel: Option<String>,
    pub namespace: Option<String>,
    pub base_class: Option<String>,
    pub toasts: Option<String>,
    pub app_name: Option<String>,
    pub themes_dir: Option<String>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            url: Some(DEFAULT_URL.to_string()),
            channel: None,
            namespace: Some(DEFAULT_NAMESPACE.to_string()),
            base_class: Some(DEFAULT_BASE_CLASS.to_string()),
            toasts: Some(ToastBackend::default().to_string()),
            app_name: Some(DEFAULT_APP_NAME.to_string()),
            themes_dir: None,
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            url: other.url.or(self.url),
            channel: other.channel.or(self.channel),
            namespace: other.namespace.or(self.namespace),
            base_class: other.base_class.or(self.base_class),
            toasts: other.toasts.or(self.toasts),
            app_name: other.app_name.or(self.app_name),
            themes_dir: other.themes_dir.or(self.themes_dir),
        }
    }

    /// Get url, or the local default
    pub fn url_or_default(&self) -> &str {
        self.url.as_deref().unwrap_or(DEFAULT_URL)
    }

    /// Get namespace, or "notifications" if not set or empty
    pub fn namespace_or_default(&self) -> &str {
        self.namespace
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_NAMESPACE)
    }

    /// Get base class, or "humane-jackedup" if not set or empty
    pub fn base_class_or_default(&self) -> &str {
        self.base_class
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_BASE_CLASS)
    }

    /// Get toast backend as parsed value, or default if not set/invalid
    pub fn toasts_or_default(&self) -> ToastBackend {
        self.toasts
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// Get app name, or "Pushflash" if not set
    pub fn app_name_or_default(&self) -> &str {
        self.app_name.as_deref().unwrap_or(DEFAULT_APP_NAME)
    }

    /// Get themes directory, or `<config dir>/pushflash/themes`
    pub fn themes_dir_or_default(&self) -> PathBuf {
        match self.themes_dir.as_ref() {
            Some(dir) => PathBuf::from(dir),
            None => dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("~/.config"))
                .join("pushflash")
                .join("themes"),
        }
    }
}
