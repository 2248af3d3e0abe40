//! Toast style value object

use std::fmt;
use std::str::FromStr;

use crate::domain::error::InvalidToastBackendError;

/// Default root style key handed to the display engine
pub const DEFAULT_BASE_CLASS: &str = "humane-jackedup";

/// Style classes for one kind of toast.
///
/// `addn_cls` is always `<base_cls>-<suffix>`, e.g. `humane-jackedup-error`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ToastStyle {
    base_cls: String,
    addn_cls: String,
}

impl ToastStyle {
    /// Build the style for a base class and suffix
    pub fn new(base_class: &str, suffix: &str) -> Self {
        Self {
            base_cls: base_class.to_string(),
            addn_cls: format!("{}-{}", base_class, suffix),
        }
    }

    /// Root style class
    pub fn base_cls(&self) -> &str {
        &self.base_cls
    }

    /// Additional style class
    pub fn addn_cls(&self) -> &str {
        &self.addn_cls
    }

    /// The suffix part of the additional class
    pub fn suffix(&self) -> &str {
        self.addn_cls
            .strip_prefix(self.base_cls.as_str())
            .and_then(|rest| rest.strip_prefix('-'))
            .unwrap_or(&self.addn_cls)
    }
}

impl fmt::Display for ToastStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.base_cls, self.addn_cls)
    }
}

/// Which display adapter renders toasts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ToastBackend {
    #[default]
    NotifyRust,
    NotifySend,
    Console,
}

/// All toast backends, in display order
pub const ALL_TOAST_BACKENDS: &[ToastBackend] = &[
    ToastBackend::NotifyRust,
    ToastBackend::NotifySend,
    ToastBackend::Console,
];

impl ToastBackend {
    /// Get the string identifier
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NotifyRust => "notify-rust",
            Self::NotifySend => "notify-send",
            Self::Console => "console",
        }
    }
}

impl FromStr for ToastBackend {
    type Err = InvalidToastBackendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "notify-rust" => Ok(Self::NotifyRust),
            "notify-send" => Ok(Self::NotifySend),
            "console" => Ok(Self::Console),
            _ => Err(InvalidToastBackendError {
                input: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for ToastBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
