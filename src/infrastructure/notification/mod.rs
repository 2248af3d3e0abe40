//! Toast display adapters
//!
//! Desktop notifications through notify-rust (default) or the `notify-send`
//! command, or plain terminal output.

mod console;
mod notify_rust;
mod notify_send;

use std::sync::Arc;

pub use console::{format_toast, ConsoleToasts};
pub use notify_rust::NotifyRustToasts;
pub use notify_send::NotifySendToasts;

use crate::application::ports::ToastFactory;
use crate::domain::style::{ToastBackend, ToastStyle};

/// Create the toast factory for a backend
pub fn create_toasts(backend: ToastBackend, app_name: &str) -> Arc<dyn ToastFactory> {
    match backend {
        ToastBackend::NotifyRust => Arc::new(NotifyRustToasts::with_app_name(app_name)),
        ToastBackend::NotifySend => Arc::new(NotifySendToasts::with_app_name(app_name)),
        ToastBackend::Console => Arc::new(ConsoleToasts::new()),
    }
}

/// Toast heading derived from the style suffix: `error` -> `Error`
fn toast_title(style: &ToastStyle) -> String {
    let mut chars = style.suffix().chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
