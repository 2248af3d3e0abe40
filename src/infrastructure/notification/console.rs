//! Terminal toast adapter
//!
//! Prints one colored line per toast to stdout.

use std::sync::Arc;

use colored::{ColoredString, Colorize};

use crate::application::ports::{NotificationIcon, ToastFactory, ToastFn};
use crate::domain::style::ToastStyle;

use super::toast_title;

/// Toasts printed to the terminal
#[derive(Debug, Default)]
pub struct ConsoleToasts;

impl ConsoleToasts {
    pub fn new() -> Self {
        Self
    }
}

fn paint(title: &str, icon: NotificationIcon) -> ColoredString {
    match icon {
        NotificationIcon::Error => title.red().bold(),
        NotificationIcon::Success => title.green().bold(),
        NotificationIcon::Warning => title.yellow().bold(),
        NotificationIcon::Info => title.cyan().bold(),
    }
}

/// Render the line printed for one toast
pub fn format_toast(style: &ToastStyle, body: &str) -> String {
    let icon = NotificationIcon::for_style(style);
    let label = format!("[{}]", toast_title(style));
    format!("{} {}", paint(&label, icon), body)
}

impl ToastFactory for ConsoleToasts {
    fn spawn(&self, style: &ToastStyle) -> ToastFn {
        let style = style.clone();
        Arc::new(move |body: &str| {
            println!("{}", format_toast(&style, body));
        })
    }
}
