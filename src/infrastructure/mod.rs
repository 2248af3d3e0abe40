//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces:
//! the WebSocket transport, desktop toasts, theme files and XDG config.

pub mod config;
pub mod notification;
pub mod theme;
pub mod transport;

// Re-export adapters
pub use config::XdgConfigStore;
pub use notification::{create_toasts, ConsoleToasts, NotifyRustToasts, NotifySendToasts};
pub use theme::FsStylesheetSource;
pub use transport::{LoopbackConnector, SocketConnector};
