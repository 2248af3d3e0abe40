//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod config;
pub mod notifier;
pub mod stylesheet;
pub mod transport;

// Re-export common types
pub use config::ConfigStore;
pub use notifier::{NotificationError, NotificationIcon, ToastFactory, ToastFn};
pub use stylesheet::{StylesheetSource, ThemeError};
pub use transport::{
    Connector, Transport, TransportError, TransportEvent, TransportEvents, SET_CHANNEL_EVENT,
};
