//! Domain layer - Core business logic
//!
//! Contains value objects, entities, and domain errors.
//! This layer has no dependencies on external systems.

pub mod channel;
pub mod config;
pub mod error;
pub mod message;
pub mod style;

// Re-export common types
pub use channel::{ChannelSession, ConnectionState};
pub use config::AppConfig;
pub use error::*;
pub use message::{Message, Notification, DEFAULT_MESSAGE_TYPE};
pub use style::{ToastBackend, ToastStyle, DEFAULT_BASE_CLASS};
