//! Application layer - Use cases and port interfaces
//!
//! Contains the subscriber, its event emitter, the theme cache,
//! and trait definitions for external system interactions.

pub mod emitter;
pub mod ports;
pub mod subscriber;
pub mod theme;

// Re-export use cases
pub use emitter::{EventEmitter, Listener, ListenerId};
pub use subscriber::{
    Subscriber, SubscriberError, SubscriberOptions, DISCONNECTED_MESSAGE, ERROR_EVENT, INFO_EVENT,
    SUCCESS_EVENT, UNAUTHORIZED_EVENT, UNAUTHORIZED_MESSAGE,
};
pub use theme::ThemeCache;
