//! Pushflash subscriber - channel notifications as desktop toasts
//!
//! This crate connects to a pushflash server, subscribes to one channel,
//! and routes each typed message to a toast display handler.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Messages, channel state, toast styles, config and errors
//! - **Application**: The subscriber, its event emitter, the theme cache, and port traits
//! - **Infrastructure**: Adapter implementations (WebSocket, notify-rust, theme files, XDG config)
//! - **CLI**: Command-line interface, argument parsing, and signal handling

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
