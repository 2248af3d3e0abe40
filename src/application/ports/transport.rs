//! Transport port interface
//!
//! A transport binding is one logical connection scoped to a namespace
//! path. Lifecycle changes and inbound messages arrive on an event stream;
//! outbound requests go through [`Transport::emit`].

use thiserror::Error;
use tokio::sync::mpsc;

use crate::domain::message::Message;

/// Outbound event asking the server to route a channel to this connection
pub const SET_CHANNEL_EVENT: &str = "set channel";

/// Signals delivered by a transport binding, in arrival order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    /// Connection (re)established
    Connected,
    /// Connection lost
    Disconnected,
    /// Connection could not be established at all
    ConnectFailed(String),
    /// Server refused the requested channel
    UnauthorizedChannel(String),
    /// Any other transport error
    Error(String),
    /// Server acknowledged a channel subscription
    ChannelSet(String),
    /// Inbound channel message
    Message(Message),
}

/// Receiving end of a binding's event stream
pub type TransportEvents = mpsc::UnboundedReceiver<TransportEvent>;

/// Transport errors
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    #[error("Invalid transport URL: {0}")]
    InvalidUrl(String),

    #[error("Transport is closed")]
    Closed,

    #[error("No async runtime to drive the transport: {0}")]
    NoRuntime(String),

    #[error("Failed to send '{event}': {message}")]
    SendFailed { event: String, message: String },
}

/// Port for an open transport binding
pub trait Transport: Send + Sync {
    /// Queue a named event with a string payload for the server.
    fn emit(&self, event: &str, data: &str) -> Result<(), TransportError>;

    /// Release the binding. The event stream ends once the binding stops.
    fn close(&self);

    /// Whether [`Transport::close`] has been called
    fn is_closed(&self) -> bool;
}

/// Port for opening transport bindings
pub trait Connector: Send + Sync {
    /// Open a binding scoped to `path` (e.g. `/notifications`).
    ///
    /// # Returns
    /// The binding and the stream of events it will deliver
    fn connect(&self, path: &str) -> Result<(Box<dyn Transport>, TransportEvents), TransportError>;
}
