//! Channel subscription state

use std::fmt;

/// Connection state as observed from transport signals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connected,
    Subscribed,
}

impl ConnectionState {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Disconnected => "disconnected",
            Self::Connected => "connected",
            Self::Subscribed => "subscribed",
        }
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Desired channel plus the last observed connection state.
///
/// Transitions never fail: the transport decides ordering, this only
/// records what it reported.
///
/// State machine:
///   * -> CONNECTED (connected)
///   CONNECTED -> SUBSCRIBED (ack for the current channel)
///   SUBSCRIBED -> CONNECTED (channel changed)
///   * -> DISCONNECTED (disconnected, connect failed)
#[derive(Debug, Clone, Default)]
pub struct ChannelSession {
    channel: String,
    state: ConnectionState,
}

impl ChannelSession {
    /// Create a session for a channel, not yet connected
    pub fn new(channel: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            state: ConnectionState::Disconnected,
        }
    }

    /// The currently desired channel
    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Get the current state
    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Replace the desired channel. A previous ack no longer applies.
    pub fn set_channel(&mut self, channel: impl Into<String>) {
        self.channel = channel.into();
        if self.state == ConnectionState::Subscribed {
            self.state = ConnectionState::Connected;
        }
    }

    /// Transport reported a (re)connect
    pub fn connected(&mut self) {
        self.state = ConnectionState::Connected;
    }

    /// Transport reported the connection is gone
    pub fn disconnected(&mut self) {
        self.state = ConnectionState::Disconnected;
    }

    /// Server acknowledged a channel. Returns whether it was the current one.
    pub fn acknowledged(&mut self, channel: &str) -> bool {
        if channel != self.channel || self.state == ConnectionState::Disconnected {
            return false;
        }
        self.state = ConnectionState::Subscribed;
        true
    }
}
