//! Transport adapters
//!
//! `SocketConnector` talks to a real server over WebSocket;
//! `LoopbackConnector` keeps everything in process.

mod loopback;
mod socket;

pub use loopback::LoopbackConnector;
pub use socket::{
    build_ws_url, http_to_ws_scheme, SocketConnector, SocketTransport, CHANNEL_SET_FRAME,
    ERROR_FRAME, MESSAGE_FRAME, UNAUTHORIZED_CHANNEL_FRAME,
};
