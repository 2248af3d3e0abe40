//! WebSocket transport adapter
//!
//! Speaks JSON text frames of the form `{"event": <name>, "data": <json>}`
//! at `<server url>/<namespace>`. One background task per binding owns the
//! socket: it connects, forwards frames, and reconnects with exponential
//! backoff until the binding is closed. Frames queued while the socket is
//! down are dropped on reconnect. tungstenite answers pings itself.
//!
//! ```text
//!   Subscriber ── emit("set channel") ──► outbound queue ──► socket
//!   Subscriber ◄── TransportEvent ◄──── connection task ◄── socket
//! ```

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use tokio::net::TcpStream;
use tokio::sync::{mpsc, watch};
use tokio_tungstenite::tungstenite::{self, Message as WsMessage};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::{debug, info, trace, warn};

use crate::application::ports::{
    Connector, Transport, TransportError, TransportEvent, TransportEvents,
};
use crate::domain::message::Message;

/// Inbound frame carrying a channel message
pub const MESSAGE_FRAME: &str = "message";
/// Inbound frame sent when the server refuses a channel
pub const UNAUTHORIZED_CHANNEL_FRAME: &str = "unauthorized channel";
/// Inbound frame acknowledging a channel subscription
pub const CHANNEL_SET_FRAME: &str = "channel set";
/// Inbound frame reporting a server-side error
pub const ERROR_FRAME: &str = "error";

/// Initial reconnection delay in seconds.
const INITIAL_BACKOFF_SECS: u64 = 1;
/// Maximum reconnection delay in seconds.
const MAX_BACKOFF_SECS: u64 = 60;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Wire frame in both directions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Frame {
    event: String,
    #[serde(default)]
    data: serde_json::Value,
}

impl Frame {
    /// Map an inbound frame to a transport event, if it is one we know
    fn into_event(self) -> Option<TransportEvent> {
        match self.event.as_str() {
            MESSAGE_FRAME => {
                let message = serde_json::from_value::<Message>(self.data.clone())
                    .unwrap_or_else(|_| Message::Text(value_to_text(&self.data)));
                Some(TransportEvent::Message(message))
            }
            UNAUTHORIZED_CHANNEL_FRAME => {
                Some(TransportEvent::UnauthorizedChannel(value_to_text(&self.data)))
            }
            CHANNEL_SET_FRAME => Some(TransportEvent::ChannelSet(value_to_text(&self.data))),
            ERROR_FRAME => Some(TransportEvent::Error(value_to_text(&self.data))),
            _ => None,
        }
    }
}

/// Render a JSON payload as text: strings verbatim, null as empty
fn value_to_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Encode an outbound event as a text frame
fn encode_frame(event: &str, data: &str) -> Result<String, TransportError> {
    let frame = Frame {
        event: event.to_string(),
        data: serde_json::Value::String(data.to_string()),
    };
    serde_json::to_string(&frame).map_err(|e| TransportError::SendFailed {
        event: event.to_string(),
        message: e.to_string(),
    })
}

/// Convert an HTTP(S) URL to WS(S) scheme.
///
/// Passes `ws://` and `wss://` through unchanged.
pub fn http_to_ws_scheme(url: &str) -> String {
    if url.starts_with("wss://") || url.starts_with("ws://") {
        url.to_string()
    } else {
        url.replace("https://", "wss://")
            .replace("http://", "ws://")
    }
}

/// Build the socket URL for a namespace path on a server.
pub fn build_ws_url(server_url: &str, path: &str) -> Result<String, TransportError> {
    let base = http_to_ws_scheme(server_url.trim());
    if !(base.starts_with("ws://") || base.starts_with("wss://")) {
        return Err(TransportError::InvalidUrl(server_url.to_string()));
    }
    Ok(format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    ))
}

/// Opens WebSocket bindings against one server
#[derive(Debug, Clone)]
pub struct SocketConnector {
    server_url: String,
}

impl SocketConnector {
    /// Create a connector for a server URL (`http(s)://` or `ws(s)://`)
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into(),
        }
    }

    /// The configured server URL
    pub fn server_url(&self) -> &str {
        &self.server_url
    }
}

impl Connector for SocketConnector {
    fn connect(
        &self,
        path: &str,
    ) -> Result<(Box<dyn Transport>, TransportEvents), TransportError> {
        let url = build_ws_url(&self.server_url, path)?;
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| TransportError::NoRuntime(e.to_string()))?;

        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        runtime.spawn(run_connection_loop(url, events_tx, outbound_rx, shutdown_rx));

        let transport = SocketTransport {
            outbound: outbound_tx,
            shutdown: shutdown_tx,
        };
        Ok((Box::new(transport), events_rx))
    }
}

/// Handle to a running connection task
#[derive(Debug)]
pub struct SocketTransport {
    outbound: mpsc::UnboundedSender<String>,
    shutdown: watch::Sender<bool>,
}

impl Transport for SocketTransport {
    fn emit(&self, event: &str, data: &str) -> Result<(), TransportError> {
        if self.is_closed() {
            return Err(TransportError::Closed);
        }
        let frame = encode_frame(event, data)?;
        self.outbound
            .send(frame)
            .map_err(|_| TransportError::Closed)
    }

    fn close(&self) {
        self.shutdown.send_replace(true);
    }

    fn is_closed(&self) -> bool {
        *self.shutdown.borrow()
    }
}

impl Drop for SocketTransport {
    fn drop(&mut self) {
        self.close();
    }
}

/// Result of the inner message loop.
enum ConnectionLoopExit {
    /// Binding closed, or nobody reads events any more.
    Shutdown,
    /// Connection was lost -- should reconnect.
    Disconnected,
}

/// Connect, pump frames, and reconnect until shutdown.
///
/// A handshake rejected with 401/403 is reported as `ConnectFailed` and
/// ends the loop; other connect errors are reported and retried.
async fn run_connection_loop(
    url: String,
    events: mpsc::UnboundedSender<TransportEvent>,
    mut outbound: mpsc::UnboundedReceiver<String>,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut backoff_secs = INITIAL_BACKOFF_SECS;

    loop {
        if *shutdown.borrow() {
            break;
        }

        debug!(%url, "connecting");
        let attempt = tokio::select! {
            result = tokio_tungstenite::connect_async(url.as_str()) => result,
            _ = shutdown.changed() => break,
        };

        let stream = match attempt {
            Ok((stream, _response)) => {
                info!(%url, "socket connected");
                backoff_secs = INITIAL_BACKOFF_SECS;
                stream
            }
            Err(tungstenite::Error::Http(ref response))
                if is_auth_rejection(response.status().as_u16()) =>
            {
                let reason = format!("handshake rejected with status {}", response.status());
                warn!(%url, %reason, "connect failed");
                let _ = events.send(TransportEvent::ConnectFailed(reason));
                break;
            }
            Err(e) => {
                warn!(%url, error = %e, retry_in_secs = backoff_secs, "connection failed");
                if events.send(TransportEvent::Error(e.to_string())).is_err() {
                    break;
                }
                if !wait_backoff(backoff_secs, &mut shutdown).await {
                    break;
                }
                backoff_secs = (backoff_secs * 2).min(MAX_BACKOFF_SECS);
                continue;
            }
        };

        let stale = discard_queued(&mut outbound);
        if stale > 0 {
            debug!(frames = stale, "dropped frames queued while offline");
        }
        if events.send(TransportEvent::Connected).is_err() {
            break;
        }

        match run_message_loop(stream, &events, &mut outbound, &mut shutdown).await {
            ConnectionLoopExit::Shutdown => break,
            ConnectionLoopExit::Disconnected => {
                if events.send(TransportEvent::Disconnected).is_err() {
                    break;
                }
                info!(%url, retry_in_secs = backoff_secs, "socket disconnected");
                if !wait_backoff(backoff_secs, &mut shutdown).await {
                    break;
                }
                backoff_secs = (backoff_secs * 2).min(MAX_BACKOFF_SECS);
            }
        }
    }

    debug!(%url, "connection loop finished");
}

/// Drop frames queued while no socket was up; `Connected` re-subscribes.
fn discard_queued(outbound: &mut mpsc::UnboundedReceiver<String>) -> usize {
    let mut dropped = 0;
    while outbound.try_recv().is_ok() {
        dropped += 1;
    }
    dropped
}

fn is_auth_rejection(status: u16) -> bool {
    matches!(status, 401 | 403)
}

/// Sleep for the backoff delay. Returns false if shutdown came first.
async fn wait_backoff(secs: u64, shutdown: &mut watch::Receiver<bool>) -> bool {
    tokio::select! {
        _ = tokio::time::sleep(Duration::from_secs(secs)) => true,
        _ = shutdown.changed() => false,
    }
}

/// Pump frames for one live connection.
async fn run_message_loop(
    stream: WsStream,
    events: &mpsc::UnboundedSender<TransportEvent>,
    outbound: &mut mpsc::UnboundedReceiver<String>,
    shutdown: &mut watch::Receiver<bool>,
) -> ConnectionLoopExit {
    let (mut sink, mut reader) = stream.split();

    loop {
        tokio::select! {
            msg = reader.next() => {
                match msg {
                    Some(Ok(WsMessage::Text(text))) => {
                        let Some(event) = decode_frame(&text) else {
                            continue;
                        };
                        if events.send(event).is_err() {
                            let _ = sink.close().await;
                            return ConnectionLoopExit::Shutdown;
                        }
                    }
                    Some(Ok(WsMessage::Close(frame))) => {
                        info!(?frame, "connection closed by server");
                        return ConnectionLoopExit::Disconnected;
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        warn!(error = %e, "socket read error");
                        return ConnectionLoopExit::Disconnected;
                    }
                    None => {
                        info!("socket stream ended");
                        return ConnectionLoopExit::Disconnected;
                    }
                }
            }

            Some(frame) = outbound.recv() => {
                if let Err(e) = sink.send(WsMessage::Text(frame)).await {
                    warn!(error = %e, "failed to send frame");
                    return ConnectionLoopExit::Disconnected;
                }
            }

            _ = shutdown.changed() => {
                debug!("closing socket");
                let _ = sink.send(WsMessage::Close(None)).await;
                let _ = sink.close().await;
                return ConnectionLoopExit::Shutdown;
            }
        }
    }
}

/// Parse an inbound text frame. Unknown or malformed frames yield `None`.
fn decode_frame(text: &str) -> Option<TransportEvent> {
    let frame: Frame = match serde_json::from_str(text) {
        Ok(frame) => frame,
        Err(e) => {
            let preview: String = text.chars().take(100).collect();
            warn!(error = %e, frame = %preview, "malformed frame");
            return None;
        }
    };
    let name = frame.event.clone();
    let event = frame.into_event();
    if event.is_none() {
        trace!(event = %name, "ignoring unknown frame");
    }
    event
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_to_ws_scheme_https() {
        assert_eq!(http_to_ws_scheme("https://example.com"), "wss://example.com");
    }

    #[test]
    fn http_to_ws_scheme_passthrough() {
        assert_eq!(http_to_ws_scheme("ws://localhost:3000"), "ws://localhost:3000");
    }

    #[test]
    fn ws_url_appends_namespace() {
        let url = build_ws_url("http://localhost:3000", "/notifications").unwrap();
        assert_eq!(url, "ws://localhost:3000/notifications");
    }

    #[test]
    fn ws_url_handles_trailing_slash() {
        let url = build_ws_url("https://push.example.com/", "/alerts").unwrap();
        assert_eq!(url, "wss://push.example.com/alerts");
    }

    #[test]
    fn ws_url_rejects_other_schemes() {
        assert!(matches!(
            build_ws_url("ftp://example.com", "/notifications"),
            Err(TransportError::InvalidUrl(_))
        ));
    }

    #[test]
    fn encode_set_channel() {
        let text = encode_frame("set channel", "room-1").unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["event"], "set channel");
        assert_eq!(value["data"], "room-1");
    }

    #[test]
    fn decode_structured_message() {
        let event = decode_frame(r#"{"event":"message","data":{"type":"success","body":"Done"}}"#);
        assert_eq!(
            event,
            Some(TransportEvent::Message(Message::typed("success", "Done")))
        );
    }

    #[test]
    fn decode_plain_message() {
        let event = decode_frame(r#"{"event":"message","data":"hello"}"#);
        assert_eq!(event, Some(TransportEvent::Message(Message::from("hello"))));
    }

    #[test]
    fn decode_message_with_odd_body_falls_back_to_text() {
        let event = decode_frame(r#"{"event":"message","data":42}"#);
        assert_eq!(event, Some(TransportEvent::Message(Message::from("42"))));
    }

    #[test]
    fn decode_typed_message_with_non_string_body() {
        assert_eq!(
            decode_frame(r#"{"event":"message","data":{"type":"error","body":42}}"#),
            Some(TransportEvent::Message(Message::typed("error", "42")))
        );
        assert_eq!(
            decode_frame(r#"{"event":"message","data":{"type":"success","body":null}}"#),
            Some(TransportEvent::Message(Message::typed("success", "")))
        );
    }

    #[test]
    fn decode_lifecycle_frames() {
        assert_eq!(
            decode_frame(r#"{"event":"channel set","data":"room-1"}"#),
            Some(TransportEvent::ChannelSet("room-1".to_string()))
        );
        assert_eq!(
            decode_frame(r#"{"event":"unauthorized channel","data":"room-1"}"#),
            Some(TransportEvent::UnauthorizedChannel("room-1".to_string()))
        );
        assert_eq!(
            decode_frame(r#"{"event":"error","data":"bad request"}"#),
            Some(TransportEvent::Error("bad request".to_string()))
        );
    }

    #[test]
    fn decode_ignores_unknown_and_malformed() {
        assert_eq!(decode_frame(r#"{"event":"presence","data":{}}"#), None);
        assert_eq!(decode_frame("not json"), None);
    }

    #[test]
    fn queued_frames_are_discarded() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        tx.send(encode_frame("set channel", "room-1").unwrap()).unwrap();
        tx.send(encode_frame("set channel", "room-2").unwrap()).unwrap();

        assert_eq!(discard_queued(&mut rx), 2);
        assert_eq!(discard_queued(&mut rx), 0);

        // Frames sent afterwards still go through
        tx.send(encode_frame("set channel", "room-3").unwrap()).unwrap();
        assert!(rx.try_recv().unwrap().contains("room-3"));
    }

    #[test]
    fn auth_rejection_statuses() {
        assert!(is_auth_rejection(401));
        assert!(is_auth_rejection(403));
        assert!(!is_auth_rejection(500));
    }

    #[test]
    fn connect_outside_runtime_fails() {
        let connector = SocketConnector::new("http://localhost:3000");
        let result = connector.connect("/notifications");
        assert!(matches!(result, Err(TransportError::NoRuntime(_))));
    }

    #[tokio::test]
    async fn closed_transport_rejects_emit() {
        let connector = SocketConnector::new("http://127.0.0.1:9");
        let (transport, _events) = connector.connect("/notifications").unwrap();
        assert!(!transport.is_closed());
        transport.close();
        assert!(transport.is_closed());
        assert!(matches!(
            transport.emit("set channel", "room-1"),
            Err(TransportError::Closed)
        ));
    }
}
