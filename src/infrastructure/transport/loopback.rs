//! In-process transport adapter
//!
//! Records outbound events and lets the caller inject inbound ones.
//! Used by tests and by anything that wants a subscriber without a server.

use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::mpsc;

use crate::application::ports::{
    Connector, Transport, TransportError, TransportEvent, TransportEvents,
};

#[derive(Default)]
struct LoopbackState {
    path: Option<String>,
    sent: Vec<(String, String)>,
    events: Option<mpsc::UnboundedSender<TransportEvent>>,
    closed: bool,
}

/// Connector whose bindings stay in memory.
///
/// Clones share state, so keep one clone to drive the binding handed to a
/// subscriber.
#[derive(Clone, Default)]
pub struct LoopbackConnector {
    state: Arc<Mutex<LoopbackState>>,
}

impl LoopbackConnector {
    /// Create a connector with no open binding
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, LoopbackState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Deliver an inbound event to the open binding.
    ///
    /// # Returns
    /// false if there is no open binding or it has been closed
    pub fn inject(&self, event: TransportEvent) -> bool {
        let state = self.lock();
        if state.closed {
            return false;
        }
        match state.events.as_ref() {
            Some(tx) => tx.send(event).is_ok(),
            None => false,
        }
    }

    /// End the event stream as if the server went away for good
    pub fn hang_up(&self) {
        self.lock().events.take();
    }

    /// Outbound `(event, data)` pairs in send order
    pub fn sent(&self) -> Vec<(String, String)> {
        self.lock().sent.clone()
    }

    /// Path the last binding was opened with
    pub fn path(&self) -> Option<String> {
        self.lock().path.clone()
    }

    /// Whether the last binding was closed
    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }
}

impl Connector for LoopbackConnector {
    fn connect(
        &self,
        path: &str,
    ) -> Result<(Box<dyn Transport>, TransportEvents), TransportError> {
        let (tx, rx) = mpsc::unbounded_channel();
        {
            let mut state = self.lock();
            state.path = Some(path.to_string());
            state.events = Some(tx);
            state.closed = false;
        }
        let transport = LoopbackTransport {
            state: Arc::clone(&self.state),
        };
        Ok((Box::new(transport), rx))
    }
}

struct LoopbackTransport {
    state: Arc<Mutex<LoopbackState>>,
}

impl Transport for LoopbackTransport {
    fn emit(&self, event: &str, data: &str) -> Result<(), TransportError> {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        if state.closed {
            return Err(TransportError::Closed);
        }
        state.sent.push((event.to_string(), data.to_string()));
        Ok(())
    }

    fn close(&self) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.closed = true;
        state.events.take();
    }

    fn is_closed(&self) -> bool {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connect_records_path() {
        let connector = LoopbackConnector::new();
        let _binding = connector.connect("/notifications").unwrap();
        assert_eq!(connector.path().as_deref(), Some("/notifications"));
    }

    #[test]
    fn emit_is_recorded() {
        let connector = LoopbackConnector::new();
        let (transport, _events) = connector.connect("/notifications").unwrap();
        transport.emit("set channel", "room-1").unwrap();
        assert_eq!(
            connector.sent(),
            vec![("set channel".to_string(), "room-1".to_string())]
        );
    }

    #[test]
    fn injected_events_arrive_in_order() {
        let connector = LoopbackConnector::new();
        let (_transport, mut events) = connector.connect("/notifications").unwrap();

        assert!(connector.inject(TransportEvent::Connected));
        assert!(connector.inject(TransportEvent::Disconnected));

        assert_eq!(events.try_recv().unwrap(), TransportEvent::Connected);
        assert_eq!(events.try_recv().unwrap(), TransportEvent::Disconnected);
    }

    #[test]
    fn close_rejects_emit_and_inject() {
        let connector = LoopbackConnector::new();
        let (transport, mut events) = connector.connect("/notifications").unwrap();
        transport.close();

        assert!(transport.is_closed());
        assert!(connector.is_closed());
        assert!(matches!(
            transport.emit("set channel", "room-1"),
            Err(TransportError::Closed)
        ));
        assert!(!connector.inject(TransportEvent::Connected));
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn inject_without_binding_fails() {
        let connector = LoopbackConnector::new();
        assert!(!connector.inject(TransportEvent::Connected));
    }
}
