//! Notification subscriber
//!
//! Binds one transport connection to a channel, turns transport signals
//! into `error` / `unauthorized` events, and routes channel messages to the
//! toast handler registered for their type.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::channel::{ChannelSession, ConnectionState};
use crate::domain::config::DEFAULT_NAMESPACE;
use crate::domain::message::Message;
use crate::domain::style::{ToastStyle, DEFAULT_BASE_CLASS};

use super::emitter::{EventEmitter, Listener, ListenerId};
use super::ports::{
    Connector, ToastFactory, ToastFn, Transport, TransportError, TransportEvent, TransportEvents,
    SET_CHANNEL_EVENT,
};

/// Event raised for errors and for `error` messages
pub const ERROR_EVENT: &str = "error";
/// Event raised when the server refuses the connection or channel
pub const UNAUTHORIZED_EVENT: &str = "unauthorized";
/// Event raised for `info` messages
pub const INFO_EVENT: &str = "info";
/// Event raised for `success` messages
pub const SUCCESS_EVENT: &str = "success";

/// Payload of the `error` event raised when the connection drops
pub const DISCONNECTED_MESSAGE: &str = "Disconnected from host";
/// Payload of the `unauthorized` event
pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized";

/// Errors from creating a subscriber
#[derive(Debug, Error)]
pub enum SubscriberError {
    #[error("Failed to open transport: {0}")]
    Transport(#[from] TransportError),
}

/// Construction options. Absent or empty values fall back to defaults.
#[derive(Debug, Clone, Default)]
pub struct SubscriberOptions {
    /// Transport namespace (default `notifications`)
    pub namespace: Option<String>,
    /// Root toast style class (default `humane-jackedup`)
    pub base_class: Option<String>,
}

impl SubscriberOptions {
    /// Set the namespace
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Set the base class
    pub fn with_base_class(mut self, base_class: impl Into<String>) -> Self {
        self.base_class = Some(base_class.into());
        self
    }
}

/// Toast handler registered for one message type
struct MessageHandler {
    toast: ToastFn,
    listener: ListenerId,
}

/// Channel subscriber.
///
/// Everything runs on the task that drives [`Subscriber::run`] (or calls
/// [`Subscriber::handle_event`]); listeners are invoked inline.
pub struct Subscriber {
    session: ChannelSession,
    namespace: String,
    base_class: String,
    transport: Box<dyn Transport>,
    events: TransportEvents,
    emitter: EventEmitter<str>,
    handlers: HashMap<String, MessageHandler>,
    toasts: Arc<dyn ToastFactory>,
    shut_down: bool,
}

impl Subscriber {
    /// Open a transport binding under `/<namespace>` and register the
    /// default `error`, `unauthorized`, `info` and `success` types.
    pub fn new(
        channel: impl Into<String>,
        options: SubscriberOptions,
        connector: &dyn Connector,
        toasts: Arc<dyn ToastFactory>,
    ) -> Result<Self, SubscriberError> {
        let namespace = options
            .namespace
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string());
        let base_class = options
            .base_class
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_CLASS.to_string());

        let (transport, events) = connector.connect(&format!("/{}", namespace))?;

        let mut subscriber = Self {
            session: ChannelSession::new(channel),
            namespace,
            base_class,
            transport,
            events,
            emitter: EventEmitter::new(),
            handlers: HashMap::new(),
            toasts,
            shut_down: false,
        };

        subscriber
            .add_message_type(ERROR_EVENT, None)
            .add_message_type(UNAUTHORIZED_EVENT, Some("error"))
            .add_message_type(INFO_EVENT, None)
            .add_message_type(SUCCESS_EVENT, None);

        info!(
            namespace = %subscriber.namespace,
            channel = %subscriber.session.channel(),
            "subscriber created"
        );

        Ok(subscriber)
    }

    /// Register a message type shown with style `<base_class>-<suffix>`.
    ///
    /// The suffix defaults to the type name. Registering a type again
    /// replaces its previous toast handler.
    pub fn add_message_type(&mut self, kind: &str, suffix: Option<&str>) -> &mut Self {
        let suffix = suffix.filter(|s| !s.is_empty()).unwrap_or(kind);
        let style = ToastStyle::new(&self.base_class, suffix);
        let toast = self.toasts.spawn(&style);

        if let Some(previous) = self.handlers.remove(kind) {
            self.emitter.off(previous.listener);
            debug!(kind, "replacing message type handler");
        }

        let listener = self.emitter.on_shared(kind, Arc::clone(&toast));
        self.handlers
            .insert(kind.to_string(), MessageHandler { toast, listener });

        debug!(kind, style = %style.addn_cls(), "message type registered");
        self
    }

    /// Subscribe to `id`. The server acknowledges asynchronously with a
    /// channel-set event; the request is re-sent even if `id` is unchanged.
    pub fn set_channel(&mut self, id: impl Into<String>) {
        let id = id.into();
        debug!(channel = %id, "setting channel");

        if let Err(e) = self.transport.emit(SET_CHANNEL_EVENT, &id) {
            warn!(channel = %id, error = %e, "failed to request channel");
            self.session.set_channel(id);
            self.emitter.emit(ERROR_EVENT, &e.to_string());
            return;
        }

        self.session.set_channel(id);
    }

    /// Listen for a subscriber event (`error`, `unauthorized`, a message type...)
    pub fn on<F>(&mut self, topic: impl Into<String>, listener: F) -> ListenerId
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.emitter.on(topic, listener)
    }

    /// Listen with an already shared callable
    pub fn on_shared(&mut self, topic: impl Into<String>, listener: Listener<str>) -> ListenerId {
        self.emitter.on_shared(topic, listener)
    }

    /// Detach a listener registered with [`Subscriber::on`]
    pub fn off(&mut self, id: ListenerId) -> bool {
        self.emitter.off(id)
    }

    /// Apply one transport signal.
    pub fn handle_event(&mut self, event: TransportEvent) {
        if self.shut_down {
            debug!(?event, "ignoring transport event after shutdown");
            return;
        }

        match event {
            TransportEvent::Connected => {
                debug!(namespace = %self.namespace, "connected to namespace");
                self.session.connected();
                let channel = self.session.channel().to_string();
                self.set_channel(channel);
            }
            TransportEvent::Disconnected => {
                self.session.disconnected();
                self.emitter.emit(ERROR_EVENT, DISCONNECTED_MESSAGE);
            }
            TransportEvent::ConnectFailed(reason) => {
                debug!(namespace = %self.namespace, %reason, "unable to connect to namespace");
                self.session.disconnected();
                self.emitter.emit(UNAUTHORIZED_EVENT, UNAUTHORIZED_MESSAGE);
            }
            TransportEvent::UnauthorizedChannel(channel) => {
                debug!(%channel, "unauthorized for channel");
                self.emitter.emit(UNAUTHORIZED_EVENT, UNAUTHORIZED_MESSAGE);
            }
            TransportEvent::Error(err) => {
                self.emitter.emit(ERROR_EVENT, &err);
            }
            TransportEvent::ChannelSet(channel) => {
                let current = self.session.acknowledged(&channel);
                debug!(%channel, current, "subscribed to channel");
            }
            TransportEvent::Message(message) => {
                self.dispatch(message);
            }
        }
    }

    /// Normalize a message and emit it under its type.
    ///
    /// # Returns
    /// The number of listeners that saw it; zero is not an error
    pub fn dispatch(&self, message: Message) -> usize {
        let notification = message.normalize();
        let registered = self.handlers.contains_key(&notification.kind);
        debug!(
            channel = %self.session.channel(),
            kind = %notification.kind,
            registered,
            "message received"
        );
        self.emitter.emit(&notification.kind, &notification.body)
    }

    /// Drive the subscriber until the transport event stream ends or
    /// [`Subscriber::shutdown`] is called.
    pub async fn run(&mut self) {
        while !self.shut_down {
            match self.events.recv().await {
                Some(event) => self.handle_event(event),
                None => {
                    debug!(namespace = %self.namespace, "transport event stream ended");
                    break;
                }
            }
        }
    }

    /// Release the transport binding and detach every listener.
    /// Calling it more than once is harmless.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;
        self.transport.close();
        self.events.close();
        self.emitter.remove_all();
        self.handlers.clear();
        info!(namespace = %self.namespace, "subscriber shut down");
    }

    /// The currently desired channel
    pub fn channel(&self) -> &str {
        self.session.channel()
    }

    /// Transport namespace
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Root toast style class
    pub fn base_class(&self) -> &str {
        &self.base_class
    }

    /// Last observed connection state
    pub fn state(&self) -> ConnectionState {
        self.session.state()
    }

    /// Whether [`Subscriber::shutdown`] has run
    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }

    /// Whether a toast handler is registered for `kind`
    pub fn has_message_type(&self, kind: &str) -> bool {
        self.handlers.contains_key(kind)
    }

    /// The toast callable registered for `kind`
    pub fn toast(&self, kind: &str) -> Option<&ToastFn> {
        self.handlers.get(kind).map(|h| &h.toast)
    }

    /// Registered message types, sorted
    pub fn message_types(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }
}

impl Drop for Subscriber {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for Subscriber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscriber")
            .field("channel", &self.session.channel())
            .field("state", &self.session.state())
            .field("namespace", &self.namespace)
            .field("base_class", &self.base_class)
            .field("emitter", &self.emitter)
            .finish_non_exhaustive()
    }
}
