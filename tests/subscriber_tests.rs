//! Subscriber integration tests over the in-process transport

use std::sync::{Arc, Mutex};

use pushflash_subscriber::application::ports::{ToastFactory, ToastFn, TransportEvent};
use pushflash_subscriber::application::{Subscriber, SubscriberOptions};
use pushflash_subscriber::domain::{ConnectionState, Message, ToastStyle};
use pushflash_subscriber::infrastructure::LoopbackConnector;

type Shown = Arc<Mutex<Vec<(String, String)>>>;

/// Records (addn_cls, body) for every toast shown
#[derive(Default)]
struct RecordingToasts {
    shown: Shown,
}

impl ToastFactory for RecordingToasts {
    fn spawn(&self, style: &ToastStyle) -> ToastFn {
        let shown = Arc::clone(&self.shown);
        let class = style.addn_cls().to_string();
        Arc::new(move |body: &str| {
            shown.lock().unwrap().push((class.clone(), body.to_string()));
        })
    }
}

fn subscriber(options: SubscriberOptions) -> (Subscriber, LoopbackConnector, Shown) {
    let connector = LoopbackConnector::new();
    let toasts = RecordingToasts::default();
    let shown = Arc::clone(&toasts.shown);
    let subscriber = Subscriber::new("room-1", options, &connector, Arc::new(toasts)).unwrap();
    (subscriber, connector, shown)
}

fn pair(a: &str, b: &str) -> (String, String) {
    (a.to_string(), b.to_string())
}

#[tokio::test]
async fn full_session_over_loopback() {
    let (mut subscriber, connector, shown) = subscriber(SubscriberOptions::default());
    subscriber.add_message_type("deploy", Some("success"));

    connector.inject(TransportEvent::Connected);
    connector.inject(TransportEvent::ChannelSet("room-1".to_string()));
    connector.inject(TransportEvent::Message(Message::from("plain text")));
    connector.inject(TransportEvent::Message(Message::typed("deploy", "v1.2 is live")));
    connector.inject(TransportEvent::Message(Message::typed("unknown", "dropped")));
    connector.inject(TransportEvent::Disconnected);
    connector.inject(TransportEvent::Connected);
    connector.hang_up();

    subscriber.run().await;

    assert_eq!(connector.path().as_deref(), Some("/notifications"));
    assert_eq!(
        connector.sent(),
        vec![pair("set channel", "room-1"), pair("set channel", "room-1")]
    );
    assert_eq!(
        *shown.lock().unwrap(),
        vec![
            pair("humane-jackedup-info", "plain text"),
            pair("humane-jackedup-success", "v1.2 is live"),
            pair("humane-jackedup-error", "Disconnected from host"),
        ]
    );
    assert_eq!(subscriber.state(), ConnectionState::Connected);
}

#[tokio::test]
async fn rejected_connection_shows_unauthorized() {
    let (mut subscriber, connector, shown) = subscriber(SubscriberOptions::default());

    connector.inject(TransportEvent::ConnectFailed("401".to_string()));
    connector.hang_up();
    subscriber.run().await;

    assert_eq!(
        *shown.lock().unwrap(),
        vec![pair("humane-jackedup-error", "Unauthorized")]
    );
    assert!(connector.sent().is_empty());
}

#[tokio::test]
async fn channel_switch_is_resent_after_reconnect() {
    let (mut subscriber, connector, _) = subscriber(SubscriberOptions::default());

    connector.inject(TransportEvent::Connected);
    connector.hang_up();
    subscriber.run().await;
    subscriber.set_channel("room-2");

    // Drive the reconnect by hand once the stream has ended
    subscriber.handle_event(TransportEvent::Disconnected);
    subscriber.handle_event(TransportEvent::Connected);

    assert_eq!(
        connector.sent(),
        vec![
            pair("set channel", "room-1"),
            pair("set channel", "room-2"),
            pair("set channel", "room-2"),
        ]
    );
}

#[tokio::test]
async fn custom_namespace_and_base_class() {
    let (mut subscriber, connector, shown) = subscriber(
        SubscriberOptions::default()
            .with_namespace("alerts")
            .with_base_class("toast"),
    );

    connector.inject(TransportEvent::Message(Message::typed("success", "ok")));
    connector.hang_up();
    subscriber.run().await;

    assert_eq!(connector.path().as_deref(), Some("/alerts"));
    assert_eq!(*shown.lock().unwrap(), vec![pair("toast-success", "ok")]);
}

#[tokio::test]
async fn shutdown_closes_binding() {
    let (mut subscriber, connector, shown) = subscriber(SubscriberOptions::default());

    subscriber.shutdown();

    assert!(connector.is_closed());
    assert!(!connector.inject(TransportEvent::Message(Message::from("late"))));
    subscriber.run().await;
    assert!(shown.lock().unwrap().is_empty());
}
