//! Main app runner for subscriber mode

use std::env;
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::info;

use crate::application::ports::ConfigStore;
use crate::application::{Subscriber, SubscriberOptions, UNAUTHORIZED_EVENT};
use crate::domain::config::AppConfig;
use crate::infrastructure::{create_toasts, SocketConnector, XdgConfigStore};

use super::presenter::Presenter;
use super::signals::ShutdownSignal;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Environment overrides
pub const URL_ENV: &str = "PUSHFLASH_URL";
pub const CHANNEL_ENV: &str = "PUSHFLASH_CHANNEL";

/// Connect, show notifications until SIGINT/SIGTERM, then shut down
pub async fn run_subscriber(config: AppConfig) -> ExitCode {
    let presenter = Presenter::new();

    let Some(channel) = config.channel.clone().filter(|c| !c.trim().is_empty()) else {
        presenter.error(&format!(
            "Missing channel. Pass --channel <ID>, set {} or run 'pushflash-subscriber config set channel <ID>'",
            CHANNEL_ENV
        ));
        return ExitCode::from(EXIT_USAGE_ERROR);
    };

    let mut shutdown = match ShutdownSignal::new() {
        Ok(signal) => signal,
        Err(e) => {
            presenter.error(&format!("Failed to setup signal handler: {}", e));
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let connector = SocketConnector::new(config.url_or_default());
    let toasts = create_toasts(config.toasts_or_default(), config.app_name_or_default());
    let options = SubscriberOptions {
        namespace: config.namespace.clone(),
        base_class: config.base_class.clone(),
    };

    let mut subscriber = match Subscriber::new(channel, options, &connector, toasts) {
        Ok(subscriber) => subscriber,
        Err(e) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    };

    let rejected = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&rejected);
    subscriber.on(UNAUTHORIZED_EVENT, move |_: &str| {
        flag.store(true, Ordering::SeqCst);
    });

    presenter.info(&presenter.format_listening(
        config.url_or_default(),
        subscriber.namespace(),
        subscriber.channel(),
    ));

    let stream_ended = tokio::select! {
        _ = subscriber.run() => true,
        name = shutdown.recv() => {
            info!(signal = name, "shutdown requested");
            false
        }
    };

    subscriber.shutdown();

    if stream_ended {
        if rejected.load(Ordering::SeqCst) {
            presenter.error("Server rejected the connection (unauthorized)");
        } else {
            presenter.error("Connection closed");
        }
        return ExitCode::from(EXIT_ERROR);
    }

    ExitCode::from(EXIT_SUCCESS)
}

/// Configuration read from the environment
pub fn env_config() -> AppConfig {
    AppConfig {
        url: env::var(URL_ENV).ok().filter(|s| !s.is_empty()),
        channel: env::var(CHANNEL_ENV).ok().filter(|s| !s.is_empty()),
        ..Default::default()
    }
}

/// Load and merge configuration from file, env, and CLI
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = match store.load().await {
        Ok(config) => config,
        Err(e) => {
            Presenter::new().warn(&format!("Ignoring config file: {}", e));
            AppConfig::empty()
        }
    };

    // Merge: defaults < file < env < cli
    AppConfig::defaults()
        .merge(file_config)
        .merge(env_config())
        .merge(cli_config)
}
