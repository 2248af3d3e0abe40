//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;
use crate::domain::style::ToastBackend;
use crate::infrastructure::transport::build_ws_url;

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

const NOT_SET: &str = "(not set)";

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    ensure_valid_key(key)?;
    validate_config_value(key, value)?;

    let mut config = store.load().await?;
    *config_field_mut(&mut config, key) = Some(value.to_string());

    store.save(&config).await?;
    presenter.success(&format!("{} = {}", key, value));

    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    ensure_valid_key(key)?;

    let config = store.load().await?;
    presenter.output(config_field(&config, key).unwrap_or(NOT_SET));

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    for key in VALID_CONFIG_KEYS {
        presenter.key_value(key, config_field(&config, key).unwrap_or(NOT_SET));
    }

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

fn ensure_valid_key(key: &str) -> Result<(), ConfigError> {
    if is_valid_config_key(key) {
        return Ok(());
    }
    Err(ConfigError::ValidationError {
        key: key.to_string(),
        message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
    })
}

/// Read a config field by key. Keys must already be validated.
fn config_field<'a>(config: &'a AppConfig, key: &str) -> Option<&'a str> {
    match key {
        "url" => config.url.as_deref(),
        "channel" => config.channel.as_deref(),
        "namespace" => config.namespace.as_deref(),
        "base_class" => config.base_class.as_deref(),
        "toasts" => config.toasts.as_deref(),
        "app_name" => config.app_name.as_deref(),
        "themes_dir" => config.themes_dir.as_deref(),
        _ => None,
    }
}

fn config_field_mut<'a>(config: &'a mut AppConfig, key: &str) -> &'a mut Option<String> {
    match key {
        "url" => &mut config.url,
        "channel" => &mut config.channel,
        "namespace" => &mut config.namespace,
        "base_class" => &mut config.base_class,
        "toasts" => &mut config.toasts,
        "app_name" => &mut config.app_name,
        "themes_dir" => &mut config.themes_dir,
        _ => unreachable!(), // Already validated
    }
}

/// Validate a config value based on key type
fn validate_config_value(key: &str, value: &str) -> Result<(), ConfigError> {
    let invalid = |message: String| ConfigError::ValidationError {
        key: key.to_string(),
        message,
    };

    match key {
        "url" => {
            build_ws_url(value, "/").map_err(|e| invalid(e.to_string()))?;
        }
        "toasts" => {
            value
                .parse::<ToastBackend>()
                .map_err(|e| invalid(e.to_string()))?;
        }
        "channel" | "namespace" | "base_class" | "app_name" => {
            if value.trim().is_empty() {
                return Err(invalid("Value must not be empty".to_string()));
            }
        }
        _ => {} // themes_dir accepts any path
    }
    Ok(())
}
