//! Configuration domain module

mod app_config;

pub use app_config::{AppConfig, DEFAULT_APP_NAME, DEFAULT_NAMESPACE, DEFAULT_URL};
