//! pushflash-subscriber CLI entry point

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use pushflash_subscriber::application::ThemeCache;
use pushflash_subscriber::cli::{
    app::{load_merged_config, run_subscriber, EXIT_ERROR},
    args::{Cli, Commands},
    config_cmd::handle_config_command,
    presenter::Presenter,
    theme_cmd::handle_theme_command,
};
use pushflash_subscriber::domain::config::AppConfig;
use pushflash_subscriber::domain::style::ToastBackend;
use pushflash_subscriber::infrastructure::{FsStylesheetSource, XdgConfigStore};

/// Install the stderr log subscriber. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let level = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let presenter = Presenter::new();

    // Handle subcommands
    match cli.command {
        Some(Commands::Config { action }) => {
            let store = XdgConfigStore::new();
            if let Err(e) = handle_config_command(action, &store, &presenter).await {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
            return ExitCode::SUCCESS;
        }
        Some(Commands::Theme { name }) => {
            let config = load_merged_config(AppConfig::empty()).await;
            let cache = ThemeCache::new(FsStylesheetSource::new(config.themes_dir_or_default()));
            if let Err(e) = handle_theme_command(&name, &cache, &presenter).await {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
            return ExitCode::SUCCESS;
        }
        None => {}
    }

    // Build CLI config from args
    let cli_config = AppConfig {
        url: cli.url,
        channel: cli.channel,
        namespace: cli.namespace,
        base_class: cli.base_class,
        toasts: cli
            .toasts
            .map(|t| ToastBackend::from(t).to_string()),
        ..Default::default()
    };

    let config = load_merged_config(cli_config).await;

    run_subscriber(config).await
}
