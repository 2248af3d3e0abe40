//! CLI argument definitions using Clap

use clap::{Parser, Subcommand, ValueEnum};

use crate::domain::style::ToastBackend;

/// Pushflash subscriber - show channel notifications as desktop toasts
#[derive(Parser, Debug)]
#[command(name = "pushflash-subscriber")]
#[command(version)]
#[command(about = "Subscribe to a pushflash channel and show its messages as toasts")]
#[command(long_about = None)]
pub struct Cli {
    /// Server URL (http, https, ws or wss)
    #[arg(short = 'u', long, value_name = "URL")]
    pub url: Option<String>,

    /// Channel to subscribe to
    #[arg(short = 'c', long, value_name = "ID")]
    pub channel: Option<String>,

    /// Transport namespace
    #[arg(short = 'n', long, value_name = "NS")]
    pub namespace: Option<String>,

    /// Root toast style class
    #[arg(long, value_name = "CLS")]
    pub base_class: Option<String>,

    /// How toasts are displayed
    #[arg(short = 't', long, value_name = "KIND")]
    pub toasts: Option<ToastsArg>,

    /// Log connection activity to stderr
    #[arg(short = 'v', long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Print a theme stylesheet from the themes directory
    Theme {
        /// Theme file name, e.g. jackedup.css
        name: String,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Toast backend argument for clap ValueEnum
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ToastsArg {
    NotifyRust,
    NotifySend,
    Console,
}

impl From<ToastsArg> for ToastBackend {
    fn from(arg: ToastsArg) -> Self {
        match arg {
            ToastsArg::NotifyRust => ToastBackend::NotifyRust,
            ToastsArg::NotifySend => ToastBackend::NotifySend,
            ToastsArg::Console => ToastBackend::Console,
        }
    }
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "url",
    "channel",
    "namespace",
    "base_class",
    "toasts",
    "app_name",
    "themes_dir",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_defaults() {
        let cli = Cli::parse_from(["pushflash-subscriber"]);
        assert!(cli.url.is_none());
        assert!(cli.channel.is_none());
        assert!(cli.namespace.is_none());
        assert!(cli.base_class.is_none());
        assert!(cli.toasts.is_none());
        assert!(!cli.verbose);
        assert!(cli.command.is_none());
    }

    #[test]
    fn cli_parses_connection_flags() {
        let cli = Cli::parse_from([
            "pushflash-subscriber",
            "--url",
            "https://push.example.com",
            "-c",
            "room-1",
            "-n",
            "alerts",
        ]);
        assert_eq!(cli.url.as_deref(), Some("https://push.example.com"));
        assert_eq!(cli.channel.as_deref(), Some("room-1"));
        assert_eq!(cli.namespace.as_deref(), Some("alerts"));
    }

    #[test]
    fn cli_parses_toasts() {
        let cli = Cli::parse_from(["pushflash-subscriber", "--toasts", "console"]);
        assert_eq!(cli.toasts, Some(ToastsArg::Console));
        assert_eq!(ToastBackend::from(ToastsArg::NotifySend), ToastBackend::NotifySend);
    }

    #[test]
    fn cli_rejects_unknown_toasts() {
        assert!(Cli::try_parse_from(["pushflash-subscriber", "--toasts", "banner"]).is_err());
    }

    #[test]
    fn cli_parses_theme() {
        let cli = Cli::parse_from(["pushflash-subscriber", "theme", "jackedup.css"]);
        assert!(matches!(cli.command, Some(Commands::Theme { name }) if name == "jackedup.css"));
    }

    #[test]
    fn cli_parses_config_set() {
        let cli = Cli::parse_from(["pushflash-subscriber", "config", "set", "channel", "room-1"]);
        if let Some(Commands::Config {
            action: ConfigAction::Set { key, value },
        }) = cli.command
        {
            assert_eq!(key, "channel");
            assert_eq!(value, "room-1");
        } else {
            panic!("Expected Config Set command");
        }
    }

    #[test]
    fn valid_config_keys() {
        assert!(is_valid_config_key("url"));
        assert!(is_valid_config_key("base_class"));
        assert!(is_valid_config_key("themes_dir"));
        assert!(!is_valid_config_key("api_key"));
    }

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }
}
