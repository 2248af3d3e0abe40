//! Theme stylesheet port interface

use async_trait::async_trait;
use thiserror::Error;

/// Theme loading errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThemeError {
    #[error("Invalid theme name: \"{0}\"")]
    InvalidName(String),

    #[error("Failed to read theme '{theme}': {message}")]
    Read { theme: String, message: String },
}

/// Port for reading raw theme stylesheets
#[async_trait]
pub trait StylesheetSource: Send + Sync {
    /// Read the stylesheet for a theme.
    ///
    /// # Arguments
    /// * `theme` - Theme name, e.g. `jackedup.css`
    ///
    /// # Returns
    /// The raw stylesheet text or an error
    async fn read(&self, theme: &str) -> Result<String, ThemeError>;
}
