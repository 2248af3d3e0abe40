//! Theme stylesheets read from a directory

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use crate::application::ports::{StylesheetSource, ThemeError};

/// Reads `<themes_dir>/<theme>` from disk
#[derive(Debug, Clone)]
pub struct FsStylesheetSource {
    themes_dir: PathBuf,
}

impl FsStylesheetSource {
    pub fn new(themes_dir: impl Into<PathBuf>) -> Self {
        Self {
            themes_dir: themes_dir.into(),
        }
    }

    /// Directory themes are read from
    pub fn themes_dir(&self) -> &Path {
        &self.themes_dir
    }

    /// Resolve a theme name to a file inside the themes directory.
    /// Names must be a single path component.
    fn resolve(&self, theme: &str) -> Result<PathBuf, ThemeError> {
        let valid = !theme.is_empty()
            && theme != "."
            && theme != ".."
            && !theme.contains(['/', '\\'])
            && !theme.contains('\0');
        if !valid {
            return Err(ThemeError::InvalidName(theme.to_string()));
        }
        Ok(self.themes_dir.join(theme))
    }
}

#[async_trait]
impl StylesheetSource for FsStylesheetSource {
    async fn read(&self, theme: &str) -> Result<String, ThemeError> {
        let path = self.resolve(theme)?;
        fs::read_to_string(&path)
            .await
            .map_err(|e| ThemeError::Read {
                theme: theme.to_string(),
                message: e.to_string(),
            })
    }
}
