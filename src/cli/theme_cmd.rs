//! Theme command handler

use crate::application::ports::{StylesheetSource, ThemeError};
use crate::application::ThemeCache;

use super::presenter::Presenter;

/// Print a theme stylesheet through the cache
pub async fn handle_theme_command<S: StylesheetSource>(
    name: &str,
    cache: &ThemeCache<S>,
    presenter: &Presenter,
) -> Result<(), ThemeError> {
    let css = cache.load(name).await?;
    presenter.output(css.trim_end());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::FsStylesheetSource;
    use tempfile::TempDir;

    #[tokio::test]
    async fn prints_and_caches_theme() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("flatty.css"), ".humane-flatty {}\n").unwrap();
        let cache = ThemeCache::new(FsStylesheetSource::new(dir.path()));

        handle_theme_command("flatty.css", &cache, &Presenter::new())
            .await
            .unwrap();
        assert!(cache.contains("flatty.css"));
    }

    #[tokio::test]
    async fn missing_theme_fails() {
        let dir = TempDir::new().unwrap();
        let cache = ThemeCache::new(FsStylesheetSource::new(dir.path()));

        let result = handle_theme_command("nope.css", &cache, &Presenter::new()).await;
        assert!(matches!(result, Err(ThemeError::Read { .. })));
        assert!(cache.is_empty());
    }
}
