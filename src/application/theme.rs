//! Memoizing theme stylesheet loader

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing::debug;

use super::ports::{StylesheetSource, ThemeError};

/// Theme stylesheet cache.
///
/// The first load of a theme reads it from the source; later loads are
/// served from memory. Entries are never evicted. Share one instance for
/// the life of the process.
pub struct ThemeCache<S: StylesheetSource> {
    source: S,
    entries: Mutex<HashMap<String, Arc<str>>>,
}

impl<S: StylesheetSource> ThemeCache<S> {
    /// Create an empty cache over a stylesheet source
    pub fn new(source: S) -> Self {
        Self {
            source,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Load a theme's stylesheet.
    ///
    /// A cache hit still yields to the scheduler once before completing.
    /// Read failures are returned and not cached.
    pub async fn load(&self, theme: &str) -> Result<Arc<str>, ThemeError> {
        if let Some(css) = self.cached(theme) {
            tokio::task::yield_now().await;
            debug!(theme, "theme cache hit");
            return Ok(css);
        }

        let css: Arc<str> = Arc::from(self.source.read(theme).await?);
        debug!(theme, bytes = css.len(), "theme loaded");

        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(theme.to_string(), Arc::clone(&css));

        Ok(css)
    }

    /// Whether a theme is already cached
    pub fn contains(&self, theme: &str) -> bool {
        self.cached(theme).is_some()
    }

    /// Number of cached themes
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Whether nothing is cached yet
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every cached entry
    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }

    fn cached(&self, theme: &str) -> Option<Arc<str>> {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(theme)
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use futures_util::FutureExt;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockSource {
        reads: AtomicUsize,
    }

    impl MockSource {
        fn new() -> Self {
            Self {
                reads: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl StylesheetSource for MockSource {
        async fn read(&self, theme: &str) -> Result<String, ThemeError> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            match theme {
                "missing.css" => Err(ThemeError::Read {
                    theme: theme.to_string(),
                    message: "No such file or directory".to_string(),
                }),
                _ => Ok(format!(".{} {{ color: red; }}", theme)),
            }
        }
    }

    #[tokio::test]
    async fn first_load_reads_source() {
        let cache = ThemeCache::new(MockSource::new());
        let css = cache.load("jackedup.css").await.unwrap();
        assert_eq!(&*css, ".jackedup.css { color: red; }");
        assert_eq!(cache.source.reads.load(Ordering::SeqCst), 1);
        assert!(cache.contains("jackedup.css"));
    }

    #[tokio::test]
    async fn second_load_is_served_from_cache() {
        let cache = ThemeCache::new(MockSource::new());
        let first = cache.load("jackedup.css").await.unwrap();
        let second = cache.load("jackedup.css").await.unwrap();

        assert_eq!(first, second);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.source.reads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn cache_hit_does_not_complete_inline() {
        let cache = ThemeCache::new(MockSource::new());
        cache.load("jackedup.css").await.unwrap();

        // The first poll must yield even though the entry is cached
        assert!(cache.load("jackedup.css").now_or_never().is_none());
        assert_eq!(cache.source.reads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn themes_are_cached_separately() {
        let cache = ThemeCache::new(MockSource::new());
        cache.load("a.css").await.unwrap();
        cache.load("b.css").await.unwrap();
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.source.reads.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn failures_are_returned_and_not_cached() {
        let cache = ThemeCache::new(MockSource::new());
        let first = cache.load("missing.css").await;
        let second = cache.load("missing.css").await;

        assert!(matches!(first, Err(ThemeError::Read { .. })));
        assert!(second.is_err());
        assert!(cache.is_empty());
        assert_eq!(cache.source.reads.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn clear_forces_reread() {
        let cache = ThemeCache::new(MockSource::new());
        cache.load("a.css").await.unwrap();
        cache.clear();
        assert!(cache.is_empty());
        cache.load("a.css").await.unwrap();
        assert_eq!(cache.source.reads.load(Ordering::SeqCst), 2);
    }
}
