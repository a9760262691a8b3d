use futures::future::join_all;
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::config;

/// Public route paths whose rendered output is cached. Mutation handlers
/// invalidate these after a successful write; the next read regenerates.
pub mod routes {
    pub const HOME: &str = "/";
    pub const ABOUT: &str = "/about";
    pub const SERVICES: &str = "/services";
    pub const PROJECTS: &str = "/projects";
    pub const GALLERY: &str = "/gallery";
    pub const BLOG: &str = "/blog";
    pub const CONTACT: &str = "/contact";

    pub const ADMIN_TEAM: &str = "/admin/team";
    pub const ADMIN_SERVICES: &str = "/admin/services";
    pub const ADMIN_PROJECTS: &str = "/admin/projects";
    pub const ADMIN_GALLERY: &str = "/admin/gallery";
    pub const ADMIN_BLOG: &str = "/admin/blog";
    pub const ADMIN_CONTACT_SUBMISSIONS: &str = "/admin/contact-submissions";

    pub fn service_detail(id: &str) -> String {
        format!("{}/{}", SERVICES, id)
    }

    pub fn blog_detail(id: &str) -> String {
        format!("{}/{}", BLOG, id)
    }

    /// Site settings feed every page's chrome, so a settings change touches
    /// the whole public surface.
    pub const ALL_PUBLIC: &[&str] = &[HOME, ABOUT, SERVICES, PROJECTS, GALLERY, BLOG, CONTACT];
}

/// In-process render cache for public content routes, keyed by route path.
///
/// Invalidation is eviction: a stale entry is simply dropped and the next
/// request rebuilds it from the store.
pub struct PageCache {
    entries: RwLock<HashMap<String, Value>>,
}

impl PageCache {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub async fn get(&self, path: &str) -> Option<Value> {
        let entries = self.entries.read().await;
        entries.get(path).cloned()
    }

    pub async fn put(&self, path: &str, payload: Value) {
        let mut entries = self.entries.write().await;
        entries.insert(path.to_string(), payload);
    }

    /// Mark a route stale. Returns whether an entry was actually evicted.
    pub async fn invalidate(&self, path: &str) -> bool {
        let mut entries = self.entries.write().await;
        entries.remove(path).is_some()
    }

    pub async fn invalidate_many(&self, paths: &[&str]) {
        join_all(paths.iter().map(|path| self.invalidate(path))).await;
    }

    pub async fn invalidate_all(&self) {
        let mut entries = self.entries.write().await;
        entries.clear();
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

impl Default for PageCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Process-wide cache instance shared by content and mutation handlers
pub fn page_cache() -> &'static PageCache {
    use std::sync::OnceLock;
    static INSTANCE: OnceLock<PageCache> = OnceLock::new();
    INSTANCE.get_or_init(PageCache::new)
}

/// Whether content handlers should consult the cache at all. Invalidation is
/// always performed; it is harmless when caching is off.
pub fn enabled() -> bool {
    config::config().api.enable_page_cache
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn put_get_roundtrip() {
        let cache = PageCache::new();
        assert_eq!(cache.get(routes::PROJECTS).await, None);

        cache.put(routes::PROJECTS, json!([{"title": "Villa A"}])).await;
        assert_eq!(cache.get(routes::PROJECTS).await, Some(json!([{"title": "Villa A"}])));
    }

    #[tokio::test]
    async fn invalidate_evicts_only_named_route() {
        let cache = PageCache::new();
        cache.put(routes::PROJECTS, json!(1)).await;
        cache.put(routes::BLOG, json!(2)).await;

        assert!(cache.invalidate(routes::PROJECTS).await);
        assert_eq!(cache.get(routes::PROJECTS).await, None);
        assert_eq!(cache.get(routes::BLOG).await, Some(json!(2)));

        // Second invalidation finds nothing to evict
        assert!(!cache.invalidate(routes::PROJECTS).await);
    }

    #[tokio::test]
    async fn invalidate_many_covers_all_paths() {
        let cache = PageCache::new();
        for path in routes::ALL_PUBLIC {
            cache.put(path, json!("cached")).await;
        }
        cache.invalidate_many(routes::ALL_PUBLIC).await;
        assert_eq!(cache.len().await, 0);
    }
}
