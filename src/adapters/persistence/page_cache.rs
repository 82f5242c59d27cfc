//! Implements PageCachePort in memory.
//!
//! Holds the last materialized page per route path. Freshness is decided by
//! the caller (`PageServer`), not here.

use crate::domain::Page;
use crate::ports::PageCachePort;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct MemoryPageCache {
    pages: RwLock<HashMap<String, Page>>,
}

impl MemoryPageCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.pages.read().await.len()
    }
}

#[async_trait::async_trait]
impl PageCachePort for MemoryPageCache {
    async fn get(&self, path: &str) -> Option<Page> {
        self.pages.read().await.get(path).cloned()
    }

    async fn put(&self, page: Page) {
        self.pages.write().await.insert(page.route.clone(), page);
    }

    async fn clear(&self) -> usize {
        let mut pages = self.pages.write().await;
        let n = pages.len();
        pages.clear();
        n
    }
}
