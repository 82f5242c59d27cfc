//! On-demand page serving with a staleness budget.
//!
//! A cached page is returned as long as it is younger than the revalidation
//! budget. The first request after that re-aggregates against the repository
//! and replaces the cached copy. No timers, no push invalidation.

use crate::domain::{Page, RevalidationPolicy, Route};
use crate::ports::PageCachePort;
use crate::usecases::SiteRenderer;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSource {
    /// Served from a copy still within budget.
    Cache,
    /// Freshly aggregated (no copy, or the copy had expired).
    Rendered,
}

#[derive(Debug, Clone)]
pub struct Served {
    pub page: Page,
    pub source: PageSource,
}

pub struct PageServer {
    renderer: Arc<SiteRenderer>,
    cache: Arc<dyn PageCachePort>,
    policy: RevalidationPolicy,
}

impl PageServer {
    pub fn new(
        renderer: Arc<SiteRenderer>,
        cache: Arc<dyn PageCachePort>,
        policy: RevalidationPolicy,
    ) -> Self {
        Self {
            renderer,
            cache,
            policy,
        }
    }

    pub fn policy(&self) -> RevalidationPolicy {
        self.policy
    }

    pub async fn serve(&self, route: &Route) -> Served {
        self.serve_at(route, Utc::now()).await
    }

    pub async fn serve_at(&self, route: &Route, now: DateTime<Utc>) -> Served {
        let path = route.path();
        if let Some(page) = self.cache.get(&path).await {
            if self.policy.is_fresh(page.generated_at, now) {
                debug!(route = %path, generated_at = %page.generated_at, "cache hit");
                return Served {
                    page,
                    source: PageSource::Cache,
                };
            }
            debug!(route = %path, generated_at = %page.generated_at, "cached page expired");
        }

        let page = self.renderer.render_at(route, now).await;
        self.cache.put(page.clone()).await;
        Served {
            page,
            source: PageSource::Rendered,
        }
    }

    /// Seed the cache with pages from a pre-render batch.
    pub async fn prime(&self, pages: impl IntoIterator<Item = Page>) {
        for page in pages {
            self.cache.put(page).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::persistence::page_cache::MemoryPageCache;
    use crate::usecases::renderer::tests::{renderer, sample_repo};
    use chrono::{Duration, TimeZone};

    fn server() -> PageServer {
        PageServer::new(
            Arc::new(renderer(sample_repo())),
            Arc::new(MemoryPageCache::new()),
            RevalidationPolicy::default(),
        )
    }

    #[tokio::test]
    async fn test_serves_cached_copy_within_budget() {
        let server = server();
        let t0 = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let first = server.serve_at(&Route::BlogIndex, t0).await;
        assert_eq!(first.source, PageSource::Rendered);

        let again = server.serve_at(&Route::BlogIndex, t0 + Duration::seconds(59)).await;
        assert_eq!(again.source, PageSource::Cache);
        assert_eq!(again.page.generated_at, t0);
    }

    #[tokio::test]
    async fn test_rerenders_after_budget() {
        let server = server();
        let t0 = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        server.serve_at(&Route::Home, t0).await;

        let later = t0 + Duration::seconds(60);
        let served = server.serve_at(&Route::Home, later).await;
        assert_eq!(served.source, PageSource::Rendered);
        assert_eq!(served.page.generated_at, later);

        let cached = server.serve_at(&Route::Home, later + Duration::seconds(1)).await;
        assert_eq!(cached.source, PageSource::Cache);
    }

    #[tokio::test]
    async fn test_not_found_pages_are_cached_too() {
        let server = server();
        let t0 = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let route = Route::BlogPost("missing".into());
        assert!(server.serve_at(&route, t0).await.page.body.is_not_found());
        let again = server.serve_at(&route, t0 + Duration::seconds(1)).await;
        assert_eq!(again.source, PageSource::Cache);
    }
}
