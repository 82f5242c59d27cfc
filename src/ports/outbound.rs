//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{DomainError, Page, PostRecord, ProjectRecord};

/// Read-only content store. Rows come back with their relations joined;
/// ordering is decided here, at the query boundary.
#[async_trait::async_trait]
pub trait ContentRepository: Send + Sync {
    /// Published posts with category and tags, newest publication first.
    /// `limit = None` returns all of them.
    async fn list_published_posts(
        &self,
        limit: Option<usize>,
    ) -> Result<Vec<PostRecord>, DomainError>;

    /// A single published post by slug. `Ok(None)` when no row matches.
    async fn get_published_post(&self, slug: &str) -> Result<Option<PostRecord>, DomainError>;

    /// Projects with tags and images, newest first.
    async fn list_projects(&self, limit: Option<usize>)
    -> Result<Vec<ProjectRecord>, DomainError>;

    /// A single project by slug. `Ok(None)` when no row matches.
    async fn get_project(&self, slug: &str) -> Result<Option<ProjectRecord>, DomainError>;

    /// Slugs of published posts. Same filter as `list_published_posts`.
    async fn list_published_slugs(&self) -> Result<Vec<String>, DomainError>;

    /// Slugs of all projects.
    async fn list_project_slugs(&self) -> Result<Vec<String>, DomainError>;
}

/// Store of materialized pages, keyed by route path.
#[async_trait::async_trait]
pub trait PageCachePort: Send + Sync {
    async fn get(&self, path: &str) -> Option<Page>;

    async fn put(&self, page: Page);

    /// Drop every entry. Returns how many were removed.
    async fn clear(&self) -> usize;
}

/// Destination of pre-rendered pages.
#[async_trait::async_trait]
pub trait PageSinkPort: Send + Sync {
    /// Persist one page. Returns a human-readable location for logging.
    async fn write_page(&self, page: &Page) -> Result<String, DomainError>;
}
