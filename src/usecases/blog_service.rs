//! Blog aggregations: list page with sidebar, post detail, post metadata.
//!
//! - Reads published posts (already newest first) once per page
//! - Flattens category/tags, then derives sidebar data in memory
//! - Never fails: repository errors degrade to empty / not found

use crate::domain::metrics::{category_counts, reading_time, recent_posts, recent_tags};
use crate::domain::publication::long_date;
use crate::domain::relations::{category_name, tag_names};
use crate::domain::seo;
use crate::domain::views::{BlogIndexView, PageMetadata, PostDetailView, PostSummary};
use crate::domain::{PostRecord, SiteProfile};
use crate::ports::ContentRepository;
use crate::usecases::fallback::{item_or_none, list_or_empty};
use std::sync::Arc;
use tracing::debug;

/// Blog service. Turns joined post rows into blog view-models.
pub struct BlogService {
    repo: Arc<dyn ContentRepository>,
    site: SiteProfile,
}

impl BlogService {
    pub fn new(repo: Arc<dyn ContentRepository>, site: SiteProfile) -> Self {
        Self { repo, site }
    }

    /// Blog list page: every published post plus category counts, the three
    /// most recent posts and up to 15 recently used tags.
    pub async fn blog_index(&self) -> BlogIndexView {
        let records = list_or_empty("published posts", self.repo.list_published_posts(None).await);
        let posts: Vec<PostSummary> = records.iter().map(post_summary).collect();
        let view = BlogIndexView {
            categories: category_counts(&posts),
            recent_posts: recent_posts(&posts),
            tags: recent_tags(posts.iter().map(|p| &p.tags)),
            posts,
        };
        debug!(
            posts = view.posts.len(),
            categories = view.categories.len(),
            tags = view.tags.len(),
            "blog index aggregated"
        );
        view
    }

    /// Published post by slug, or `None` when unknown or unreadable.
    pub async fn post_detail(&self, slug: &str) -> Option<PostDetailView> {
        self.find(slug)
            .await
            .map(|record| post_detail(&record, &self.site))
    }

    /// Page metadata for a post; the fixed "not found" pair when unavailable.
    pub async fn post_metadata(&self, slug: &str) -> PageMetadata {
        match self.find(slug).await {
            Some(record) => seo::post_metadata(&record, &self.site),
            None => seo::post_not_found(),
        }
    }

    /// Metadata and detail view from a single read.
    pub async fn post_page(&self, slug: &str) -> (PageMetadata, Option<PostDetailView>) {
        match self.find(slug).await {
            Some(record) => (
                seo::post_metadata(&record, &self.site),
                Some(post_detail(&record, &self.site)),
            ),
            None => (seo::post_not_found(), None),
        }
    }

    pub fn index_metadata(&self) -> PageMetadata {
        seo::blog_index_metadata(&self.site)
    }

    /// Slugs eligible for pre-rendering. Same filter as the list page.
    pub async fn eligible_slugs(&self) -> Vec<String> {
        list_or_empty("published slugs", self.repo.list_published_slugs().await)
    }

    async fn find(&self, slug: &str) -> Option<PostRecord> {
        item_or_none("post", slug, self.repo.get_published_post(slug).await)
    }
}

/// One row of the blog list.
pub fn post_summary(record: &PostRecord) -> PostSummary {
    PostSummary {
        id: record.id.clone(),
        title: record.title.clone(),
        excerpt: record.excerpt.clone().unwrap_or_default(),
        date: long_date(record.published_date.as_ref()),
        category: category_name(record.category.as_ref()),
        tags: tag_names(&record.post_tags),
        slug: record.slug.clone(),
    }
}

pub fn post_detail(record: &PostRecord, site: &SiteProfile) -> PostDetailView {
    let excerpt = record.excerpt.clone().unwrap_or_default();
    PostDetailView {
        id: record.id.clone(),
        title: record.title.clone(),
        slug: record.slug.clone(),
        content: record.content.clone().unwrap_or_default(),
        reading_time: reading_time(record.content.as_deref(), &excerpt),
        excerpt,
        date: long_date(record.published_date.as_ref()),
        category: category_name(record.category.as_ref()),
        tags: tag_names(&record.post_tags),
        share_url: site.post_url(&record.slug),
    }
}
