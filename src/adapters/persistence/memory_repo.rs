//! Implements ContentRepository over records held in memory.
//!
//! Loaded from a JSON content snapshot (`{"posts": [...], "projects": [...]}`)
//! or built directly from records. Applies the same filters and ordering as
//! the SQLite adapter so both sources are interchangeable.

use crate::domain::publication::published_only;
use crate::domain::{DomainError, PostRecord, ProjectRecord};
use crate::ports::ContentRepository;
use serde::Deserialize;
use std::cmp::Reverse;
use std::path::Path;
use tokio::fs;
use tracing::info;

/// On-disk shape of a content snapshot.
#[derive(Debug, Default, Deserialize)]
struct ContentSnapshot {
    #[serde(default)]
    posts: Vec<PostRecord>,
    #[serde(default)]
    projects: Vec<ProjectRecord>,
}

/// In-memory content store.
pub struct InMemoryRepo {
    /// Published only, undated first, then newest publication first.
    posts: Vec<PostRecord>,
    /// Newest first.
    projects: Vec<ProjectRecord>,
}

impl InMemoryRepo {
    pub fn new(posts: Vec<PostRecord>, projects: Vec<ProjectRecord>) -> Self {
        let mut posts = published_only(posts);
        // Stable: equal dates keep insertion order. `None` sorts ahead of every date.
        posts.sort_by_key(|p| (p.published_date.is_some(), Reverse(p.published_date)));
        let mut projects = projects;
        projects.sort_by_key(|p| Reverse(p.created_at));
        Self { posts, projects }
    }

    /// Parse a JSON snapshot file.
    pub async fn from_json_file(path: impl AsRef<Path>) -> Result<Self, DomainError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .await
            .map_err(|e| DomainError::Repo(format!("read {}: {}", path.display(), e)))?;
        let repo = Self::from_json_str(&raw)?;
        info!(
            path = %path.display(),
            posts = repo.posts.len(),
            projects = repo.projects.len(),
            "loaded content snapshot"
        );
        Ok(repo)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, DomainError> {
        let snapshot: ContentSnapshot =
            serde_json::from_str(raw).map_err(|e| DomainError::Repo(e.to_string()))?;
        Ok(Self::new(snapshot.posts, snapshot.projects))
    }
}

fn take<T: Clone>(items: &[T], limit: Option<usize>) -> Vec<T> {
    let n = limit.unwrap_or(items.len()).min(items.len());
    items[..n].to_vec()
}

#[async_trait::async_trait]
impl ContentRepository for InMemoryRepo {
    async fn list_published_posts(
        &self,
        limit: Option<usize>,
    ) -> Result<Vec<PostRecord>, DomainError> {
        Ok(take(&self.posts, limit))
    }

    async fn get_published_post(&self, slug: &str) -> Result<Option<PostRecord>, DomainError> {
        Ok(self.posts.iter().find(|p| p.slug == slug).cloned())
    }

    async fn list_projects(
        &self,
        limit: Option<usize>,
    ) -> Result<Vec<ProjectRecord>, DomainError> {
        Ok(take(&self.projects, limit))
    }

    async fn get_project(&self, slug: &str) -> Result<Option<ProjectRecord>, DomainError> {
        Ok(self.projects.iter().find(|p| p.slug == slug).cloned())
    }

    async fn list_published_slugs(&self) -> Result<Vec<String>, DomainError> {
        Ok(self.posts.iter().map(|p| p.slug.clone()).collect())
    }

    async fn list_project_slugs(&self) -> Result<Vec<String>, DomainError> {
        Ok(self.projects.iter().map(|p| p.slug.clone()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::post;

    fn undated(slug: &str) -> PostRecord {
        PostRecord {
            published_date: None,
            ..post(slug, 1, None, &[])
        }
    }

    const SNAPSHOT: &str = r#"{
        "posts": [
            {"id": "1", "title": "Old", "slug": "old", "status": "published",
             "published_date": "2023-05-01T00:00:00Z"},
            {"id": "2", "title": "Draft", "slug": "draft", "status": "draft"},
            {"id": "3", "title": "New", "slug": "new", "status": "published",
             "published_date": "2024-02-01T08:00:00Z", "meta_title": "Newest",
             "category": {"id": "c", "name": "Rust", "slug": "rust"},
             "post_tags": [{"tag": {"id": "t", "name": "async", "slug": "async"}}, {"tag": null}]},
            {"id": "4", "title": "Undated", "slug": "undated", "status": "published"}
        ],
        "projects": [
            {"id": "p1", "title": "First", "slug": "first", "main_image_url": "a.png",
             "created_at": "2022-01-01T00:00:00Z"},
            {"id": "p2", "title": "Second", "slug": "second", "main_image_url": "b.png",
             "created_at": "2023-01-01T00:00:00Z",
             "project_images": [{"id": "i", "project_id": "p2", "image_url": "i.png", "display_order": 3}]}
        ]
    }"#;

    #[tokio::test]
    async fn test_snapshot_filters_and_orders() {
        let repo = InMemoryRepo::from_json_str(SNAPSHOT).unwrap();
        let slugs = repo.list_published_slugs().await.unwrap();
        assert_eq!(slugs, vec!["undated", "new", "old"]);

        let newest = repo.get_published_post("new").await.unwrap().unwrap();
        assert_eq!(newest.seo.meta_title.as_deref(), Some("Newest"));
        assert_eq!(newest.post_tags.len(), 2);
        assert!(repo.get_published_post("draft").await.unwrap().is_none());

        let projects = repo.list_projects(Some(1)).await.unwrap();
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].slug, "second");
        assert_eq!(projects[0].project_images[0].display_order, 3);
    }

    #[tokio::test]
    async fn test_limit_larger_than_content() {
        let repo = InMemoryRepo::from_json_str(SNAPSHOT).unwrap();
        assert_eq!(repo.list_published_posts(Some(50)).await.unwrap().len(), 3);
        assert_eq!(repo.list_project_slugs().await.unwrap(), vec!["second", "first"]);
    }

    #[tokio::test]
    async fn test_undated_posts_lead_like_sqlite() {
        let repo = InMemoryRepo::new(
            vec![
                post("dated", 3, None, &[]),
                undated("first-undated"),
                post("older", 1, None, &[]),
                undated("second-undated"),
            ],
            vec![],
        );
        assert_eq!(
            repo.list_published_slugs().await.unwrap(),
            vec!["first-undated", "second-undated", "dated", "older"]
        );
        let recent = repo.list_published_posts(Some(1)).await.unwrap();
        assert_eq!(recent[0].slug, "first-undated");
    }

    #[test]
    fn test_malformed_snapshot_is_repo_error() {
        let err = InMemoryRepo::from_json_str("{ nope").err().unwrap();
        assert!(matches!(err, DomainError::Repo(_)));
    }
}
