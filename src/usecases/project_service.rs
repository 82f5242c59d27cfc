//! Project aggregations: list page, detail page with gallery, metadata.

use crate::domain::gallery::sequence;
use crate::domain::relations::tag_names;
use crate::domain::seo;
use crate::domain::views::{
    PageMetadata, ProjectCard, ProjectDetailView, ProjectIndexView, ProjectLinks,
};
use crate::domain::{ProjectRecord, SiteProfile};
use crate::ports::ContentRepository;
use crate::usecases::fallback::{item_or_none, list_or_empty};
use std::sync::Arc;
use tracing::debug;

/// Project service. Projects have no publication status; all are listable.
pub struct ProjectService {
    repo: Arc<dyn ContentRepository>,
    site: SiteProfile,
}

impl ProjectService {
    pub fn new(repo: Arc<dyn ContentRepository>, site: SiteProfile) -> Self {
        Self { repo, site }
    }

    /// All projects, newest first.
    pub async fn project_index(&self) -> ProjectIndexView {
        let records = list_or_empty("projects", self.repo.list_projects(None).await);
        let projects: Vec<ProjectCard> = records.iter().map(project_card).collect();
        debug!(projects = projects.len(), "project index aggregated");
        ProjectIndexView { projects }
    }

    /// The `limit` newest projects, for the home page.
    pub async fn featured(&self, limit: usize) -> Vec<ProjectCard> {
        list_or_empty("featured projects", self.repo.list_projects(Some(limit)).await)
            .iter()
            .map(project_card)
            .collect()
    }

    pub async fn project_detail(&self, slug: &str) -> Option<ProjectDetailView> {
        self.find(slug).await.map(|record| project_detail(&record))
    }

    pub async fn project_metadata(&self, slug: &str) -> PageMetadata {
        match self.find(slug).await {
            Some(record) => seo::project_metadata(&record, &self.site),
            None => seo::project_not_found(),
        }
    }

    /// Metadata and detail view from a single read.
    pub async fn project_page(&self, slug: &str) -> (PageMetadata, Option<ProjectDetailView>) {
        match self.find(slug).await {
            Some(record) => (
                seo::project_metadata(&record, &self.site),
                Some(project_detail(&record)),
            ),
            None => (seo::project_not_found(), None),
        }
    }

    pub fn index_metadata(&self) -> PageMetadata {
        seo::project_index_metadata(&self.site)
    }

    pub async fn eligible_slugs(&self) -> Vec<String> {
        list_or_empty("project slugs", self.repo.list_project_slugs().await)
    }

    async fn find(&self, slug: &str) -> Option<ProjectRecord> {
        item_or_none("project", slug, self.repo.get_project(slug).await)
    }
}

pub fn project_card(record: &ProjectRecord) -> ProjectCard {
    ProjectCard {
        id: record.id.clone(),
        title: record.title.clone(),
        slug: record.slug.clone(),
        excerpt: record.excerpt.clone().unwrap_or_default(),
        main_image_url: record.main_image_url.clone(),
        main_image_alt: record
            .main_image_alt
            .clone()
            .filter(|alt| !alt.is_empty())
            .unwrap_or_else(|| record.title.clone()),
        links: ProjectLinks {
            live: record.link.clone(),
            github: record.github_link.clone(),
            video: record.video_url.clone(),
        },
        tags: tag_names(&record.project_tags),
    }
}

pub fn project_detail(record: &ProjectRecord) -> ProjectDetailView {
    ProjectDetailView {
        card: project_card(record),
        description: record.description.clone().unwrap_or_default(),
        gallery: sequence(&record.project_images, &record.title),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::persistence::memory_repo::InMemoryRepo;
    use crate::test_support::{FailingRepo, project, site};

    fn service(projects: Vec<ProjectRecord>) -> ProjectService {
        ProjectService::new(Arc::new(InMemoryRepo::new(Vec::new(), projects)), site())
    }

    #[tokio::test]
    async fn test_index_newest_first_with_tags() {
        let svc = service(vec![
            project("old", 1, &["Rust"], &[]),
            project("new", 6, &["Web", "AI"], &[]),
        ]);
        let view = svc.project_index().await;
        let slugs: Vec<_> = view.projects.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["new", "old"]);
        assert_eq!(view.projects[0].tags, vec!["Web", "AI"]);
        assert_eq!(view.projects[0].main_image_alt, "Project new");
        assert_eq!(svc.featured(1).await.len(), 1);
    }

    #[tokio::test]
    async fn test_detail_sequences_gallery() {
        let svc = service(vec![project(
            "app",
            3,
            &[],
            &[("d", 2), ("b", 0), ("c", 1), ("a", 0)],
        )]);
        let detail = svc.project_detail("app").await.unwrap();
        let ids: Vec<_> = detail.gallery.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c", "d"]);
        assert_eq!(detail.gallery[0].alt, "Project app screenshot");
        assert_eq!(detail.description, "<p>app</p>");
    }

    #[tokio::test]
    async fn test_metadata_and_not_found() {
        let svc = service(vec![project("app", 3, &[], &[])]);
        let meta = svc.project_metadata("app").await;
        assert_eq!(meta.title, "Project app | Ada Lovelace");
        assert_eq!(meta.description, "About app");
        assert_eq!(
            meta.open_graph.unwrap().images,
            vec!["https://cdn.example.com/app.png"]
        );

        let (missing, view) = svc.project_page("nope").await;
        assert!(view.is_none());
        assert_eq!(missing.title, "Project Not Found");
    }

    #[tokio::test]
    async fn test_repository_failure_degrades() {
        let svc = ProjectService::new(Arc::new(FailingRepo), site());
        assert!(svc.project_index().await.projects.is_empty());
        assert!(svc.project_detail("app").await.is_none());
        assert!(svc.eligible_slugs().await.is_empty());
    }
}
