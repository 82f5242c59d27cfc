//! Home page summary: latest posts and featured projects.

use crate::domain::metrics::reading_time;
use crate::domain::publication::short_date;
use crate::domain::relations::category_name;
use crate::domain::views::{HomeView, LatestPostCard};
use crate::domain::PostRecord;
use crate::ports::ContentRepository;
use crate::usecases::fallback::list_or_empty;
use crate::usecases::project_service::ProjectService;
use std::sync::Arc;

/// Number of cards in each home page section.
pub const HOME_SECTION_SIZE: usize = 5;

pub struct HomeService {
    repo: Arc<dyn ContentRepository>,
    projects: Arc<ProjectService>,
}

impl HomeService {
    pub fn new(repo: Arc<dyn ContentRepository>, projects: Arc<ProjectService>) -> Self {
        Self { repo, projects }
    }

    /// Both sections are read concurrently; either one degrades to empty on
    /// its own.
    pub async fn home(&self) -> HomeView {
        let (posts, featured_projects) = tokio::join!(
            self.repo.list_published_posts(Some(HOME_SECTION_SIZE)),
            self.projects.featured(HOME_SECTION_SIZE),
        );
        HomeView {
            latest_posts: list_or_empty("latest posts", posts)
                .iter()
                .map(latest_card)
                .collect(),
            featured_projects,
        }
    }
}

pub fn latest_card(record: &PostRecord) -> LatestPostCard {
    let excerpt = record.excerpt.clone().unwrap_or_default();
    LatestPostCard {
        id: record.id.clone(),
        title: record.title.clone(),
        reading_time: reading_time(record.content.as_deref(), &excerpt),
        excerpt,
        slug: record.slug.clone(),
        date: short_date(record.published_date.as_ref()),
        category: category_name(record.category.as_ref()),
    }
}
