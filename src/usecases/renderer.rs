//! Route -> materialized page. The single entry point used by both the
//! pre-render batch and the on-demand page server.

use crate::domain::seo::{self, SiteProfile};
use crate::domain::views::{PageBody, PageMetadata};
use crate::domain::{Page, Route};
use crate::usecases::{BlogService, HomeService, ProjectService};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::info;

pub struct SiteRenderer {
    blog: Arc<BlogService>,
    projects: Arc<ProjectService>,
    home: Arc<HomeService>,
    site: SiteProfile,
}

impl SiteRenderer {
    pub fn new(
        blog: Arc<BlogService>,
        projects: Arc<ProjectService>,
        home: Arc<HomeService>,
        site: SiteProfile,
    ) -> Self {
        Self {
            blog,
            projects,
            home,
            site,
        }
    }

    pub async fn render(&self, route: &Route) -> Page {
        self.render_at(route, Utc::now()).await
    }

    /// Aggregate one route against the repository. Never fails; unknown or
    /// unreadable content yields a `NotFound` body with its sentinel metadata.
    pub async fn render_at(&self, route: &Route, now: DateTime<Utc>) -> Page {
        let (metadata, body): (PageMetadata, PageBody) = match route {
            Route::Home => (seo::home_metadata(&self.site), PageBody::Home(self.home.home().await)),
            Route::About => (seo::about_metadata(&self.site), PageBody::About),
            Route::BlogIndex => (
                self.blog.index_metadata(),
                PageBody::BlogIndex(self.blog.blog_index().await),
            ),
            Route::BlogPost(slug) => match self.blog.post_page(slug).await {
                (metadata, Some(view)) => (metadata, PageBody::Post(view)),
                (metadata, None) => (metadata, not_found("Post Not Found")),
            },
            Route::ProjectIndex => (
                self.projects.index_metadata(),
                PageBody::ProjectIndex(self.projects.project_index().await),
            ),
            Route::Project(slug) => match self.projects.project_page(slug).await {
                (metadata, Some(view)) => (metadata, PageBody::Project(view)),
                (metadata, None) => (metadata, not_found("Project Not Found")),
            },
        };
        Page {
            route: route.path(),
            metadata,
            body,
            generated_at: now,
        }
    }

    /// Static routes plus every eligible post and project slug.
    pub async fn prerender_routes(&self) -> Vec<Route> {
        let (post_slugs, project_slugs) =
            tokio::join!(self.blog.eligible_slugs(), self.projects.eligible_slugs());
        info!(
            posts = post_slugs.len(),
            projects = project_slugs.len(),
            "pre-render routes enumerated"
        );
        Route::statics()
            .into_iter()
            .chain(post_slugs.into_iter().map(Route::BlogPost))
            .chain(project_slugs.into_iter().map(Route::Project))
            .collect()
    }
}

fn not_found(message: &str) -> PageBody {
    PageBody::NotFound {
        message: message.to_string(),
    }
}
