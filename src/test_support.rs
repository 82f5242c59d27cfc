//! Shared fixtures for the unit tests.

use crate::domain::{
    Category, DomainError, PostRecord, PostStatus, ProjectImage, ProjectRecord, SeoOverrides,
    SiteProfile, Tag, TagLink,
};
use crate::ports::ContentRepository;
use chrono::{TimeZone, Utc};

pub fn site() -> SiteProfile {
    SiteProfile {
        site_url: "https://example.com".into(),
        author_name: "Ada Lovelace".into(),
        twitter_handle: "@ada".into(),
    }
}

pub fn tag(name: &str) -> TagLink {
    TagLink::to(Tag {
        id: format!("tag-{}", name),
        name: name.to_string(),
        slug: name.to_lowercase(),
    })
}

pub fn category(name: &str) -> Category {
    Category {
        id: format!("cat-{}", name),
        name: name.to_string(),
        slug: name.to_lowercase(),
    }
}

/// Published post dated `2024-01-{day}`.
pub fn post(slug: &str, day: u32, category_name: Option<&str>, tags: &[&str]) -> PostRecord {
    PostRecord {
        id: format!("post-{}", slug),
        title: format!("Title {}", slug),
        slug: slug.to_string(),
        excerpt: Some(format!("Excerpt of {}", slug)),
        content: Some(format!("<p>Body of {}</p>", slug)),
        status: PostStatus::Published,
        published_date: Some(Utc.with_ymd_and_hms(2024, 1, day, 9, 0, 0).unwrap()),
        seo: SeoOverrides::default(),
        category: category_name.map(category),
        post_tags: tags.iter().map(|t| tag(t)).collect(),
    }
}

pub fn draft(slug: &str) -> PostRecord {
    PostRecord {
        status: PostStatus::Draft,
        published_date: None,
        ..post(slug, 1, None, &[])
    }
}

/// Project created `2023-{month}-01`.
pub fn project(slug: &str, month: u32, tags: &[&str], images: &[(&str, i32)]) -> ProjectRecord {
    let id = format!("project-{}", slug);
    ProjectRecord {
        id: id.clone(),
        title: format!("Project {}", slug),
        slug: slug.to_string(),
        excerpt: Some(format!("About {}", slug)),
        description: Some(format!("<p>{}</p>", slug)),
        main_image_url: format!("https://cdn.example.com/{}.png", slug),
        main_image_alt: None,
        link: Some(format!("https://{}.example.com", slug)),
        github_link: None,
        video_url: None,
        created_at: Utc.with_ymd_and_hms(2023, month, 1, 0, 0, 0).unwrap(),
        project_tags: tags.iter().map(|t| tag(t)).collect(),
        project_images: images
            .iter()
            .map(|(image_id, order)| ProjectImage {
                id: image_id.to_string(),
                project_id: id.clone(),
                image_url: format!("https://cdn.example.com/{}.png", image_id),
                image_alt: None,
                display_order: *order,
            })
            .collect(),
    }
}

/// Repository whose every read fails, as during an outage.
pub struct FailingRepo;

fn outage() -> DomainError {
    DomainError::Repo("connection reset".into())
}

#[async_trait::async_trait]
impl ContentRepository for FailingRepo {
    async fn list_published_posts(
        &self,
        _limit: Option<usize>,
    ) -> Result<Vec<PostRecord>, DomainError> {
        Err(outage())
    }

    async fn get_published_post(&self, _slug: &str) -> Result<Option<PostRecord>, DomainError> {
        Err(outage())
    }

    async fn list_projects(
        &self,
        _limit: Option<usize>,
    ) -> Result<Vec<ProjectRecord>, DomainError> {
        Err(outage())
    }

    async fn get_project(&self, _slug: &str) -> Result<Option<ProjectRecord>, DomainError> {
        Err(outage())
    }

    async fn list_published_slugs(&self) -> Result<Vec<String>, DomainError> {
        Err(outage())
    }

    async fn list_project_slugs(&self) -> Result<Vec<String>, DomainError> {
        Err(outage())
    }
}
