//! View-models. Flattened, render-ready, JSON-serializable.
//!
//! Nothing here holds a relation handle; every field is owned plain data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row of the blog list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSummary {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    /// Long form ("January 5, 2024"), empty when unpublished.
    pub date: String,
    pub category: String,
    pub tags: Vec<String>,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentPost {
    pub title: String,
    pub slug: String,
}

/// Blog list page with its sidebar.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogIndexView {
    pub posts: Vec<PostSummary>,
    pub categories: Vec<CategoryCount>,
    pub recent_posts: Vec<RecentPost>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDetailView {
    pub id: String,
    pub title: String,
    pub slug: String,
    /// HTML body, empty when the record has none.
    pub content: String,
    pub excerpt: String,
    pub date: String,
    pub category: String,
    pub tags: Vec<String>,
    pub reading_time: u32,
    pub share_url: String,
}

/// Home page blog card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatestPostCard {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub slug: String,
    /// Short form ("Jan 5"), empty when unpublished.
    pub date: String,
    pub reading_time: u32,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectLinks {
    pub live: Option<String>,
    pub github: Option<String>,
    pub video: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectCard {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub main_image_url: String,
    pub main_image_alt: String,
    pub links: ProjectLinks,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryImage {
    pub id: String,
    pub url: String,
    pub alt: String,
    pub display_order: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDetailView {
    #[serde(flatten)]
    pub card: ProjectCard,
    pub description: String,
    pub gallery: Vec<GalleryImage>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectIndexView {
    pub projects: Vec<ProjectCard>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomeView {
    pub latest_posts: Vec<LatestPostCard>,
    pub featured_projects: Vec<ProjectCard>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenGraph {
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_time: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TwitterCard {
    pub card: String,
    pub title: String,
    pub description: String,
    pub creator: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
}

/// Synthesized page metadata (document title, description, social cards).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_graph: Option<OpenGraph>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<TwitterCard>,
}

impl PageMetadata {
    /// Title/description only, no social cards.
    pub fn plain(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            authors: Vec::new(),
            keywords: None,
            open_graph: None,
            twitter: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageBody {
    Home(HomeView),
    /// Static page; the presentation layer owns its content.
    About,
    BlogIndex(BlogIndexView),
    Post(PostDetailView),
    ProjectIndex(ProjectIndexView),
    Project(ProjectDetailView),
    NotFound { message: String },
}

impl PageBody {
    pub fn is_not_found(&self) -> bool {
        matches!(self, PageBody::NotFound { .. })
    }
}

/// A fully materialized page, ready for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub route: String,
    pub metadata: PageMetadata,
    pub body: PageBody,
    pub generated_at: DateTime<Utc>,
}
