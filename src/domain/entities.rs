//! Domain entities. Records as the content repository hands them over.
//!
//! Joined relations are kept in their raw shape (nullable category, join-table
//! wrappers around nullable tags) so that `relations` is the single place
//! that turns absence into sentinels.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Draft,
    Published,
}

impl PostStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Published => "published",
        }
    }

    /// Parse the stored column value. Anything unknown is treated as a draft.
    pub fn from_db(value: &str) -> Self {
        match value {
            "published" => PostStatus::Published,
            _ => PostStatus::Draft,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub slug: String,
}

/// Shared vocabulary between posts and projects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    pub name: String,
    pub slug: String,
}

/// One row of a post/project tag join table. The related tag may be missing
/// (dangling foreign key, row-level security).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagLink {
    #[serde(default)]
    pub tag: Option<Tag>,
}

impl TagLink {
    pub fn to(tag: Tag) -> Self {
        Self { tag: Some(tag) }
    }

    pub fn dangling() -> Self {
        Self { tag: None }
    }
}

/// Author-supplied SEO overrides. All optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeoOverrides {
    #[serde(default)]
    pub meta_title: Option<String>,
    #[serde(default)]
    pub meta_description: Option<String>,
    #[serde(default)]
    pub focus_keyword: Option<String>,
}

/// A blog post with its joined category and tags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostRecord {
    pub id: String,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    /// Full HTML body.
    #[serde(default)]
    pub content: Option<String>,
    pub status: PostStatus,
    /// None for unpublished / unscheduled posts.
    #[serde(default)]
    pub published_date: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub seo: SeoOverrides,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub post_tags: Vec<TagLink>,
}

impl PostRecord {
    pub fn is_published(&self) -> bool {
        self.status == PostStatus::Published
    }
}

/// A gallery image row. `display_order` need not be contiguous.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectImage {
    pub id: String,
    pub project_id: String,
    pub image_url: String,
    #[serde(default)]
    pub image_alt: Option<String>,
    #[serde(default)]
    pub display_order: i32,
}

/// A portfolio project with its joined tags and gallery images.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub id: String,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    /// Full HTML description.
    #[serde(default)]
    pub description: Option<String>,
    pub main_image_url: String,
    #[serde(default)]
    pub main_image_alt: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub github_link: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub project_tags: Vec<TagLink>,
    /// Fetch order; not yet sequenced.
    #[serde(default)]
    pub project_images: Vec<ProjectImage>,
}
