//! SEO metadata synthesis with fallback chains.
//!
//! Author overrides win; otherwise the item's own fields are used. The
//! description always resolves to a string, never to "nothing".

use crate::domain::publication::to_iso_timestamp;
use crate::domain::views::{OpenGraph, PageMetadata, TwitterCard};
use crate::domain::{PostRecord, ProjectRecord};

const TWITTER_CARD: &str = "summary_large_image";
const OG_ARTICLE: &str = "article";

pub const POST_NOT_FOUND_TITLE: &str = "Post Not Found";
pub const POST_NOT_FOUND_DESCRIPTION: &str = "The requested blog post could not be found.";
pub const PROJECT_NOT_FOUND_TITLE: &str = "Project Not Found";
pub const PROJECT_NOT_FOUND_DESCRIPTION: &str = "The requested project could not be found.";

/// Site identity used for author, social and share fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteProfile {
    /// Absolute base URL without trailing slash.
    pub site_url: String,
    pub author_name: String,
    pub twitter_handle: String,
}

impl SiteProfile {
    pub fn post_url(&self, slug: &str) -> String {
        format!("{}/blog/{}", self.site_url.trim_end_matches('/'), slug)
    }
}

/// First non-empty value of the chain. Empty strings count as absent.
fn first_present<'a>(candidates: &[Option<&'a str>]) -> Option<&'a str> {
    candidates
        .iter()
        .flatten()
        .copied()
        .find(|value| !value.is_empty())
}

/// `meta_title`, else the post title.
pub fn resolve_title(record: &PostRecord) -> String {
    first_present(&[record.seo.meta_title.as_deref()])
        .unwrap_or(record.title.as_str())
        .to_string()
}

/// `meta_description`, else the excerpt, else "".
pub fn resolve_description(record: &PostRecord) -> String {
    first_present(&[
        record.seo.meta_description.as_deref(),
        record.excerpt.as_deref(),
    ])
    .unwrap_or_default()
    .to_string()
}

/// Metadata for a published post. The publication timestamp doubles as the
/// modification time; no separate edit time is tracked.
pub fn post_metadata(record: &PostRecord, site: &SiteProfile) -> PageMetadata {
    let title = resolve_title(record);
    let description = resolve_description(record);
    let published = record.published_date.as_ref().map(to_iso_timestamp);

    PageMetadata {
        title: title.clone(),
        description: description.clone(),
        authors: vec![site.author_name.clone()],
        keywords: first_present(&[record.seo.focus_keyword.as_deref()]).map(String::from),
        open_graph: Some(OpenGraph {
            title: title.clone(),
            description: description.clone(),
            kind: OG_ARTICLE.to_string(),
            published_time: published.clone(),
            modified_time: published,
            authors: vec![site.author_name.clone()],
            images: Vec::new(),
        }),
        twitter: Some(TwitterCard {
            card: TWITTER_CARD.to_string(),
            title,
            description,
            creator: site.twitter_handle.clone(),
            images: Vec::new(),
        }),
    }
}

/// Metadata for a project: "{title} | {author}", excerpt, main image as card.
pub fn project_metadata(record: &ProjectRecord, site: &SiteProfile) -> PageMetadata {
    let title = format!("{} | {}", record.title, site.author_name);
    let description = record.excerpt.clone().unwrap_or_default();
    let images = vec![record.main_image_url.clone()];

    PageMetadata {
        title: title.clone(),
        description: description.clone(),
        authors: vec![site.author_name.clone()],
        keywords: None,
        open_graph: Some(OpenGraph {
            title: title.clone(),
            description: description.clone(),
            kind: OG_ARTICLE.to_string(),
            published_time: None,
            modified_time: None,
            authors: Vec::new(),
            images: images.clone(),
        }),
        twitter: Some(TwitterCard {
            card: TWITTER_CARD.to_string(),
            title,
            description,
            creator: site.twitter_handle.clone(),
            images,
        }),
    }
}

pub fn post_not_found() -> PageMetadata {
    PageMetadata::plain(POST_NOT_FOUND_TITLE, POST_NOT_FOUND_DESCRIPTION)
}

pub fn project_not_found() -> PageMetadata {
    PageMetadata::plain(PROJECT_NOT_FOUND_TITLE, PROJECT_NOT_FOUND_DESCRIPTION)
}

/// Fixed metadata of the blog list page.
pub fn blog_index_metadata(site: &SiteProfile) -> PageMetadata {
    PageMetadata::plain(
        format!("Blog - {}", site.author_name),
        "Articles and insights on web development, mobile apps, and AI systems.",
    )
}

/// Fixed metadata of the project list page, with social cards.
pub fn project_index_metadata(site: &SiteProfile) -> PageMetadata {
    let title = format!("Projects | {}", site.author_name);
    let description = "Browse my portfolio of web and mobile development projects, including AI applications, full-stack solutions, and more.";
    PageMetadata {
        title: title.clone(),
        description: description.to_string(),
        authors: Vec::new(),
        keywords: None,
        open_graph: Some(OpenGraph {
            title: title.clone(),
            description: description.to_string(),
            kind: "website".to_string(),
            published_time: None,
            modified_time: None,
            authors: Vec::new(),
            images: Vec::new(),
        }),
        twitter: Some(TwitterCard {
            card: TWITTER_CARD.to_string(),
            title,
            description: description.to_string(),
            creator: site.twitter_handle.clone(),
            images: Vec::new(),
        }),
    }
}

/// Fixed metadata of the about page.
pub fn about_metadata(site: &SiteProfile) -> PageMetadata {
    PageMetadata::plain(
        format!("About - {}", site.author_name),
        "Learn more about my tech stack, freelance work, and GitHub activity.",
    )
}

pub fn home_metadata(site: &SiteProfile) -> PageMetadata {
    PageMetadata::plain(
        site.author_name.clone(),
        format!("Portfolio and blog of {}.", site.author_name),
    )
}
