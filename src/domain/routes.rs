//! Page routes. Slugs are the only routing key for detail pages.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    About,
    BlogIndex,
    BlogPost(String),
    ProjectIndex,
    Project(String),
}

impl Route {
    /// Routes that exist regardless of content.
    pub fn statics() -> [Route; 4] {
        [Route::Home, Route::About, Route::BlogIndex, Route::ProjectIndex]
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::About => "/about".to_string(),
            Route::BlogIndex => "/blog".to_string(),
            Route::BlogPost(slug) => format!("/blog/{}", slug),
            Route::ProjectIndex => "/projects".to_string(),
            Route::Project(slug) => format!("/projects/{}", slug),
        }
    }

    /// Inverse of [`Route::path`]. Trailing slashes are ignored.
    pub fn parse(path: &str) -> Option<Route> {
        let trimmed = path.trim().trim_matches('/');
        let mut parts = trimmed.split('/');
        let route = match (parts.next(), parts.next()) {
            (Some(""), None) => Route::Home,
            (Some("about"), None) => Route::About,
            (Some("blog"), None) => Route::BlogIndex,
            (Some("blog"), Some(slug)) if !slug.is_empty() => Route::BlogPost(slug.to_string()),
            (Some("projects"), None) => Route::ProjectIndex,
            (Some("projects"), Some(slug)) if !slug.is_empty() => Route::Project(slug.to_string()),
            _ => return None,
        };
        if parts.next().is_some() {
            return None;
        }
        Some(route)
    }

    pub fn is_detail(&self) -> bool {
        matches!(self, Route::BlogPost(_) | Route::Project(_))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
