//! Application use cases. Orchestrate domain logic via ports.

pub mod blog_service;
pub mod build_service;
mod fallback;
pub mod home_service;
pub mod page_server;
pub mod project_service;
pub mod renderer;

pub use blog_service::BlogService;
pub use build_service::{BuildProgress, BuildReport, BuildService};
pub use home_service::HomeService;
pub use page_server::{PageServer, PageSource, Served};
pub use project_service::ProjectService;
pub use renderer::SiteRenderer;
