//! Core domain layer. No external I/O dependencies.
//!
//! Records, view-models and the pure aggregation rules live here.

pub mod entities;
pub mod errors;
pub mod gallery;
pub mod metrics;
pub mod publication;
pub mod relations;
pub mod routes;
pub mod seo;
pub mod views;

pub use entities::{
    Category, PostRecord, PostStatus, ProjectImage, ProjectRecord, SeoOverrides, Tag, TagLink,
};
pub use errors::DomainError;
pub use publication::RevalidationPolicy;
pub use routes::Route;
pub use seo::SiteProfile;
pub use views::Page;
