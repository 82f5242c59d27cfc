//! Relation flattening: joined rows -> plain names.
//!
//! This is the only place where a missing category or a dangling tag link is
//! resolved. Consumers get a `String` and a `Vec<String>`, never an `Option`.

use crate::domain::{Category, Tag, TagLink};
use std::collections::HashSet;

/// Label used when a post has no category.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Resolve the category name, or the `Uncategorized` sentinel when absent.
pub fn category_name(category: Option<&Category>) -> String {
    category
        .map(|c| c.name.clone())
        .unwrap_or_else(|| UNCATEGORIZED.to_string())
}

/// Resolve the linked tags in join order. Dangling links are skipped and a tag
/// linked twice is kept once (first occurrence wins).
pub fn linked_tags(links: &[TagLink]) -> Vec<&Tag> {
    let mut seen: HashSet<&str> = HashSet::new();
    links
        .iter()
        .filter_map(|link| link.tag.as_ref())
        .filter(|tag| seen.insert(tag.id.as_str()))
        .collect()
}

/// Tag names in join order. See [`linked_tags`].
pub fn tag_names(links: &[TagLink]) -> Vec<String> {
    linked_tags(links)
        .into_iter()
        .map(|tag| tag.name.clone())
        .collect()
}
