//! Derived metrics over already-fetched, already-sorted post lists.
//!
//! Everything here is a pure function of its input. Ordering is established at
//! the repository boundary (publication date, newest first) and never
//! recomputed.

use crate::domain::views::{CategoryCount, PostSummary, RecentPost};
use std::collections::{HashMap, HashSet};

/// Reading rate used for estimates.
pub const WORDS_PER_MINUTE: usize = 200;
/// Number of posts shown in the "recent posts" sidebar.
pub const RECENT_POSTS_LIMIT: usize = 3;
/// Maximum number of tags in the "recent tags" cloud.
pub const RECENT_TAGS_LIMIT: usize = 15;

/// Estimated reading time in whole minutes, never below 1.
///
/// Body and excerpt are counted together. The excerpt usually repeats the
/// opening of the body; the estimate keeps counting it twice so existing
/// figures do not shift.
pub fn reading_time(content: Option<&str>, excerpt: &str) -> u32 {
    let words = content
        .unwrap_or_default()
        .split_whitespace()
        .chain(excerpt.split_whitespace())
        .count();
    words.div_ceil(WORDS_PER_MINUTE).max(1) as u32
}

/// Post count per resolved category name, in first-seen order.
pub fn category_counts(posts: &[PostSummary]) -> Vec<CategoryCount> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<CategoryCount> = Vec::new();
    for post in posts {
        match index.get(post.category.as_str()) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(post.category.as_str(), counts.len());
                counts.push(CategoryCount {
                    name: post.category.clone(),
                    count: 1,
                });
            }
        }
    }
    counts
}

/// The first [`RECENT_POSTS_LIMIT`] posts of a newest-first list.
pub fn recent_posts(posts: &[PostSummary]) -> Vec<RecentPost> {
    posts
        .iter()
        .take(RECENT_POSTS_LIMIT)
        .map(|post| RecentPost {
            title: post.title.clone(),
            slug: post.slug.clone(),
        })
        .collect()
}

/// Distinct tag names in first-seen order over a newest-first list, so tags of
/// recent posts win. Stops at [`RECENT_TAGS_LIMIT`].
pub fn recent_tags<'a, I, T>(tag_lists: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a T>,
    T: AsRef<[String]> + 'a + ?Sized,
{
    let mut seen: HashSet<&str> = HashSet::new();
    let mut tags = Vec::new();
    for tag in tag_lists.into_iter().flat_map(|list| list.as_ref()) {
        if tags.len() >= RECENT_TAGS_LIMIT {
            break;
        }
        if seen.insert(tag.as_str()) {
            tags.push(tag.clone());
        }
    }
    tags
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(slug: &str, category: &str, tags: &[&str]) -> PostSummary {
        PostSummary {
            id: slug.to_string(),
            title: slug.to_uppercase(),
            excerpt: String::new(),
            date: String::new(),
            category: category.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            slug: slug.to_string(),
        }
    }

    #[test]
    fn test_reading_time_floor_is_one_minute() {
        assert_eq!(reading_time(None, ""), 1);
        assert_eq!(reading_time(Some("   "), "  "), 1);
        assert_eq!(reading_time(Some("just a few words"), "hi"), 1);
    }

    #[test]
    fn test_reading_time_counts_body_and_excerpt() {
        let body = "word ".repeat(200);
        assert_eq!(reading_time(Some(&body), ""), 1);
        // The excerpt pushes the total over one minute.
        assert_eq!(reading_time(Some(&body), "one more"), 2);
        let long = "w\n\t".repeat(401);
        assert_eq!(reading_time(Some(&long), ""), 3);
    }

    #[test]
    fn test_reading_time_is_deterministic() {
        let body = "<p>Hello   world</p>\n<p>again</p>";
        assert_eq!(
            reading_time(Some(body), "excerpt"),
            reading_time(Some(body), "excerpt")
        );
    }

    #[test]
    fn test_category_counts_sum_to_post_count() {
        let posts = vec![
            summary("a", "Rust", &[]),
            summary("b", "Uncategorized", &[]),
            summary("c", "Rust", &[]),
            summary("d", "Web", &[]),
        ];
        let counts = category_counts(&posts);
        assert_eq!(
            counts,
            vec![
                CategoryCount { name: "Rust".into(), count: 2 },
                CategoryCount { name: "Uncategorized".into(), count: 1 },
                CategoryCount { name: "Web".into(), count: 1 },
            ]
        );
        assert_eq!(counts.iter().map(|c| c.count).sum::<usize>(), posts.len());
    }

    #[test]
    fn test_recent_posts_takes_first_three_in_order() {
        let posts: Vec<_> = ["e", "d", "c", "b", "a"]
            .iter()
            .map(|s| summary(s, "X", &[]))
            .collect();
        let recent = recent_posts(&posts);
        let slugs: Vec<_> = recent.iter().map(|r| r.slug.as_str()).collect();
        assert_eq!(slugs, vec!["e", "d", "c"]);
        assert_eq!(recent_posts(&posts[..2]).len(), 2);
        assert!(recent_posts(&[]).is_empty());
    }

    #[test]
    fn test_recent_tags_first_seen_order() {
        let posts = vec![summary("a", "X", &["x", "y"]), summary("b", "X", &["y", "z"])];
        let tags = recent_tags(posts.iter().map(|p| &p.tags));
        assert_eq!(tags, vec!["x", "y", "z"]);
    }

    #[test]
    fn test_recent_tags_capped_at_fifteen() {
        let posts: Vec<PostSummary> = (0..10)
            .map(|i| {
                let names = [format!("t{}", i * 2), format!("t{}", i * 2 + 1)];
                let refs: Vec<&str> = names.iter().map(|s| s.as_str()).collect();
                summary(&format!("p{}", i), "X", &refs)
            })
            .collect();
        let tags = recent_tags(posts.iter().map(|p| &p.tags));
        assert_eq!(tags.len(), RECENT_TAGS_LIMIT);
        assert_eq!(tags.first().map(String::as_str), Some("t0"));
        assert_eq!(tags.last().map(String::as_str), Some("t14"));
    }
}
