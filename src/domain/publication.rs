//! Publication gate, revalidation policy and date presentation.

use crate::domain::PostRecord;
use chrono::{DateTime, SecondsFormat, Utc};
use std::time::Duration;

/// Default freshness budget of a materialized page, in seconds.
pub const DEFAULT_REVALIDATE_SECS: u64 = 60;

/// Only published posts are ever surfaced. Projects carry no status and are
/// always listable.
pub fn is_listable(post: &PostRecord) -> bool {
    post.is_published()
}

/// Drop everything the gate rejects, preserving order.
pub fn published_only(posts: Vec<PostRecord>) -> Vec<PostRecord> {
    posts.into_iter().filter(is_listable).collect()
}

/// How long a materialized page may be served before the next request
/// re-aggregates it. A staleness tolerance; there is no push invalidation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevalidationPolicy {
    budget: Duration,
}

impl RevalidationPolicy {
    pub fn new(budget: Duration) -> Self {
        Self { budget }
    }

    pub fn from_secs(secs: u64) -> Self {
        Self::new(Duration::from_secs(secs))
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// True while `now - generated_at` is strictly below the budget. A clock
    /// that went backwards counts as fresh.
    pub fn is_fresh(&self, generated_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        match (now - generated_at).to_std() {
            Ok(age) => age < self.budget,
            Err(_) => true,
        }
    }
}

impl Default for RevalidationPolicy {
    fn default() -> Self {
        Self::from_secs(DEFAULT_REVALIDATE_SECS)
    }
}

/// "January 5, 2024"; empty for unpublished content.
pub fn long_date(date: Option<&DateTime<Utc>>) -> String {
    date.map(|d| d.format("%B %-d, %Y").to_string())
        .unwrap_or_default()
}

/// "Jan 5"; empty for unpublished content.
pub fn short_date(date: Option<&DateTime<Utc>>) -> String {
    date.map(|d| d.format("%b %-d").to_string())
        .unwrap_or_default()
}

/// RFC 3339 in UTC with millisecond precision, e.g. `2024-01-05T10:00:00.000Z`.
pub fn to_iso_timestamp(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}
