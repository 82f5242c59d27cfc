//! Application configuration. Content source, output, site identity.

use crate::domain::publication::DEFAULT_REVALIDATE_SECS;
use crate::domain::{DomainError, RevalidationPolicy, SiteProfile};
use crate::usecases::build_service::DEFAULT_BUILD_CONCURRENCY;
use serde::Deserialize;

const DEFAULT_DATA_DIR: &str = "./data";
const DEFAULT_OUTPUT_DIR: &str = "./out";
const DEFAULT_SITE_URL: &str = "https://gwinyai.com";
const DEFAULT_AUTHOR: &str = "Gwinyai Nyatsoka";
const DEFAULT_TWITTER: &str = "@Pauththesage";

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Directory holding `content.db`. Read from FOLIO_DATA_DIR.
    #[serde(default)]
    pub data_dir: Option<String>,

    /// JSON content snapshot. When set it is used instead of SQLite. Read from FOLIO_CONTENT_JSON.
    #[serde(default)]
    pub content_json: Option<String>,

    /// Where pre-rendered pages are written. Read from FOLIO_OUTPUT_DIR.
    #[serde(default)]
    pub output_dir: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // Site identity
    // ─────────────────────────────────────────────────────────────────────────
    /// Public base URL used for share links. Read from FOLIO_SITE_URL or NEXT_PUBLIC_SITE_URL.
    #[serde(default)]
    pub site_url: Option<String>,

    #[serde(default)]
    pub author_name: Option<String>,

    #[serde(default)]
    pub twitter_handle: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // Page generation
    // ─────────────────────────────────────────────────────────────────────────
    /// Seconds a materialized page may be served before re-aggregation (default 60).
    #[serde(default)]
    pub revalidate_secs: Option<u64>,

    /// Concurrent page builds in a pre-render batch (default 8).
    #[serde(default)]
    pub build_concurrency: Option<usize>,
}

impl AppConfig {
    pub fn load() -> Result<Self, DomainError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        if let Ok(path) = std::env::var("FOLIO_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        // Environment wins over the file.
        c = c.add_source(config::Environment::with_prefix("FOLIO"));
        let mut cfg: Self = c
            .build()
            .and_then(|built| built.try_deserialize())
            .map_err(|e| DomainError::Config(e.to_string()))?;
        // NEXT_PUBLIC_SITE_URL is honoured so the same .env serves both the site and the builder.
        if cfg.site_url.is_none() {
            cfg.site_url = std::env::var("NEXT_PUBLIC_SITE_URL").ok();
        }
        if cfg.revalidate_secs == Some(0) {
            return Err(DomainError::Config(
                "FOLIO_REVALIDATE_SECS must be greater than 0".into(),
            ));
        }
        Ok(cfg)
    }

    pub fn data_dir_or_default(&self) -> &str {
        self.data_dir.as_deref().unwrap_or(DEFAULT_DATA_DIR)
    }

    pub fn output_dir_or_default(&self) -> &str {
        self.output_dir.as_deref().unwrap_or(DEFAULT_OUTPUT_DIR)
    }

    /// Returns the revalidation budget in seconds. Defaults to 60.
    pub fn revalidate_secs_or_default(&self) -> u64 {
        self.revalidate_secs.unwrap_or(DEFAULT_REVALIDATE_SECS)
    }

    pub fn revalidation_policy(&self) -> RevalidationPolicy {
        RevalidationPolicy::from_secs(self.revalidate_secs_or_default())
    }

    pub fn build_concurrency_or_default(&self) -> usize {
        self.build_concurrency
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_BUILD_CONCURRENCY)
    }

    pub fn site_profile(&self) -> SiteProfile {
        SiteProfile {
            site_url: self
                .site_url
                .clone()
                .unwrap_or_else(|| DEFAULT_SITE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            author_name: self
                .author_name
                .clone()
                .unwrap_or_else(|| DEFAULT_AUTHOR.to_string()),
            twitter_handle: self
                .twitter_handle
                .clone()
                .unwrap_or_else(|| DEFAULT_TWITTER.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.revalidate_secs_or_default(), 60);
        assert_eq!(cfg.build_concurrency_or_default(), DEFAULT_BUILD_CONCURRENCY);
        assert_eq!(cfg.output_dir_or_default(), "./out");
        assert_eq!(cfg.site_profile().author_name, "Gwinyai Nyatsoka");
    }

    #[test]
    fn test_overrides() {
        let cfg = AppConfig {
            site_url: Some("https://blog.example.org/".into()),
            revalidate_secs: Some(300),
            build_concurrency: Some(0),
            ..Default::default()
        };
        assert_eq!(cfg.site_profile().site_url, "https://blog.example.org");
        assert_eq!(
            cfg.revalidation_policy().budget(),
            std::time::Duration::from_secs(300)
        );
        assert_eq!(cfg.build_concurrency_or_default(), DEFAULT_BUILD_CONCURRENCY);
    }
}
