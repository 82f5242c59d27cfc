//! Implements PageSinkPort by writing one JSON document per route.
//!
//! `/` -> `{out}/index.json`, `/blog/hello` -> `{out}/blog/hello/index.json`.
//! Slugs come from the content store, so every segment is checked before it
//! becomes part of a path: a page can only land in its own directory under
//! `out_dir`.

use crate::domain::{DomainError, Page};
use crate::ports::PageSinkPort;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// Non-empty, not `.`/`..`, no separators of any platform.
fn is_plain_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "."
        && segment != ".."
        && !segment.contains(['\\', '\0'])
}

/// JSON file-based page output.
pub struct JsonPageSink {
    out_dir: PathBuf,
}

impl JsonPageSink {
    pub fn new(out_dir: impl AsRef<Path>) -> Self {
        Self {
            out_dir: out_dir.as_ref().to_path_buf(),
        }
    }

    pub fn page_path(&self, route: &str) -> Result<PathBuf, DomainError> {
        let rest = route
            .strip_prefix('/')
            .ok_or_else(|| DomainError::Sink(format!("route {:?} is not absolute", route)))?;
        let mut path = self.out_dir.clone();
        if !rest.is_empty() {
            for segment in rest.split('/') {
                if !is_plain_segment(segment) {
                    return Err(DomainError::Sink(format!(
                        "route {:?} has unsafe segment {:?}",
                        route, segment
                    )));
                }
                path.push(segment);
            }
        }
        Ok(path.join("index.json"))
    }

    /// Write-replace: temp file, sync_all, rename. A reader never sees a
    /// half-written page.
    async fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), DomainError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| DomainError::Sink(format!("create {}: {}", parent.display(), e)))?;
        }
        let temp_path = path.with_extension("json.tmp");
        let mut f = fs::File::create(&temp_path)
            .await
            .map_err(|e| DomainError::Sink(format!("create temp file: {}", e)))?;
        f.write_all(bytes)
            .await
            .map_err(|e| DomainError::Sink(format!("write temp file: {}", e)))?;
        f.sync_all()
            .await
            .map_err(|e| DomainError::Sink(format!("sync temp file: {}", e)))?;
        drop(f);

        fs::rename(&temp_path, path)
            .await
            .map_err(|e| DomainError::Sink(format!("atomic rename failed: {}", e)))
    }
}

#[async_trait::async_trait]
impl PageSinkPort for JsonPageSink {
    async fn write_page(&self, page: &Page) -> Result<String, DomainError> {
        let json =
            serde_json::to_vec_pretty(page).map_err(|e| DomainError::Sink(e.to_string()))?;
        let path = self.page_path(&page.route)?;
        Self::write_atomic(&path, &json).await?;
        debug!(route = %page.route, path = %path.display(), bytes = json.len(), "page written");
        Ok(path.display().to_string())
    }
}
