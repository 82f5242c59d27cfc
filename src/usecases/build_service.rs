//! Pre-render batch: enumerate eligible routes, materialize each one
//! independently and concurrently, write every page to the sink.
//!
//! Pages share nothing; the only bound is `concurrency` in-flight renders.

use crate::domain::{DomainError, Page, Route};
use crate::ports::PageSinkPort;
use crate::usecases::SiteRenderer;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Semaphore, mpsc};
use tokio::task::{Id, JoinSet};
use tracing::{error, info, warn};

/// Default number of concurrent page builds.
pub const DEFAULT_BUILD_CONCURRENCY: usize = 8;

/// Progress event sent once per finished route.
#[derive(Debug, Clone)]
pub struct BuildProgress {
    pub route: String,
    pub done: usize,
    pub total: usize,
}

#[derive(Debug, Default)]
pub struct BuildReport {
    pub pages_written: usize,
    /// Enumerated slugs whose content had vanished by render time.
    pub not_found: Vec<String>,
    /// (route, error) for pages that could not be written.
    pub failed: Vec<(String, String)>,
    /// Every page that was written, for cache priming.
    pub pages: Vec<Page>,
}

pub struct BuildService {
    renderer: Arc<SiteRenderer>,
    sink: Arc<dyn PageSinkPort>,
    concurrency: usize,
}

enum Outcome {
    Written(Page),
    NotFound(String),
    Failed(String, DomainError),
}

impl BuildService {
    pub fn new(
        renderer: Arc<SiteRenderer>,
        sink: Arc<dyn PageSinkPort>,
        concurrency: usize,
    ) -> Self {
        Self {
            renderer,
            sink,
            concurrency: concurrency.max(1),
        }
    }

    /// Build every pre-render route.
    pub async fn build_all(
        &self,
        progress: Option<mpsc::UnboundedSender<BuildProgress>>,
    ) -> BuildReport {
        let routes = self.renderer.prerender_routes().await;
        self.build_routes(routes, progress).await
    }

    pub async fn build_routes(
        &self,
        routes: Vec<Route>,
        progress: Option<mpsc::UnboundedSender<BuildProgress>>,
    ) -> BuildReport {
        let total = routes.len();
        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let mut tasks = JoinSet::new();
        // Task id -> route path, so a panicked task is still attributable.
        let mut in_flight: HashMap<Id, String> = HashMap::with_capacity(total);

        for route in routes {
            let sem = Arc::clone(&semaphore);
            let renderer = Arc::clone(&self.renderer);
            let sink = Arc::clone(&self.sink);
            let path = route.path();
            let task_path = path.clone();
            let handle = tasks.spawn(async move {
                let path = task_path;
                let Ok(_permit) = sem.acquire().await else {
                    return Outcome::Failed(path, DomainError::Sink("build cancelled".into()));
                };
                let page = renderer.render(&route).await;
                // A slug enumerated a moment ago may be gone now; nothing to publish.
                if route.is_detail() && page.body.is_not_found() {
                    return Outcome::NotFound(path);
                }
                match sink.write_page(&page).await {
                    Ok(_) => Outcome::Written(page),
                    Err(e) => Outcome::Failed(path, e),
                }
            });
            in_flight.insert(handle.id(), path);
        }

        let mut report = BuildReport::default();
        let mut done = 0usize;
        while let Some(joined) = tasks.join_next_with_id().await {
            done += 1;
            let route = match joined {
                Ok((_, Outcome::Written(page))) => {
                    report.pages_written += 1;
                    let route = page.route.clone();
                    report.pages.push(page);
                    route
                }
                Ok((_, Outcome::NotFound(route))) => {
                    warn!(route = %route, "content disappeared during build; skipped");
                    report.not_found.push(route.clone());
                    route
                }
                Ok((_, Outcome::Failed(route, e))) => {
                    error!(route = %route, error = %e, "page build failed");
                    report.failed.push((route.clone(), e.to_string()));
                    route
                }
                Err(e) => {
                    let route = in_flight
                        .remove(&e.id())
                        .unwrap_or_else(|| format!("task {}", e.id()));
                    error!(route = %route, error = %e, "page build task panicked");
                    report.failed.push((route.clone(), e.to_string()));
                    route
                }
            };
            if let Some(tx) = &progress {
                let _ = tx.send(BuildProgress { route, done, total });
            }
        }

        info!(
            written = report.pages_written,
            not_found = report.not_found.len(),
            failed = report.failed.len(),
            "build finished"
        );
        report
    }
}
