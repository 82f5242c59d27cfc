//! Wiring & DI. Entry point: bootstrap adapters, inject into services, run UI.
//! No business logic here.

use dotenv::dotenv;
use folio::adapters::persistence::{InMemoryRepo, JsonPageSink, MemoryPageCache, SqliteRepo};
use folio::adapters::ui::tui::TuiInputPort;
use folio::ports::{ContentRepository, InputPort, PageCachePort, PageSinkPort};
use folio::shared::config::AppConfig;
use folio::usecases::{
    BlogService, BuildService, HomeService, PageServer, ProjectService, SiteRenderer,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    let cfg = AppConfig::load().map_err(|e| anyhow::anyhow!("{}", e))?;
    let site = cfg.site_profile();

    // --- Content source: JSON snapshot if configured, otherwise SQLite ---
    let (repo, source): (Arc<dyn ContentRepository>, String) = match cfg.content_json.as_deref() {
        Some(path) => {
            let repo = InMemoryRepo::from_json_file(path)
                .await
                .map_err(|e| anyhow::anyhow!("load content snapshot: {}", e))?;
            let repo: Arc<dyn ContentRepository> = Arc::new(repo);
            (repo, format!("snapshot {}", path))
        }
        None => {
            let repo = SqliteRepo::connect(cfg.data_dir_or_default())
                .await
                .map_err(|e| anyhow::anyhow!("SQLite connect failed: {}", e))?;
            let label = format!("sqlite {}", repo.db_path().display());
            let repo: Arc<dyn ContentRepository> = Arc::new(repo);
            (repo, label)
        }
    };

    folio::adapters::ui::init_ui(&source);

    // --- Services ---
    let blog = Arc::new(BlogService::new(Arc::clone(&repo), site.clone()));
    let projects = Arc::new(ProjectService::new(Arc::clone(&repo), site.clone()));
    let home = Arc::new(HomeService::new(Arc::clone(&repo), Arc::clone(&projects)));
    let renderer = Arc::new(SiteRenderer::new(blog, projects, home, site));

    let output_dir = PathBuf::from(cfg.output_dir_or_default());
    let sink: Arc<dyn PageSinkPort> = Arc::new(JsonPageSink::new(&output_dir));
    let concurrency = cfg.build_concurrency_or_default();
    info!(
        path = %output_dir.display(),
        concurrency,
        "pre-rendered pages go to {}", output_dir.display()
    );
    let build = Arc::new(BuildService::new(Arc::clone(&renderer), sink, concurrency));

    let policy = cfg.revalidation_policy();
    info!(
        revalidate_secs = policy.budget().as_secs(),
        "pages may be served stale for up to {}s",
        policy.budget().as_secs()
    );
    let cache: Arc<dyn PageCachePort> = Arc::new(MemoryPageCache::new());
    let server = Arc::new(PageServer::new(renderer, Arc::clone(&cache), policy));

    let input_port: Arc<dyn InputPort> = Arc::new(TuiInputPort::new(build, server, cache));

    // --- Run (main menu -> Build / Preview / Clear cache) ---
    input_port
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}
