//! Implements InputPort. Inquire-based interactive menu.
//!
//! Build the whole site, preview a single route through the page server, or
//! drop cached pages.

use crate::adapters::ui::progress::spawn_build_bar;
use crate::domain::{DomainError, Route};
use crate::ports::{InputPort, PageCachePort};
use crate::usecases::{BuildReport, BuildService, PageServer, PageSource};
use async_trait::async_trait;
use inquire::ui::{Color, RenderConfig, StyleSheet, Styled};
use inquire::{Select, Text};
use std::fmt;
use std::sync::Arc;
use tracing::info;

/// Applies the prompt theme for all subsequent inquire prompts.
pub fn apply_theme() {
    let config = RenderConfig::default()
        .with_prompt_prefix(Styled::new("›").with_fg(Color::LightYellow))
        .with_highlighted_option_prefix(Styled::new("▸").with_fg(Color::LightYellow))
        .with_selected_option(Some(StyleSheet::new().with_fg(Color::LightYellow)));
    inquire::set_global_render_config(config);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuItem {
    BuildAll,
    Preview,
    ClearCache,
    Quit,
}

impl MenuItem {
    const ALL: [MenuItem; 4] = [
        MenuItem::BuildAll,
        MenuItem::Preview,
        MenuItem::ClearCache,
        MenuItem::Quit,
    ];
}

impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MenuItem::BuildAll => "Build all pages",
            MenuItem::Preview => "Preview a route",
            MenuItem::ClearCache => "Clear page cache",
            MenuItem::Quit => "Quit",
        };
        f.write_str(label)
    }
}

fn ui_err(e: impl fmt::Display) -> DomainError {
    DomainError::Ui(e.to_string())
}

/// TUI adapter. Inquire prompts.
pub struct TuiInputPort {
    build: Arc<BuildService>,
    server: Arc<PageServer>,
    cache: Arc<dyn PageCachePort>,
}

impl TuiInputPort {
    pub fn new(
        build: Arc<BuildService>,
        server: Arc<PageServer>,
        cache: Arc<dyn PageCachePort>,
    ) -> Self {
        Self {
            build,
            server,
            cache,
        }
    }

    async fn run_build(&self) -> Result<(), DomainError> {
        let (tx, bar) = spawn_build_bar();
        let report = self.build.build_all(Some(tx)).await;
        bar.await.map_err(ui_err)?;
        print_report(&report);
        self.server.prime(report.pages).await;
        Ok(())
    }

    async fn run_preview(&self) -> Result<(), DomainError> {
        let path = Text::new("Route path:")
            .with_default("/blog")
            .with_help_message("/, /about, /blog, /blog/<slug>, /projects, /projects/<slug>")
            .prompt()
            .map_err(ui_err)?;
        let Some(route) = Route::parse(&path) else {
            println!("Unknown route: {}", path);
            return Ok(());
        };
        let served = self.server.serve(&route).await;
        let json = serde_json::to_string_pretty(&served.page).map_err(ui_err)?;
        println!("{}", json);
        let source = match served.source {
            PageSource::Cache => "cache",
            PageSource::Rendered => "fresh render",
        };
        println!(
            "-- {} served from {} (generated {}, budget {}s)",
            route,
            source,
            served.page.generated_at,
            self.server.policy().budget().as_secs()
        );
        Ok(())
    }
}

fn print_report(report: &BuildReport) {
    println!("Pages written: {}", report.pages_written);
    if !report.not_found.is_empty() {
        println!("Skipped (content gone): {}", report.not_found.join(", "));
    }
    for (route, error) in &report.failed {
        println!("Failed {}: {}", route, error);
    }
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run(&self) -> Result<(), DomainError> {
        loop {
            let choice = Select::new("What next?", MenuItem::ALL.to_vec())
                .prompt()
                .map_err(ui_err)?;
            match choice {
                MenuItem::BuildAll => self.run_build().await?,
                MenuItem::Preview => self.run_preview().await?,
                MenuItem::ClearCache => {
                    let removed = self.cache.clear().await;
                    info!(removed, "page cache cleared");
                    println!("Dropped {} cached page(s).", removed);
                }
                MenuItem::Quit => return Ok(()),
            }
        }
    }
}
