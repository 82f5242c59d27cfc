//! Progress bar for the pre-render batch. Fed by `BuildProgress` events.

use crate::usecases::BuildProgress;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

const TEMPLATE: &str = "{spinner:.yellow} [{bar:40.yellow/blue}] {pos}/{len} {wide_msg}";

/// Spawn a task that drives a progress bar until the sender is dropped.
pub fn spawn_build_bar() -> (mpsc::UnboundedSender<BuildProgress>, JoinHandle<()>) {
    let (tx, mut rx) = mpsc::unbounded_channel::<BuildProgress>();
    let bar = ProgressBar::new(0);
    bar.set_style(
        ProgressStyle::with_template(TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> "),
    );
    let handle = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            bar.set_length(event.total as u64);
            bar.set_position(event.done as u64);
            bar.set_message(event.route);
        }
        bar.finish_and_clear();
    });
    (tx, handle)
}
