use crate::tui::{self, AppState, TuiPipeline};
use anyhow::Result;
use h2save_format::{Hades2Decoder, list_saves, locate_save_dir};
use h2save_runtime::{Config, DirectoryDownloads, JsonTreeWidget, TreePresenter};
use std::path::PathBuf;

pub fn handle(config: &Config, file: Option<PathBuf>, out_dir: Option<PathBuf>) -> Result<()> {
    let out_dir = out_dir.unwrap_or_else(|| config.downloads_dir());
    tracing::info!(out_dir = %out_dir.display(), "starting interactive view");

    let presenter =
        TreePresenter::new(JsonTreeWidget::new()).with_expand_on_open(config.tree.expand_on_open);
    let pipeline = TuiPipeline::new(Hades2Decoder, DirectoryDownloads::new(out_dir), presenter);

    let (saves, saves_hint) = detect_saves(config);
    tui::run(AppState::new(pipeline, saves, saves_hint), file)
}

/// Savefiles for the picker, or the reason there are none.
fn detect_saves(config: &Config) -> (Vec<h2save_format::SaveEntry>, Option<String>) {
    let dir = match config.saves_dir().map(Ok).unwrap_or_else(locate_save_dir) {
        Ok(dir) => dir,
        Err(err) => return (Vec::new(), Some(err.to_string())),
    };

    match list_saves(&dir) {
        Ok(saves) => (saves, None),
        Err(err) => {
            tracing::warn!(dir = %dir.display(), error = %err, "could not list saves");
            (Vec::new(), Some(format!("Could not list {}: {}", dir.display(), err)))
        }
    }
}
