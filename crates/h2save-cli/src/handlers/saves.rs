use crate::views::SaveListView;
use anyhow::{Context, Result};
use h2save_format::{list_saves, locate_save_dir};
use h2save_runtime::Config;
use is_terminal::IsTerminal;
use std::path::PathBuf;

pub fn handle(config: &Config, dir: Option<PathBuf>) -> Result<()> {
    let dir = match dir.or_else(|| config.saves_dir()) {
        Some(dir) => dir,
        None => locate_save_dir()?,
    };

    let saves = list_saves(&dir).with_context(|| format!("Could not list {}", dir.display()))?;
    let color = std::io::stdout().is_terminal();
    print!("{}", SaveListView::new(&dir, &saves, color));
    Ok(())
}
