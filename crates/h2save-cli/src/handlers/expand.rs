use crate::commands::build_runtime;
use anyhow::{Result, bail};
use h2save_format::Hades2Decoder;
use h2save_runtime::{
    Config, Delivery, DirectoryDownloads, JsonTreeWidget, Outcome, Pipeline, TreePresenter,
};
use h2save_types::{Action, ExpansionFormat};
use std::path::{Path, PathBuf};

/// Run one selection and one action through the pipeline.
pub fn handle(
    config: &Config,
    file: &Path,
    format: ExpansionFormat,
    out_dir: Option<PathBuf>,
) -> Result<()> {
    let out_dir = out_dir.unwrap_or_else(|| config.downloads_dir());
    let presenter =
        TreePresenter::new(JsonTreeWidget::new()).with_expand_on_open(config.tree.expand_on_open);
    let mut pipeline = Pipeline::new(Hades2Decoder, DirectoryDownloads::new(out_dir), presenter);

    let runtime = build_runtime()?;
    let outcome = runtime.block_on(async {
        pipeline.select(file).await;
        if let Some(error) = pipeline.session().error_message() {
            bail!("{}", error);
        }
        Ok::<_, anyhow::Error>(pipeline.run(Action::for_format(format)).await)
    })?;

    match outcome {
        Some(Outcome::Delivered(Delivery::Downloaded(path))) => {
            println!("Wrote {}", path.display());
        }
        Some(Outcome::Delivered(Delivery::Presented)) => {
            if let Some(tree) = pipeline.presenter().tree() {
                print!("{}", tree.outline());
            }
        }
        Some(Outcome::Failed(error)) => bail!("{}", error),
        Some(Outcome::Delivered(Delivery::Skipped)) | Some(Outcome::Stale) | None => {
            bail!("Nothing was delivered for {}", file.display())
        }
    }

    Ok(())
}
