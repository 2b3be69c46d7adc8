use crate::presenter::{TreePresenter, TreeWidget};
use h2save_types::{ExpansionFormat, ExpansionResult, NormalizedError};
use std::io::{self, Write};
use std::path::PathBuf;
use tempfile::NamedTempFile;

/// Destination for download artifacts.
pub trait DownloadSink {
    /// Store `contents` under `file_name` and return where it landed.
    fn download(&mut self, file_name: &str, contents: &str) -> io::Result<PathBuf>;
}

/// Writes artifacts into one directory.
///
/// Each artifact goes through a temporary file in the same directory that
/// is renamed into place; the temporary is removed if anything fails.
#[derive(Debug, Clone)]
pub struct DirectoryDownloads {
    dir: PathBuf,
}

impl DirectoryDownloads {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl DownloadSink for DirectoryDownloads {
    fn download(&mut self, file_name: &str, contents: &str) -> io::Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;

        let mut transient = NamedTempFile::new_in(&self.dir)?;
        transient.write_all(contents.as_bytes())?;
        transient.flush()?;

        let target = self.dir.join(file_name);
        transient.persist(&target).map_err(|e| e.error)?;
        Ok(target)
    }
}

/// What a delivery did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// The expansion failed; nothing was delivered.
    Skipped,
    Downloaded(PathBuf),
    Presented,
}

/// Sends a successful expansion to a download or to the tree presenter.
#[derive(Debug, Clone)]
pub struct DeliveryRouter<S> {
    sink: S,
}

impl<S: DownloadSink> DeliveryRouter<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    /// Deliver `result` the way `format` dictates.
    ///
    /// Failed results are skipped without side effects.
    pub fn deliver<W: TreeWidget>(
        &mut self,
        result: ExpansionResult,
        format: ExpansionFormat,
        original_name: &str,
        presenter: &mut TreePresenter<W>,
    ) -> Result<Delivery, NormalizedError> {
        let Ok(payload) = result else {
            return Ok(Delivery::Skipped);
        };

        match format.artifact_name(original_name) {
            Some(file_name) => {
                let path = self
                    .sink
                    .download(&file_name, &payload)
                    .map_err(|e| NormalizedError::delivery(&file_name, e))?;
                tracing::info!(path = %path.display(), bytes = payload.len(), "download written");
                Ok(Delivery::Downloaded(path))
            }
            None => {
                presenter.present(&payload)?;
                tracing::info!(bytes = payload.len(), "tree presented");
                Ok(Delivery::Presented)
            }
        }
    }
}
