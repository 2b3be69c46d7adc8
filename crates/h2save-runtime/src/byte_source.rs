use h2save_types::{NormalizedError, SaveBuffer};
use std::path::Path;

/// Read the whole file at `path` into a [`SaveBuffer`].
///
/// All-or-nothing: a partial read is reported as an ingestion failure.
pub async fn read_save(path: &Path) -> Result<SaveBuffer, NormalizedError> {
    let name = display_name(path);
    match tokio::fs::read(path).await {
        Ok(bytes) => {
            tracing::debug!(path = %path.display(), bytes = bytes.len(), "read savefile");
            Ok(SaveBuffer::new(name, bytes))
        }
        Err(err) => Err(NormalizedError::ingestion(&name, err)),
    }
}

/// File name component of `path`, or the whole path when it has none.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
