//! Output writers for `fieldmap-gen`.

use camino::{Utf8Path, Utf8PathBuf};
use tracing::{debug, info};

use crate::error::GenError;
use crate::fs_helpers::{ensure_dir, parent_or_current};

/// Writes `content` to `path` through a temporary sibling file.
///
/// The temporary file is renamed over the target only after it has been
/// written completely, so a failed run never leaves a partial artefact.
///
/// # Errors
///
/// Returns [`GenError::Io`] when the directory cannot be created or the file
/// cannot be written or renamed.
pub fn write_atomically(path: &Utf8Path, content: &str) -> Result<Utf8PathBuf, GenError> {
    let parent = parent_or_current(path);
    let file_name = path
        .file_name()
        .ok_or_else(|| GenError::io(path, std::io::ErrorKind::InvalidInput.into()))?;
    let dir = ensure_dir(parent)?;
    let temp_name = format!(".{file_name}.tmp");

    dir.write(&temp_name, content)
        .map_err(|io_err| GenError::io(parent.join(&temp_name), io_err))?;
    if let Err(io_err) = dir.rename(&temp_name, &dir, file_name) {
        if let Err(cleanup_err) = dir.remove_file(&temp_name) {
            debug!(path = %parent.join(&temp_name), error = %cleanup_err, "temporary file left behind");
        }
        return Err(GenError::io(path, io_err));
    }

    info!(path = %path, bytes = content.len(), "output written");
    Ok(path.to_path_buf())
}
