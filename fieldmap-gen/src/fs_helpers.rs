//! Filesystem helpers shared across `fieldmap-gen` modules.

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;

use crate::error::GenError;

/// Returns the directory containing `path`, or `.` for bare file names.
#[must_use]
pub fn parent_or_current(path: &Utf8Path) -> &Utf8Path {
    match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    }
}

/// Opens an existing directory.
pub fn open_dir(path: &Utf8Path) -> Result<Dir, GenError> {
    Dir::open_ambient_dir(path, ambient_authority()).map_err(|err| GenError::io(path, err))
}

/// Opens a directory, creating it and its parents when missing.
pub fn ensure_dir(path: &Utf8Path) -> Result<Dir, GenError> {
    match Dir::open_ambient_dir(path, ambient_authority()) {
        Ok(dir) => Ok(dir),
        Err(open_err) if open_err.kind() == std::io::ErrorKind::NotFound => {
            Dir::create_ambient_dir_all(path, ambient_authority())
                .map_err(|io_err| GenError::io(path, io_err))?;
            open_dir(path)
        }
        Err(open_err) => Err(GenError::io(path, open_err)),
    }
}

/// Reads `path` to a string.
pub fn read_to_string(path: &Utf8Path) -> Result<String, GenError> {
    let file_name = path
        .file_name()
        .ok_or_else(|| GenError::io(path, std::io::ErrorKind::InvalidInput.into()))?;
    open_dir(parent_or_current(path))?
        .read_to_string(file_name)
        .map_err(|err| GenError::io(path, err))
}
