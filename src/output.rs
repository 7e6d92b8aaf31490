//! Output directory management.

use std::{fs, io::ErrorKind, path::Path};

use crate::error::SliceError;

/// Make `path` an existing, empty directory.
///
/// Missing parents are created. If the directory already exists, it and
/// everything inside it is removed first, so no file from an earlier run
/// survives. There is no confirmation and no backup.
///
/// # Errors
///
/// Returns [`SliceError::OutputDirectory`] if the directory cannot be
/// removed or created.
pub fn prepare_output_directory<P: AsRef<Path>>(path: P) -> Result<(), SliceError> {
    let path = path.as_ref();
    let directory_error = |source| SliceError::OutputDirectory {
        path: path.to_path_buf(),
        source,
    };

    match fs::remove_dir_all(path) {
        Ok(()) => log::debug!("Cleared output directory {}", path.display()),
        Err(error) if error.kind() == ErrorKind::NotFound => {}
        Err(error) => return Err(directory_error(error)),
    }

    fs::create_dir_all(path).map_err(directory_error)?;
    log::debug!("Created output directory {}", path.display());
    Ok(())
}
