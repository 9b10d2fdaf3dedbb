use std::io::{self, ErrorKind};
use std::path::Path;

/// Ensures `path` names an existing regular file before it is opened as a
/// hash file.
///
/// # Returns:
/// - `Ok(())` if the path resolves to a regular file.
/// - `Err(io::Error)` with [`ErrorKind::NotFound`] if nothing exists there,
///   or [`ErrorKind::InvalidInput`] if it is a directory or other non-file.
pub fn verify_file_existence(path: &Path) -> io::Result<()> {
    let metadata = std::fs::metadata(path).map_err(|err| {
        if err.kind() == ErrorKind::NotFound {
            io::Error::new(
                ErrorKind::NotFound,
                format!("hash file '{}' does not exist", path.display()),
            )
        } else {
            err
        }
    })?;

    if !metadata.is_file() {
        return Err(io::Error::new(
            ErrorKind::InvalidInput,
            format!("'{}' is not a regular file", path.display()),
        ));
    }

    Ok(())
}
