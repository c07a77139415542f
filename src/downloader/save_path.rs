use std::path::{Component, Path, PathBuf};

use crate::osf::OsfError;

/// Derive the output file path
///
/// - `out` + `data/x.csv` -> `out.csv`
/// - `out` + whole project -> `out.zip`
/// - `out.bin` + anything -> `out.bin`
pub fn resolve_save_path(path: impl AsRef<Path>, file_path: Option<&str>) -> PathBuf {
    let path = path.as_ref();

    if path.extension().is_some_and(|ext| !ext.is_empty()) {
        return path.to_path_buf();
    }

    match file_path.filter(|file_path| !file_path.is_empty()) {
        Some(file_path) => match Path::new(file_path).extension() {
            Some(ext) => path.with_extension(ext),
            None => path.to_path_buf()
        },

        None => path.with_extension("zip")
    }
}

/// Replace leading `~` with the user's home folder
pub fn expand_home(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    let mut components = path.components();

    match components.next() {
        Some(Component::Normal(first)) if first == "~" => match dirs::home_dir() {
            Some(home) => home.join(components.as_path()),
            None => path.to_path_buf()
        },

        _ => path.to_path_buf()
    }
}

/// Turn given target into an absolute path, creating its missing parent folders
///
/// Parent folder is canonicalized, so relative segments and symlinks
/// in it are resolved
pub fn expand_target(path: impl AsRef<Path>) -> Result<PathBuf, OsfError> {
    let path = expand_home(path);

    let path = if path.is_absolute() {
        path
    } else {
        std::env::current_dir()?.join(path)
    };

    let Some(file_name) = path.file_name().map(|name| name.to_os_string()) else {
        return Err(OsfError::Io(format!("Target path doesn't name a file: {path:?}")));
    };

    let parent = path.parent()
        .ok_or_else(|| OsfError::Io(format!("Target path has no parent folder: {path:?}")))?;

    std::fs::create_dir_all(parent)?;

    Ok(parent.canonicalize()?.join(file_name))
}
