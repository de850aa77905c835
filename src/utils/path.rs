//! Path normalization utilities.
//!
//! - `normalize_path` - absolute, canonical file system paths
//! - `clean_path` - lexical `.`/`..` removal for paths that may not exist yet
//! - `is_within` - containment check between two directories
//! - `to_slash` - `/`-separated form of a relative path

use std::path::{Component, Path, PathBuf};

/// Normalize a file system path to absolute form.
///
/// Relative paths are joined with the current directory and `.`/`..` are
/// removed. The longest existing prefix is then canonicalized (resolving
/// symlinks), so paths that do not exist yet still compare equal to their
/// existing siblings.
pub fn normalize_path(path: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
    };
    let absolute = clean_path(&absolute);

    for ancestor in absolute.ancestors() {
        if let (Ok(canonical), Ok(rest)) = (ancestor.canonicalize(), absolute.strip_prefix(ancestor))
        {
            return if rest.as_os_str().is_empty() {
                canonical
            } else {
                canonical.join(rest)
            };
        }
    }
    absolute
}

/// Remove `.` and `..` components without touching the file system.
pub fn clean_path(path: &Path) -> PathBuf {
    let mut cleaned = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !cleaned.pop() {
                    cleaned.push(component);
                }
            }
            other => cleaned.push(other),
        }
    }
    cleaned
}

/// Whether `path` is `dir` itself or lies somewhere below it.
///
/// Both sides are compared lexically after cleaning, so the check works
/// for directories that have not been created yet.
pub fn is_within(path: &Path, dir: &Path) -> bool {
    clean_path(path).starts_with(clean_path(dir))
}

/// Render a relative path with `/` separators.
///
/// Used for document identifiers and link targets, which must not depend
/// on the host platform.
pub fn to_slash(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
