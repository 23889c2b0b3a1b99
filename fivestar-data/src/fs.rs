//! Capability-based file access for UTF-8 paths.

use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};

/// Open a file for reading using ambient authority.
pub fn open_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    fs_utf8::File::open_ambient(path, ambient_authority())
}

/// Report whether `path` exists and is a regular file.
///
/// # Errors
/// Returns the underlying error, `NotFound` included, when the path cannot
/// be inspected.
pub fn file_is_file(path: &Utf8Path) -> io::Result<bool> {
    let name = path
        .file_name()
        .ok_or_else(|| io::Error::other("path should include a file name"))?;
    let dir = fs_utf8::Dir::open_ambient_dir(parent_or_current(path), ambient_authority())?;
    dir.metadata(name).map(|meta| meta.is_file())
}

/// Create or truncate a file inside its (existing) parent directory.
pub fn create_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    let name = path
        .file_name()
        .ok_or_else(|| io::Error::other("output path should include a file name"))?;
    let dir = fs_utf8::Dir::open_ambient_dir(parent_or_current(path), ambient_authority())?;
    dir.create(name)
}

/// Create the parent directory of `path` and any missing ancestors.
pub fn ensure_parent_dir(path: &Utf8Path) -> io::Result<()> {
    let parent = parent_or_current(path);
    let (base, relative) = split_base(parent);
    if relative.as_str().is_empty() {
        return Ok(());
    }
    fs_utf8::Dir::open_ambient_dir(base, ambient_authority())?.create_dir_all(relative)
}

/// Parent directory of `path`, `"."` for a bare file name.
pub fn parent_or_current(path: &Utf8Path) -> &Utf8Path {
    path.parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."))
}

// cap-std directories only accept relative paths, so absolute paths are
// opened from the root.
fn split_base(dir: &Utf8Path) -> (&Utf8Path, Utf8PathBuf) {
    dir.strip_prefix("/").map_or_else(
        |_| (Utf8Path::new("."), dir.to_path_buf()),
        |relative| (Utf8Path::new("/"), relative.to_path_buf()),
    )
}
