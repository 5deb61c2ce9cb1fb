//! Capability-scoped reads and writes of whole UTF-8 files.

use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8::Dir};

/// Open the directory containing `path` and return it with the file name.
fn open_parent(path: &Utf8Path) -> io::Result<(Dir, String)> {
    let name = path
        .file_name()
        .ok_or_else(|| io::Error::other(format!("{path} does not name a file")))?
        .to_owned();
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let dir = Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, name))
}

/// Create every missing directory above `path`.
fn create_parent(path: &Utf8Path) -> io::Result<()> {
    let Some(parent) = path.parent().filter(|p| !p.as_str().is_empty()) else {
        return Ok(());
    };
    let (base, relative) = if parent.is_absolute() {
        let root = parent.ancestors().last().unwrap_or(parent);
        let relative = parent
            .strip_prefix(root)
            .map_err(|_| io::Error::other(format!("cannot split {parent} at its root")))?;
        (root.to_owned(), relative.to_owned())
    } else {
        (Utf8PathBuf::from("."), parent.to_owned())
    };
    if relative.as_str().is_empty() {
        return Ok(());
    }
    Dir::open_ambient_dir(&base, ambient_authority())?.create_dir_all(&relative)
}

/// Read `path`, or `None` when it or its directory does not exist.
pub(crate) fn read_if_present(path: &Utf8Path) -> io::Result<Option<String>> {
    let (dir, name) = match open_parent(path) {
        Ok(found) => found,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err),
    };
    match dir.read_to_string(&name) {
        Ok(text) => Ok(Some(text)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err),
    }
}

/// Read `path`, failing when it is missing.
pub(crate) fn read(path: &Utf8Path) -> io::Result<String> {
    let (dir, name) = open_parent(path)?;
    dir.read_to_string(&name)
}

/// Replace the contents of `path`, creating parent directories.
///
/// The text is written to a sibling file first and renamed into place, so
/// readers see either the old or the new contents.
pub(crate) fn write_replacing(path: &Utf8Path, contents: &str) -> io::Result<()> {
    create_parent(path)?;
    let (dir, name) = open_parent(path)?;
    let staging = format!(".{name}.tmp");
    dir.write(&staging, contents)?;
    dir.rename(&staging, &dir, &name)
}
