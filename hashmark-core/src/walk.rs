use crate::error::{Error, Result};
use std::path::Path;
use walkdir::WalkDir;

/// Enumerate the regular files under `root`, as forward-slash paths relative
/// to `root`, sorted lexicographically. The sort makes the ordering
/// independent of the file system's own iteration order, so two runs over an
/// unchanged tree always enumerate identically.
///
/// With `recursive` false only direct children are yielded; subdirectories
/// are skipped entirely. Symlinks are never followed and symlinked files are
/// never yielded, so link cycles cannot occur and a manifest never reaches
/// outside its root.
pub fn enumerate(root: &Path, recursive: bool) -> Result<Vec<String>> {
    let meta = std::fs::metadata(root).map_err(|e| Error::io(root, e))?;
    if !meta.is_dir() {
        return Err(Error::io(
            root,
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a directory"),
        ));
    }

    let mut walker = WalkDir::new(root).min_depth(1).follow_links(false);
    if !recursive {
        walker = walker.max_depth(1);
    }

    let mut rels: Vec<String> = Vec::new();
    for ent in walker {
        let ent = ent.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            match e.into_io_error() {
                Some(io) => Error::io(path, io),
                None => Error::io(path, std::io::Error::other("walk loop")),
            }
        })?;
        // Symlink entries report file_type symlink, not file, so they drop
        // out here along with directories.
        if !ent.file_type().is_file() {
            continue;
        }
        // Manifests are UTF-8 text; a name that cannot be spelled in one is
        // an error here, not a mangled rel path later.
        let rel = ent
            .path()
            .strip_prefix(root)
            .unwrap_or(ent.path())
            .to_str()
            .ok_or_else(|| {
                Error::io(
                    ent.path(),
                    std::io::Error::new(std::io::ErrorKind::InvalidData, "non-UTF-8 file name"),
                )
            })?
            .replace('\\', "/");
        rels.push(rel);
    }
    rels.sort();
    Ok(rels)
}
