use crate::algo::{DigestAlgorithm, DigestEncoding};
use crate::cancel::CancelToken;
use crate::digest::digest_file;
use crate::error::{Error, Result};
use crate::manifest::{Manifest, ManifestEntry};
use crate::walk;
use std::path::Path;

pub struct ComputeOptions {
    pub algorithm: DigestAlgorithm,
    pub encoding: DigestEncoding,
    pub recursive: bool,
}

/// Hash a live directory tree into a manifest: enumerate, then digest each
/// file in enumeration order. The cancellation token, when given, is checked
/// between files; a cancelled or failed run returns no partial manifest.
pub fn compute_manifest(
    root: &Path,
    opts: &ComputeOptions,
    cancel: Option<&CancelToken>,
) -> Result<Manifest> {
    let rels = walk::enumerate(root, opts.recursive)?;
    let mut entries = Vec::with_capacity(rels.len());
    for rel in rels {
        if let Some(token) = cancel {
            token.check()?;
        }
        let digest = digest_file(&root.join(&rel), opts.algorithm)?;
        entries.push(ManifestEntry { rel_path: rel, digest });
    }
    Manifest::new(opts.algorithm, opts.encoding, entries)
}

/// Single-entry manifest for one regular file; the entry's rel_path is the
/// file name. This is what the single-digest formats serialize.
pub fn compute_file_manifest(
    path: &Path,
    algorithm: DigestAlgorithm,
    encoding: DigestEncoding,
) -> Result<Manifest> {
    let digest = digest_file(path, algorithm)?;
    let rel_path = path
        .file_name()
        .ok_or_else(|| {
            Error::io(path, std::io::Error::new(std::io::ErrorKind::InvalidInput, "no file name"))
        })?
        .to_string_lossy()
        .into_owned();
    Manifest::new(algorithm, encoding, vec![ManifestEntry { rel_path, digest }])
}
