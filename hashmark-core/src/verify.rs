use crate::algo::{DigestAlgorithm, DigestEncoding};
use crate::cancel::CancelToken;
use crate::codec;
use crate::digest::digest_file;
use crate::error::{Error, Result};
use crate::manifest::ManifestFormat;
use crate::report::{HashReport, VerifyStatus};
use crate::walk;
use std::collections::HashSet;
use std::path::Path;

pub struct VerifyOptions {
    pub algorithm: DigestAlgorithm,
    pub encoding: DigestEncoding,
    pub recursive: bool,
    /// Also flag files present on disk but absent from the manifest.
    pub strict: bool,
}

/// Check one data file against a single-digest manifest. True iff the
/// recomputed digest, encoded the same way, is byte-for-byte equal to the
/// stored text. I/O failures on either file propagate; there is no
/// classified result here.
pub fn verify_file(
    hash_file: &Path,
    data_file: &Path,
    algorithm: DigestAlgorithm,
    encoding: DigestEncoding,
) -> Result<bool> {
    // Unrecognized extensions are read as `.hash`: raw digest, caller's
    // encoding.
    let format = ManifestFormat::from_path(hash_file).unwrap_or(ManifestFormat::Hash);
    if !format.is_single_digest() {
        return Err(Error::malformed(0, "not a single-digest manifest format"));
    }
    let encoding = format.effective_encoding(encoding);
    let bytes = std::fs::read(hash_file).map_err(|e| Error::io(hash_file, e))?;
    // Validates the grammar and the digest length for this algorithm.
    codec::decode(&bytes, format, algorithm, encoding)?;
    let stored_text =
        std::str::from_utf8(&bytes).map_err(|_| Error::malformed(0, "not valid UTF-8"))?;
    let computed = digest_file(data_file, algorithm)?;
    // The stored text is compared as written, byte for byte; an equivalent
    // digest in a different spelling (uppercase hex, say) does not pass.
    Ok(stored_text.trim_end() == encoding.encode(&computed))
}

/// Recompute and classify every entry of a directory manifest against
/// `root`. Per-file problems are recorded in the report, never raised: a
/// missing or unreadable file does not stop the batch. Only cancellation or
/// a failure to read the manifest itself aborts, and then no partial report
/// is returned.
pub fn verify_directory(
    root: &Path,
    manifest_file: &Path,
    opts: &VerifyOptions,
    cancel: Option<&CancelToken>,
) -> Result<HashReport> {
    let format = ManifestFormat::from_path(manifest_file).unwrap_or(ManifestFormat::HashFiles);
    if format.is_single_digest() {
        return Err(Error::malformed(0, "not a directory manifest format"));
    }
    let bytes = std::fs::read(manifest_file).map_err(|e| Error::io(manifest_file, e))?;
    let manifest = codec::decode(&bytes, format, opts.algorithm, opts.encoding)?;

    let mut report = HashReport::new();
    for entry in manifest.entries() {
        if let Some(token) = cancel {
            token.check()?;
        }
        let path = root.join(&entry.rel_path);
        let status = match digest_file(&path, opts.algorithm) {
            Ok(digest) if digest == entry.digest => VerifyStatus::Match,
            Ok(_) => VerifyStatus::Mismatch,
            Err(Error::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
                VerifyStatus::MissingFile
            }
            Err(_) => VerifyStatus::IoError,
        };
        report.push(entry.rel_path.clone(), status);
    }

    if opts.strict {
        let known: HashSet<&str> =
            manifest.entries().iter().map(|e| e.rel_path.as_str()).collect();
        // Same walk the manifest was built from; extras come out sorted.
        for rel in walk::enumerate(root, opts.recursive)? {
            if let Some(token) = cancel {
                token.check()?;
            }
            if !known.contains(rel.as_str()) {
                report.push(rel, VerifyStatus::ExtraFile);
            }
        }
    }

    Ok(report)
}
