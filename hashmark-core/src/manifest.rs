use crate::algo::{DigestAlgorithm, DigestEncoding};
use crate::error::{Error, Result};
use std::collections::HashSet;
use std::path::Path;

/// One (relative path, raw digest) pair. `rel_path` uses forward slashes on
/// every platform and is resolved against the manifest's traversal root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ManifestEntry {
    pub rel_path: String,
    pub digest: Vec<u8>,
}

/// An ordered path→digest mapping plus the algorithm and encoding that
/// produced it. Entries are in traversal order (lexicographic by rel_path),
/// paths are unique, and every digest has the algorithm's output length.
/// Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Manifest {
    algorithm: DigestAlgorithm,
    encoding: DigestEncoding,
    entries: Vec<ManifestEntry>,
}

impl Manifest {
    /// Build a manifest, validating the invariants. Entry order is kept as
    /// given; callers produce it from the sorted walk.
    pub fn new(
        algorithm: DigestAlgorithm,
        encoding: DigestEncoding,
        entries: Vec<ManifestEntry>,
    ) -> Result<Self> {
        let mut seen = HashSet::new();
        for (i, e) in entries.iter().enumerate() {
            if e.digest.len() != algorithm.digest_len() {
                return Err(Error::malformed(
                    i + 1,
                    format!(
                        "digest length {} does not match {} ({} bytes)",
                        e.digest.len(),
                        algorithm.token(),
                        algorithm.digest_len()
                    ),
                ));
            }
            if !seen.insert(e.rel_path.as_str()) {
                return Err(Error::malformed(i + 1, format!("duplicate path {:?}", e.rel_path)));
            }
        }
        Ok(Self { algorithm, encoding, entries })
    }

    pub fn algorithm(&self) -> DigestAlgorithm {
        self.algorithm
    }

    pub fn encoding(&self) -> DigestEncoding {
        self.encoding
    }

    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The legacy manifest file formats, keyed by file extension. The three
/// single-digest formats hold one digest and no path; the two directory
/// formats share the `<digest> <rel_path>` line grammar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ManifestFormat {
    /// `.hash`: one encoded digest, encoding implied by caller convention.
    Hash,
    /// `.hashb64`: one Base64 digest.
    HashB64,
    /// `.hexhash`: one hex digest.
    HexHash,
    /// `.hashfiles`: one `<digest> <rel_path>` line per entry.
    HashFiles,
    /// `.txthashfiles`: same line grammar as `.hashfiles`.
    TxtHashFiles,
}

impl ManifestFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Hash => "hash",
            Self::HashB64 => "hashb64",
            Self::HexHash => "hexhash",
            Self::HashFiles => "hashfiles",
            Self::TxtHashFiles => "txthashfiles",
        }
    }

    /// Recognize a format from a file name's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "hash" => Some(Self::Hash),
            "hashb64" => Some(Self::HashB64),
            "hexhash" => Some(Self::HexHash),
            "hashfiles" => Some(Self::HashFiles),
            "txthashfiles" => Some(Self::TxtHashFiles),
            _ => None,
        }
    }

    /// True for the formats that hold exactly one digest and no path.
    pub fn is_single_digest(self) -> bool {
        matches!(self, Self::Hash | Self::HashB64 | Self::HexHash)
    }

    /// The encoding the format itself dictates, if any. `.hash` and the
    /// directory formats leave it to the caller.
    pub fn implied_encoding(self) -> Option<DigestEncoding> {
        match self {
            Self::HashB64 => Some(DigestEncoding::Base64),
            Self::HexHash => Some(DigestEncoding::Hex),
            Self::Hash | Self::HashFiles | Self::TxtHashFiles => None,
        }
    }

    /// Encoding to use when reading or writing this format: the implied one
    /// when the format dictates it, the caller's otherwise.
    pub fn effective_encoding(self, fallback: DigestEncoding) -> DigestEncoding {
        self.implied_encoding().unwrap_or(fallback)
    }
}
