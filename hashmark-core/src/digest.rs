use crate::algo::DigestAlgorithm;
use crate::error::{Error, Result};
use digest::DynDigest as _;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Fixed read-chunk size. Memory use stays bounded regardless of file size.
const CHUNK: usize = 8 * 1024;

/// Compute the raw digest of a file by streaming it through an incremental
/// hasher. The file is opened read-only and closed on every exit path.
pub fn digest_file(path: &Path, algorithm: DigestAlgorithm) -> Result<Vec<u8>> {
    let mut file = File::open(path).map_err(|e| Error::io(path, e))?;
    let mut hasher = algorithm.hasher();
    let mut buf = [0u8; CHUNK];
    loop {
        let n = file.read(&mut buf).map_err(|e| Error::io(path, e))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hasher.finalize().to_vec())
}
