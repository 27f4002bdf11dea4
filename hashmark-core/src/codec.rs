use crate::algo::{DigestAlgorithm, DigestEncoding};
use crate::error::{Error, Result};
use crate::manifest::{Manifest, ManifestEntry, ManifestFormat};

/// Serialize a manifest into the given format.
///
/// Single-digest formats carry just the encoded digest, no path and no
/// trailing newline; they require exactly one entry. Directory formats emit
/// one `<digest> <rel_path>` line per entry, UTF-8, in manifest order, with
/// a trailing newline after the last line.
pub fn encode(manifest: &Manifest, format: ManifestFormat) -> Result<Vec<u8>> {
    let encoding = format.effective_encoding(manifest.encoding());
    if format.is_single_digest() {
        if manifest.len() != 1 {
            return Err(Error::SingleEntryFormat {
                format: format.extension(),
                count: manifest.len(),
            });
        }
        let entry = &manifest.entries()[0];
        return Ok(encoding.encode(&entry.digest).into_bytes());
    }
    let mut out = String::new();
    for entry in manifest.entries() {
        out.push_str(&encoding.encode(&entry.digest));
        out.push(' ');
        out.push_str(&entry.rel_path);
        out.push('\n');
    }
    Ok(out.into_bytes())
}

/// Parse manifest bytes. `algorithm` fixes the expected digest length and
/// `encoding` the digest text form, unless the format itself implies one
/// (`.hashb64`, `.hexhash`). Any malformed line fails the whole decode: a
/// partially trusted manifest is unsafe to verify against.
pub fn decode(
    bytes: &[u8],
    format: ManifestFormat,
    algorithm: DigestAlgorithm,
    encoding: DigestEncoding,
) -> Result<Manifest> {
    let encoding = format.effective_encoding(encoding);
    let text = std::str::from_utf8(bytes).map_err(|_| Error::malformed(0, "not valid UTF-8"))?;

    if format.is_single_digest() {
        let trimmed = text.trim_end();
        if trimmed.is_empty() {
            return Err(Error::malformed(1, "empty digest"));
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(Error::malformed(1, "single-digest manifest holds more than a digest"));
        }
        let digest = decode_digest(trimmed, algorithm, encoding, 1)?;
        // Single-digest formats record no path; callers bind the digest to
        // their data file by convention.
        return Manifest::new(
            algorithm,
            encoding,
            vec![ManifestEntry { rel_path: String::new(), digest }],
        );
    }

    let mut lines: Vec<&str> = text.split('\n').collect();
    // The final newline of the last entry produces one empty segment.
    if lines.last() == Some(&"") {
        lines.pop();
    }
    let mut entries = Vec::with_capacity(lines.len());
    for (idx, raw) in lines.iter().enumerate() {
        let line_no = idx + 1;
        let line = raw.strip_suffix('\r').unwrap_or(raw);
        if line.trim().is_empty() {
            // One blank line is tolerated at the very end, nowhere else.
            if idx + 1 == lines.len() {
                continue;
            }
            return Err(Error::malformed(line_no, "blank line inside manifest"));
        }
        let sep = line
            .find(|c: char| c.is_whitespace())
            .ok_or_else(|| Error::malformed(line_no, "missing digest/path separator"))?;
        let digest_text = &line[..sep];
        let rel_path = line[sep..].trim_start();
        if rel_path.is_empty() {
            return Err(Error::malformed(line_no, "missing path after digest"));
        }
        let digest = decode_digest(digest_text, algorithm, encoding, line_no)?;
        entries.push(ManifestEntry { rel_path: rel_path.to_string(), digest });
    }
    // Manifest::new re-checks lengths and rejects duplicate paths; entry
    // index and line number coincide because blanks are only legal at the end.
    Manifest::new(algorithm, encoding, entries)
}

fn decode_digest(
    text: &str,
    algorithm: DigestAlgorithm,
    encoding: DigestEncoding,
    line_no: usize,
) -> Result<Vec<u8>> {
    let digest = encoding
        .decode(text)
        .ok_or_else(|| Error::malformed(line_no, format!("invalid {} digest", encoding.token())))?;
    if digest.len() != algorithm.digest_len() {
        return Err(Error::malformed(
            line_no,
            format!(
                "digest is {} bytes, {} produces {}",
                digest.len(),
                algorithm.token(),
                algorithm.digest_len()
            ),
        ));
    }
    Ok(digest)
}
