use hashmark_core::algo::{DigestAlgorithm, DigestEncoding};
use hashmark_core::codec::{decode, encode};
use hashmark_core::error::Error;
use hashmark_core::manifest::{Manifest, ManifestEntry, ManifestFormat};
use proptest::prelude::*;

fn entry(path: &str, fill: u8, len: usize) -> ManifestEntry {
    ManifestEntry { rel_path: path.to_string(), digest: vec![fill; len] }
}

fn two_entry_manifest() -> Manifest {
    Manifest::new(
        DigestAlgorithm::Sha256,
        DigestEncoding::Hex,
        vec![entry("a.txt", 0x11, 32), entry("sub/b.txt", 0x22, 32)],
    )
    .unwrap()
}

#[test]
fn directory_formats_round_trip() {
    let m = two_entry_manifest();
    for format in [ManifestFormat::HashFiles, ManifestFormat::TxtHashFiles] {
        let bytes = encode(&m, format).unwrap();
        let back = decode(&bytes, format, DigestAlgorithm::Sha256, DigestEncoding::Hex).unwrap();
        assert_eq!(back, m);
    }
}

#[test]
fn directory_format_layout_is_exact() {
    let m = two_entry_manifest();
    let text = String::from_utf8(encode(&m, ManifestFormat::HashFiles).unwrap()).unwrap();
    let hex11 = "11".repeat(32);
    let hex22 = "22".repeat(32);
    assert_eq!(text, format!("{hex11} a.txt\n{hex22} sub/b.txt\n"));
}

#[test]
fn single_digest_formats_round_trip() {
    let m = Manifest::new(
        DigestAlgorithm::Sha1,
        DigestEncoding::Hex,
        vec![entry("data.bin", 0xab, 20)],
    )
    .unwrap();
    for format in [ManifestFormat::Hash, ManifestFormat::HashB64, ManifestFormat::HexHash] {
        let bytes = encode(&m, format).unwrap();
        let back = decode(&bytes, format, DigestAlgorithm::Sha1, DigestEncoding::Hex).unwrap();
        assert_eq!(back.entries()[0].digest, m.entries()[0].digest);
    }
}

#[test]
fn hashb64_and_hexhash_imply_their_encoding() {
    let m = Manifest::new(
        DigestAlgorithm::Sha256,
        // Caller says hex, the formats dictate otherwise where they must.
        DigestEncoding::Hex,
        vec![entry("data.bin", 0x5a, 32)],
    )
    .unwrap();
    let b64 = String::from_utf8(encode(&m, ManifestFormat::HashB64).unwrap()).unwrap();
    assert!(b64.ends_with('='), "standard alphabet with padding: {b64}");
    let hexed = String::from_utf8(encode(&m, ManifestFormat::HexHash).unwrap()).unwrap();
    assert_eq!(hexed, "5a".repeat(32));
}

#[test]
fn single_digest_format_rejects_multi_entry_manifest() {
    let m = two_entry_manifest();
    assert!(matches!(
        encode(&m, ManifestFormat::HexHash),
        Err(Error::SingleEntryFormat { count: 2, .. })
    ));
}

#[test]
fn wrong_digest_length_fails_with_line_number() {
    // 10 bytes of hex where SHA-256 needs 32
    let text = format!("{} a.txt\n{} b.txt\n", "11".repeat(32), "22".repeat(10));
    let err = decode(
        text.as_bytes(),
        ManifestFormat::HashFiles,
        DigestAlgorithm::Sha256,
        DigestEncoding::Hex,
    )
    .unwrap_err();
    match err {
        Error::MalformedManifest { line, .. } => assert_eq!(line, 2),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn duplicate_path_fails() {
    let text = format!("{h} a.txt\n{h} a.txt\n", h = "11".repeat(32));
    assert!(matches!(
        decode(
            text.as_bytes(),
            ManifestFormat::HashFiles,
            DigestAlgorithm::Sha256,
            DigestEncoding::Hex
        ),
        Err(Error::MalformedManifest { line: 2, .. })
    ));
}

#[test]
fn interior_blank_line_rejected_trailing_blank_tolerated() {
    let h = "11".repeat(32);
    let interior = format!("{h} a.txt\n\n{h} b.txt\n");
    assert!(matches!(
        decode(
            interior.as_bytes(),
            ManifestFormat::HashFiles,
            DigestAlgorithm::Sha256,
            DigestEncoding::Hex
        ),
        Err(Error::MalformedManifest { line: 2, .. })
    ));

    let trailing = format!("{h} a.txt\n\n");
    let m = decode(
        trailing.as_bytes(),
        ManifestFormat::HashFiles,
        DigestAlgorithm::Sha256,
        DigestEncoding::Hex,
    )
    .unwrap();
    assert_eq!(m.len(), 1);
}

#[test]
fn garbage_digest_text_rejected() {
    let text = "zzzz a.txt\n";
    assert!(matches!(
        decode(
            text.as_bytes(),
            ManifestFormat::HashFiles,
            DigestAlgorithm::Sha256,
            DigestEncoding::Hex
        ),
        Err(Error::MalformedManifest { line: 1, .. })
    ));
}

#[test]
fn path_may_contain_spaces_after_first_separator() {
    let text = format!("{} dir/with space.txt\n", "ab".repeat(32));
    let m = decode(
        text.as_bytes(),
        ManifestFormat::HashFiles,
        DigestAlgorithm::Sha256,
        DigestEncoding::Hex,
    )
    .unwrap();
    assert_eq!(m.entries()[0].rel_path, "dir/with space.txt");
}

proptest! {
    // Round trip over arbitrary entry sets, both directory formats, both
    // encodings. Paths avoid leading/embedded-whitespace-only pathologies
    // the line grammar cannot carry.
    #[test]
    fn directory_round_trip_property(
        paths in proptest::collection::btree_set("[a-z0-9_./-]{1,24}", 1..12),
        fill in any::<u8>(),
        use_b64 in any::<bool>(),
    ) {
        let encoding = if use_b64 { DigestEncoding::Base64 } else { DigestEncoding::Hex };
        let entries: Vec<ManifestEntry> = paths
            .iter()
            .enumerate()
            .map(|(i, p)| ManifestEntry {
                rel_path: p.clone(),
                digest: vec![fill.wrapping_add(i as u8); 32],
            })
            .collect();
        let m = Manifest::new(DigestAlgorithm::Sha256, encoding, entries).unwrap();
        for format in [ManifestFormat::HashFiles, ManifestFormat::TxtHashFiles] {
            let bytes = encode(&m, format).unwrap();
            let back = decode(&bytes, format, DigestAlgorithm::Sha256, encoding).unwrap();
            prop_assert_eq!(&back, &m);
        }
    }
}
