use hashmark_core::algo::{DigestAlgorithm, DigestEncoding};
use hashmark_core::digest::digest_file;
use hashmark_core::error::Error;
use rand::{Rng, SeedableRng};

fn hex_of(path: &std::path::Path, algo: DigestAlgorithm) -> String {
    DigestEncoding::Hex.encode(&digest_file(path, algo).unwrap())
}

#[test]
fn empty_input_known_vectors() {
    let td = tempfile::tempdir().unwrap();
    let p = td.path().join("empty.bin");
    std::fs::write(&p, b"").unwrap();
    assert_eq!(
        hex_of(&p, DigestAlgorithm::Sha256),
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
    assert_eq!(hex_of(&p, DigestAlgorithm::Md5), "d41d8cd98f00b204e9800998ecf8427e");
}

#[test]
fn abc_known_vectors_all_algorithms() {
    let td = tempfile::tempdir().unwrap();
    let p = td.path().join("abc.txt");
    std::fs::write(&p, b"abc").unwrap();
    assert_eq!(hex_of(&p, DigestAlgorithm::Md5), "900150983cd24fb0d6963f7d28e17f72");
    assert_eq!(hex_of(&p, DigestAlgorithm::Sha1), "a9993e364706816aba3e25717850c26c9cd0d89d");
    assert_eq!(
        hex_of(&p, DigestAlgorithm::Sha256),
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
    assert_eq!(
        hex_of(&p, DigestAlgorithm::Sha384),
        "cb00753f45a35e8bb5a03d699ac65007272c32ab0eded1631a8b605a43ff5bed\
         8086072ba1e7cc2358baeca134c825a9"
    );
    assert_eq!(
        hex_of(&p, DigestAlgorithm::Sha512),
        "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a\
         2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f"
    );
}

#[test]
fn streaming_matches_one_shot_across_chunk_boundaries() {
    use sha2::{Digest, Sha256};
    let td = tempfile::tempdir().unwrap();
    let mut rng = rand::rngs::StdRng::seed_from_u64(7);
    // Sizes straddling the 8 KiB read chunk
    for size in [0usize, 1, 8191, 8192, 8193, 3 * 8192 + 17, 100 * 1024] {
        let data: Vec<u8> = (0..size).map(|_| rng.gen()).collect();
        let p = td.path().join(format!("f{size}.bin"));
        std::fs::write(&p, &data).unwrap();
        let expect = Sha256::digest(&data).to_vec();
        assert_eq!(digest_file(&p, DigestAlgorithm::Sha256).unwrap(), expect, "size {size}");
    }
}

#[test]
fn missing_file_is_io_error() {
    let td = tempfile::tempdir().unwrap();
    let err = digest_file(&td.path().join("nope.bin"), DigestAlgorithm::Sha256).unwrap_err();
    match err {
        Error::Io { source, .. } => assert_eq!(source.kind(), std::io::ErrorKind::NotFound),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn digest_length_matches_algorithm() {
    let td = tempfile::tempdir().unwrap();
    let p = td.path().join("x.bin");
    std::fs::write(&p, b"payload").unwrap();
    for algo in [
        DigestAlgorithm::Md5,
        DigestAlgorithm::Sha1,
        DigestAlgorithm::Sha256,
        DigestAlgorithm::Sha384,
        DigestAlgorithm::Sha512,
    ] {
        assert_eq!(digest_file(&p, algo).unwrap().len(), algo.digest_len());
    }
}
