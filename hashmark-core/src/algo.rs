use crate::error::Error;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64_STD;
use digest::{Digest as _, DynDigest};
use std::fmt;
use std::str::FromStr;

/// Digest algorithms understood by the manifest formats. Closed set; unknown
/// tokens are rejected at the boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DigestAlgorithm {
    Md5,
    Sha1,
    Sha256,
    Sha384,
    Sha512,
}

impl DigestAlgorithm {
    /// Canonical token as it appears in manifests and API calls.
    pub fn token(self) -> &'static str {
        match self {
            Self::Md5 => "MD5",
            Self::Sha1 => "SHA-1",
            Self::Sha256 => "SHA-256",
            Self::Sha384 => "SHA-384",
            Self::Sha512 => "SHA-512",
        }
    }

    /// Output length in bytes.
    pub fn digest_len(self) -> usize {
        match self {
            Self::Md5 => 16,
            Self::Sha1 => 20,
            Self::Sha256 => 32,
            Self::Sha384 => 48,
            Self::Sha512 => 64,
        }
    }

    /// Fresh incremental hasher for this algorithm.
    pub fn hasher(self) -> Box<dyn DynDigest> {
        match self {
            Self::Md5 => Box::new(md5::Md5::new()),
            Self::Sha1 => Box::new(sha1::Sha1::new()),
            Self::Sha256 => Box::new(sha2::Sha256::new()),
            Self::Sha384 => Box::new(sha2::Sha384::new()),
            Self::Sha512 => Box::new(sha2::Sha512::new()),
        }
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for DigestAlgorithm {
    type Err = Error;

    // Tokens are case-sensitive: "sha-256" is not a known algorithm.
    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "MD5" => Ok(Self::Md5),
            "SHA-1" => Ok(Self::Sha1),
            "SHA-256" => Ok(Self::Sha256),
            "SHA-384" => Ok(Self::Sha384),
            "SHA-512" => Ok(Self::Sha512),
            other => Err(Error::UnsupportedAlgorithm(other.to_string())),
        }
    }
}

/// Textual representation of raw digest bytes. Both directions are pure and
/// invertible.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DigestEncoding {
    /// Lowercase, two hex digits per byte.
    Hex,
    /// Standard alphabet, with padding.
    Base64,
}

impl DigestEncoding {
    pub fn token(self) -> &'static str {
        match self {
            Self::Hex => "HEX",
            Self::Base64 => "BASE64",
        }
    }

    pub fn encode(self, digest: &[u8]) -> String {
        match self {
            Self::Hex => hex::encode(digest),
            Self::Base64 => BASE64_STD.encode(digest),
        }
    }

    /// Decode digest text back to raw bytes. Returns `None` when the text is
    /// not valid for this encoding; callers attach line context.
    pub fn decode(self, text: &str) -> Option<Vec<u8>> {
        match self {
            Self::Hex => hex::decode(text).ok(),
            Self::Base64 => BASE64_STD.decode(text).ok(),
        }
    }
}

impl fmt::Display for DigestEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for DigestEncoding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "HEX" => Ok(Self::Hex),
            "BASE64" => Ok(Self::Base64),
            other => Err(Error::UnsupportedEncoding(other.to_string())),
        }
    }
}
