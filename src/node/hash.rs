//! Content digests for node identity.
//!
//! Nodes are fingerprinted by hashing the exact bit patterns of their
//! coordinates. Two nodes hash equal only when their stored values are
//! identical, so digests detect literal duplicates (a node shared between
//! overlapping sub-meshes), never near-duplicates.
//!
//! ## Canonical representation
//! Each coordinate contributes its IEEE-754 little-endian bytes, in the order
//! x, y and (for the full hash) z. `0.0` and `-0.0` therefore hash differently.

use std::fmt;
use std::str::FromStr;

use sha2::Digest;

use crate::error::NodeError;

/// Digest algorithm used for node hashes.
///
/// A closed set of standard cryptographic hashes. The digests are used only
/// for equality checks, not for any security property. SHA-1 is the default
/// so hashes stay comparable with existing mesh-comparison tooling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum HashAlgorithm {
    /// MD5 (requires the `md5` feature)
    Md5,
    /// SHA-1
    #[default]
    Sha1,
    /// SHA-224
    Sha224,
    /// SHA-256
    Sha256,
    /// SHA-384
    Sha384,
    /// SHA-512
    Sha512,
}

impl HashAlgorithm {
    /// All supported algorithms.
    pub const ALL: [HashAlgorithm; 6] = [
        HashAlgorithm::Md5,
        HashAlgorithm::Sha1,
        HashAlgorithm::Sha224,
        HashAlgorithm::Sha256,
        HashAlgorithm::Sha384,
        HashAlgorithm::Sha512,
    ];

    /// Canonical name, e.g. `"SHA-256"`.
    pub fn name(&self) -> &'static str {
        match self {
            HashAlgorithm::Md5 => "MD5",
            HashAlgorithm::Sha1 => "SHA-1",
            HashAlgorithm::Sha224 => "SHA-224",
            HashAlgorithm::Sha256 => "SHA-256",
            HashAlgorithm::Sha384 => "SHA-384",
            HashAlgorithm::Sha512 => "SHA-512",
        }
    }

    /// Digest length in bytes.
    pub fn digest_len(&self) -> usize {
        match self {
            HashAlgorithm::Md5 => 16,
            HashAlgorithm::Sha1 => 20,
            HashAlgorithm::Sha224 => 28,
            HashAlgorithm::Sha256 => 32,
            HashAlgorithm::Sha384 => 48,
            HashAlgorithm::Sha512 => 64,
        }
    }

    /// Whether a backend for this algorithm is compiled in.
    pub fn is_available(&self) -> bool {
        match self {
            HashAlgorithm::Md5 => cfg!(feature = "md5"),
            _ => true,
        }
    }

    /// Hash a sequence of coordinates in their canonical byte form.
    ///
    /// # Errors
    /// [`NodeError::HashUnavailable`] if the backend is not compiled in.
    pub fn digest_coords(&self, coords: &[f64]) -> Result<NodeDigest, NodeError> {
        let bytes = match self {
            #[cfg(feature = "md5")]
            HashAlgorithm::Md5 => digest_with::<md5::Md5>(coords),
            #[cfg(not(feature = "md5"))]
            HashAlgorithm::Md5 => return Err(NodeError::HashUnavailable(*self)),
            HashAlgorithm::Sha1 => digest_with::<sha1::Sha1>(coords),
            HashAlgorithm::Sha224 => digest_with::<sha2::Sha224>(coords),
            HashAlgorithm::Sha256 => digest_with::<sha2::Sha256>(coords),
            HashAlgorithm::Sha384 => digest_with::<sha2::Sha384>(coords),
            HashAlgorithm::Sha512 => digest_with::<sha2::Sha512>(coords),
        };
        Ok(NodeDigest(bytes))
    }
}

fn digest_with<D: Digest>(coords: &[f64]) -> Vec<u8> {
    let mut hasher = D::new();
    for c in coords {
        hasher.update(c.to_le_bytes());
    }
    hasher.finalize().to_vec()
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashAlgorithm {
    type Err = NodeError;

    /// Parse a name such as `"sha256"`, `"SHA-256"` or `"Sha_256"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_lowercase();

        match key.as_str() {
            "md5" => Ok(HashAlgorithm::Md5),
            "sha1" => Ok(HashAlgorithm::Sha1),
            "sha224" => Ok(HashAlgorithm::Sha224),
            "sha256" => Ok(HashAlgorithm::Sha256),
            "sha384" => Ok(HashAlgorithm::Sha384),
            "sha512" => Ok(HashAlgorithm::Sha512),
            _ => Err(NodeError::UnsupportedAlgorithm(s.to_string())),
        }
    }
}

impl TryFrom<&str> for HashAlgorithm {
    type Error = NodeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<String> for HashAlgorithm {
    type Error = NodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<i32> for HashAlgorithm {
    type Error = NodeError;

    /// Legacy numeric codes used by older mesh-comparison tools.
    ///
    /// Code 0 (MD4) is recognized but not supported.
    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(HashAlgorithm::Md5),
            2 => Ok(HashAlgorithm::Sha1),
            3 => Ok(HashAlgorithm::Sha224),
            4 => Ok(HashAlgorithm::Sha256),
            5 => Ok(HashAlgorithm::Sha384),
            6 => Ok(HashAlgorithm::Sha512),
            0 => Err(NodeError::UnsupportedAlgorithm("MD4".to_string())),
            _ => Err(NodeError::UnsupportedAlgorithm(format!("code {}", value))),
        }
    }
}

/// Digest bytes produced by a [`HashAlgorithm`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeDigest(Vec<u8>);

impl NodeDigest {
    /// Raw digest bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Digest length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Lowercase hexadecimal form.
    pub fn to_hex(&self) -> String {
        format!("{:x}", self)
    }
}

impl AsRef<[u8]> for NodeDigest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::LowerHex for NodeDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl fmt::Display for NodeDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(self, f)
    }
}
