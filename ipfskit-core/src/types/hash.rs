//! Content hashes.

use std::fmt;
use std::str::FromStr;

use cid::{Cid, Version};
use multihash::Multihash;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::constants::MAX_DIGEST_SIZE;
use crate::error::{IpfsKitError, Result};

/// The CID naming a piece of content stored on IPFS.
///
/// The codec is kept alongside the multihash: a raw block and a dag-pb node
/// can share a digest but are different content to the node. CIDv0 prints
/// as base58btc (`Qm...`), CIDv1 as multibase base32 (`bafy...`, `bafk...`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ContentHash(Cid);

impl ContentHash {
    /// Wraps an already parsed CID.
    pub fn new(cid: Cid) -> Self {
        Self(cid)
    }

    /// Parses a base58btc-encoded sha2-256 multihash, i.e. a CIDv0.
    pub fn from_base58(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(IpfsKitError::invalid_hash(s, "hash cannot be empty"));
        }

        let bytes = bs58::decode(trimmed)
            .into_vec()
            .map_err(|e| IpfsKitError::invalid_hash(s, e))?;

        let multihash = Multihash::<MAX_DIGEST_SIZE>::from_bytes(&bytes)
            .map_err(|e| IpfsKitError::invalid_hash(s, e))?;

        Cid::new_v0(multihash)
            .map(Self)
            .map_err(|e| IpfsKitError::invalid_hash(s, e))
    }

    /// Parses a CID string.
    ///
    /// Accepts CIDv0 (`Qm...`) as well as multibase CIDv1 (`bafy...`,
    /// `bafk...`), which is what current nodes return for raw blocks.
    pub fn from_cid_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(IpfsKitError::invalid_hash(s, "CID cannot be empty"));
        }

        Cid::try_from(trimmed)
            .map(Self)
            .map_err(|e| IpfsKitError::invalid_hash(s, e))
    }

    /// Base58btc of the bare multihash, without version or codec.
    pub fn multihash_base58(&self) -> String {
        bs58::encode(self.0.hash().to_bytes()).into_string()
    }

    /// Binary CID representation.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.0.to_bytes()
    }

    /// Multihash code of the hash function.
    pub fn code(&self) -> u64 {
        self.0.hash().code()
    }

    /// The raw digest.
    pub fn digest(&self) -> &[u8] {
        self.0.hash().digest()
    }

    /// CID codec of the content (raw, dag-pb, ...).
    pub fn codec(&self) -> u64 {
        self.0.codec()
    }

    /// True for CIDv0.
    pub fn is_v0(&self) -> bool {
        self.0.version() == Version::V0
    }

    /// The wrapped CID.
    pub fn as_cid(&self) -> &Cid {
        &self.0
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for ContentHash {
    type Err = IpfsKitError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_cid_str(s)
    }
}

impl Serialize for ContentHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ContentHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_cid_str(&s).map_err(serde::de::Error::custom)
    }
}
