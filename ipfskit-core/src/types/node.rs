//! Records returned by the node.

use serde::{Deserialize, Serialize};

use crate::error::{IpfsKitError, Result};
use crate::types::ContentHash;

/// One entry of an `add` response.
///
/// The node reports sizes as decimal strings, so `size` is kept verbatim and
/// parsed on demand.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddedNode {
    /// Name the content was added under
    #[serde(rename = "Name")]
    pub name: String,
    /// CID of the added content
    #[serde(rename = "Hash")]
    pub hash: String,
    /// Cumulative size, as reported
    #[serde(rename = "Size", default)]
    pub size: String,
}

impl AddedNode {
    /// Parses the reported CID into a [`ContentHash`].
    pub fn content_hash(&self) -> Result<ContentHash> {
        ContentHash::from_cid_str(&self.hash)
    }

    /// Parses the reported size.
    pub fn size_bytes(&self) -> Result<u64> {
        self.size.parse().map_err(|_| {
            IpfsKitError::InvalidResponse(format!(
                "size '{}' of '{}' is not a number",
                self.size, self.name
            ))
        })
    }
}
