//! Common traits for IpfsKit.
//!
//! [`IpfsApi`] is the handle the client wrapper forwards to. The HTTP
//! transport implements it; tests substitute their own.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{AddedNode, ContentHash};

// ═══════════════════════════════════════════════════════════════════════════════
// IPFS API TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// Interface to an IPFS node's API.
#[async_trait]
pub trait IpfsApi: Send + Sync {
    /// Stores `data` as a single raw block and returns its hash.
    async fn block_put(&self, data: Vec<u8>) -> Result<ContentHash>;

    /// Adds `data` as a file named `file_name`.
    ///
    /// Returns every node the API reported, the file itself first.
    async fn add(&self, file_name: &str, data: Vec<u8>) -> Result<Vec<AddedNode>>;

    /// Reads the content behind `hash`.
    async fn cat(&self, hash: &ContentHash) -> Result<Vec<u8>>;

    /// Returns the node's version string.
    async fn version(&self) -> Result<String>;
}

