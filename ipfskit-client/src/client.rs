//! The client wrapper.
//!
//! Holds a single [`IpfsApi`] handle, created once and shared read-only by
//! every clone of the client. Each operation forwards to that handle.

use std::path::Path;
use std::sync::Arc;

use bytes::Bytes;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use ipfskit_core::constants::ANONYMOUS_PART_NAME;
use ipfskit_core::error::{IpfsKitError, Result};
use ipfskit_core::traits::IpfsApi;
use ipfskit_core::types::ContentHash;
use ipfskit_http::HttpIpfsApi;

use crate::config::IpfsConfig;

/// A decoded JSON file.
pub type JsonObject = serde_json::Map<String, Value>;

/// Client for storing and fetching content on an IPFS node.
#[derive(Clone)]
pub struct IpfsClient {
    api: Arc<dyn IpfsApi>,
}

impl IpfsClient {
    /// Creates a client for the node at `host`, on the default API port.
    pub fn new(host: impl Into<String>) -> Result<Self> {
        Self::with_config(IpfsConfig::new(host))
    }

    /// Creates a client from `IPFS_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::with_config(IpfsConfig::from_env())
    }

    /// Creates a client talking HTTP to the configured node.
    pub fn with_config(config: IpfsConfig) -> Result<Self> {
        let api = HttpIpfsApi::with_config(config.http_config()?)?;
        debug!(base_url = api.base_url(), "IPFS client ready");
        Ok(Self::with_api(Arc::new(api)))
    }

    /// Creates a client over any [`IpfsApi`] implementation.
    pub fn with_api(api: Arc<dyn IpfsApi>) -> Self {
        Self { api }
    }

    /// Stores raw bytes as a block and returns its hash.
    #[instrument(skip(self, bytes), fields(len = bytes.len()))]
    pub async fn put_bytes(&self, bytes: &[u8]) -> Result<ContentHash> {
        logged("put_bytes", self.api.block_put(bytes.to_vec()).await)
    }

    /// Fetches the file behind a CID and decodes it as a JSON object.
    ///
    /// Takes the base58 `Qm...` form as well as CIDv1 strings such as the
    /// `bafk...` keys returned by [`put_bytes`](Self::put_bytes).
    #[instrument(skip(self))]
    pub async fn get_file(&self, hash: &str) -> Result<JsonObject> {
        let result: Result<JsonObject> = async {
            let data = self.fetch(hash).await?;
            decode_json_object(hash, &data)
        }
        .await;

        logged("get_file", result)
    }

    /// Fetches the raw content behind a CID.
    #[instrument(skip(self))]
    pub async fn get_bytes(&self, hash: &str) -> Result<Vec<u8>> {
        logged("get_bytes", self.fetch(hash).await)
    }

    /// Adds a local file and returns the hash of its content.
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub async fn put_file(&self, path: impl AsRef<Path>) -> Result<ContentHash> {
        let path = path.as_ref();

        let result: Result<ContentHash> = async {
            let data = tokio::fs::read(path)
                .await
                .map_err(|source| IpfsKitError::FileRead {
                    path: path.to_path_buf(),
                    source,
                })?;

            let file_name = path
                .file_name()
                .and_then(|name| name.to_str())
                .unwrap_or(ANONYMOUS_PART_NAME);

            let nodes = self.api.add(file_name, data).await?;
            nodes
                .first()
                .ok_or_else(|| IpfsKitError::InvalidResponse("add returned no nodes".into()))?
                .content_hash()
        }
        .await;

        logged("put_file", result)
    }

    /// Stores an opaque binary object as a block and returns its hash.
    #[instrument(skip(self, object))]
    pub async fn put_object(&self, object: impl Into<Bytes>) -> Result<ContentHash> {
        let object: Bytes = object.into();
        debug!(len = object.len(), "Storing object");
        logged("put_object", self.api.block_put(object.to_vec()).await)
    }

    /// Returns the node's version string.
    #[instrument(skip(self))]
    pub async fn node_version(&self) -> Result<String> {
        logged("node_version", self.api.version().await)
    }

    async fn fetch(&self, hash: &str) -> Result<Vec<u8>> {
        let content_hash = ContentHash::from_cid_str(hash)?;
        self.api.cat(&content_hash).await
    }
}

fn logged<T>(operation: &str, result: Result<T>) -> Result<T> {
    if let Err(e) = &result {
        warn!(operation, error = %e, "IPFS operation failed");
    }
    result
}

fn decode_json_object(hash: &str, data: &[u8]) -> Result<JsonObject> {
    let text = std::str::from_utf8(data).map_err(|e| {
        IpfsKitError::InvalidResponse(format!("content of '{}' is not UTF-8: {}", hash, e))
    })?;

    match serde_json::from_str::<Value>(text)? {
        Value::Object(map) => Ok(map),
        other => Err(IpfsKitError::NotJsonObject {
            hash: hash.to_string(),
            found: json_kind(&other),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
