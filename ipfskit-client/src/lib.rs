//! # IpfsKit Client
//!
//! A small wrapper over an IPFS node's HTTP API: store raw bytes, store a
//! local file, store an opaque object, and fetch a JSON file back by hash.
//!
//! ```rust,ignore
//! let client = IpfsClient::new("localhost")?;
//! let hash = client.put_bytes(b"{\"hello\":\"world\"}").await?;
//! let doc = client.get_file(&hash.to_string()).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod client;
mod config;

pub use client::{IpfsClient, JsonObject};
pub use config::IpfsConfig;
pub use ipfskit_core::{AddedNode, ContentHash, IpfsApi, IpfsKitError, Result};
