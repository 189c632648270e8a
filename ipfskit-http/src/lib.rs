//! HTTP transport for an IPFS node's RPC API.
//!
//! Implements [`ipfskit_core::IpfsApi`] on top of `reqwest`.

mod http;

pub use http::{HttpApiConfig, HttpIpfsApi};
