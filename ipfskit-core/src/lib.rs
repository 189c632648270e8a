//! # IpfsKit Core
//!
//! Core types, errors, and traits shared by the IpfsKit crates:
//!
//! - **Types**: [`ContentHash`] and the node's response records
//! - **Errors**: [`IpfsKitError`] and the crate-wide [`Result`] alias
//! - **Constants**: API defaults (port, prefix, timeout)
//! - **Traits**: [`IpfsApi`], the seam between the client wrapper and a transport
//!
//! ## Example
//!
//! ```rust
//! use ipfskit_core::ContentHash;
//!
//! let hash = ContentHash::from_base58("QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG").unwrap();
//! assert_eq!(hash.code(), 0x12);
//!
//! let raw: ContentHash = "bafkreifzjut3te2nhyekklss27nh3k72ysco7y32koao5eei66wof36n5e".parse().unwrap();
//! assert_eq!(raw.codec(), 0x55);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use constants::*;
pub use error::{IpfsKitError, Result};
pub use traits::*;
pub use types::*;
