//! Domain types for IpfsKit.
//!
//! - [`ContentHash`]: the multihash identifying a piece of content
//! - [`AddedNode`]: one entry of the node's `add` response

mod hash;
mod node;

pub use hash::*;
pub use node::*;
