//! Defaults for talking to an IPFS node's RPC API.

// ═══════════════════════════════════════════════════════════════════════════════
// ENDPOINT DEFAULTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Port the node serves its RPC API on.
pub const DEFAULT_API_PORT: u16 = 5001;

/// Host used when none is configured.
pub const DEFAULT_API_HOST: &str = "localhost";

/// Scheme used when none is configured.
pub const DEFAULT_API_SCHEME: &str = "http";

/// Path prefix of every RPC endpoint.
pub const API_PREFIX: &str = "/api/v0";

/// Request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

// ═══════════════════════════════════════════════════════════════════════════════
// MULTIPART NAMES
// ═══════════════════════════════════════════════════════════════════════════════

/// File name attached to payloads that have none (raw blocks, in-memory adds).
pub const ANONYMOUS_PART_NAME: &str = "data";

/// Form field carrying the payload of `block/put`.
pub const BLOCK_FORM_FIELD: &str = "data";

/// Form field carrying the file of `add`.
pub const ADD_FORM_FIELD: &str = "file";

/// Content type of every uploaded part.
pub const OCTET_STREAM: &str = "application/octet-stream";

// ═══════════════════════════════════════════════════════════════════════════════
// MULTIHASH & CID
// ═══════════════════════════════════════════════════════════════════════════════

/// Largest digest a [`crate::ContentHash`] can carry.
pub const MAX_DIGEST_SIZE: usize = 64;

/// Multihash code of sha2-256, the node's default hash function.
pub const SHA2_256_CODE: u64 = 0x12;

/// CID codec of raw blocks, which `block/put` stores by default.
pub const RAW_CODEC: u64 = 0x55;

/// CID codec of dag-pb nodes, implied by every CIDv0.
pub const DAG_PB_CODEC: u64 = 0x70;
