//! Contains all the constants required for the ssz codec.

/// Number of bytes per serialized length offset.
pub const BYTES_PER_LENGTH_OFFSET: usize = 4;
/// Bytes per U256.
pub const BYTES: usize = 32;

// Fixed byte blob lengths used by consensus schemas.

/// Fork version.
pub const FORK_LENGTH: usize = 4;
/// Block nonce.
pub const NONCE_LENGTH: usize = 8;
/// Execution address.
pub const ADDRESS_LENGTH: usize = 20;
/// Verkle stem.
pub const VERKLE_STEM_LENGTH: usize = 31;
/// Hash.
pub const HASH_LENGTH: usize = 32;
/// BLS public key.
pub const PUBKEY_LENGTH: usize = 48;
/// Committee bits.
pub const COMMITTEE_LENGTH: usize = 64;
/// BLS signature.
pub const SIGNATURE_LENGTH: usize = 96;
/// Logs bloom.
pub const BLOOM_LENGTH: usize = 256;
/// Blob sidecar payload.
pub const BLOB_LENGTH: usize = 131072;

/// Every blob length above, smallest first.
pub const COMMON_BYTES_LENGTHS: [usize; 10] = [
    FORK_LENGTH,
    NONCE_LENGTH,
    ADDRESS_LENGTH,
    VERKLE_STEM_LENGTH,
    HASH_LENGTH,
    PUBKEY_LENGTH,
    COMMITTEE_LENGTH,
    SIGNATURE_LENGTH,
    BLOOM_LENGTH,
    BLOB_LENGTH,
];

/// Number of u64 slots in a slashings vector.
pub const SLASHINGS_LENGTH: usize = 8192;

// Fixed outer counts of blob arrays.

/// Verkle IPA vector count.
pub const IPA_VECTOR_LENGTH: usize = 8;
/// Merkle proof branch depth.
pub const PROOF_LENGTH: usize = 33;
/// Sync committee size.
pub const SYNC_COMMITTEE_LENGTH: usize = 512;
/// Historical block and state roots.
pub const HISTORY_LENGTH: usize = 8192;
/// Randao mixes.
pub const RANDAO_LENGTH: usize = 65536;

/// Every blob array count above, smallest first.
pub const COMMON_BYTES_ARRAY_LENGTHS: [usize; 5] = [
    IPA_VECTOR_LENGTH,
    PROOF_LENGTH,
    SYNC_COMMITTEE_LENGTH,
    HISTORY_LENGTH,
    RANDAO_LENGTH,
];

// Fixed-size bit vectors.

/// Justification bits of a beacon state.
pub const JUSTIFICATION_BITS_SIZE: usize = 4;
/// Bytes a justification bit vector packs into.
pub const JUSTIFICATION_BITS_LENGTH: usize = 1;

/// Every bit vector byte length above.
pub const COMMON_BITS_LENGTHS: [usize; 1] = [JUSTIFICATION_BITS_LENGTH];

/// Upper bound on the elements reserved ahead of decoding a list.
pub const MAX_PREALLOCATED_ITEMS: usize = 4096;
/// Dynamic byte payloads are read from the source in chunks of at most this many bytes.
pub const READ_CHUNK_SIZE: usize = 4096;

/// Maximum number of idle contexts a pool keeps around.
pub const POOL_MAX_IDLE: usize = 64;
/// Contexts whose buffers grew past this many bytes are dropped instead of being recycled.
pub const POOL_MAX_RETAINED_BYTES: usize = 1 << 20;
