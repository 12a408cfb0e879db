//! Fixed-size binary blobs and the named lengths consensus schemas use.

use crate::constants::*;
use crate::{Decoder, Encoder, Object};
use alloy_primitives::{Address, Bloom, FixedBytes};

/// A binary blob whose length is fixed by its type.
///
/// Implemented for plain byte arrays and the alloy fixed-bytes family, so one encoder and
/// decoder helper covers every length.
pub trait FixedBlob {
    /// Length of the blob in bytes.
    const LEN: usize;

    /// Returns the blob contents.
    fn as_blob(&self) -> &[u8];

    /// Returns the blob contents for overwriting.
    fn as_blob_mut(&mut self) -> &mut [u8];
}

impl<const N: usize> FixedBlob for [u8; N] {
    const LEN: usize = N;

    fn as_blob(&self) -> &[u8] {
        self
    }

    fn as_blob_mut(&mut self) -> &mut [u8] {
        self
    }
}

impl<const N: usize> FixedBlob for FixedBytes<N> {
    const LEN: usize = N;

    fn as_blob(&self) -> &[u8] {
        &self.0
    }

    fn as_blob_mut(&mut self) -> &mut [u8] {
        &mut self.0
    }
}

macro_rules! impl_wrapped_blob {
    ($type:ty, $len:expr) => {
        impl FixedBlob for $type {
            const LEN: usize = $len;

            fn as_blob(&self) -> &[u8] {
                &self.0.0
            }

            fn as_blob_mut(&mut self) -> &mut [u8] {
                &mut self.0.0
            }
        }
    };
}

impl_wrapped_blob!(Address, ADDRESS_LENGTH);
impl_wrapped_blob!(Bloom, BLOOM_LENGTH);

macro_rules! impl_blob_object {
    ($([$($generics:tt)*] $type:ty),* $(,)?) => {
        $(
            impl<$($generics)*> Object for $type {
                /// Blobs are always static.
                fn static_ssz() -> bool {
                    true
                }

                fn size_ssz(&self) -> u32 {
                    <$type as FixedBlob>::LEN as u32
                }

                fn encode_ssz(&self, enc: &mut Encoder<'_>) {
                    enc.encode_bytes_fixed(self);
                }

                fn decode_ssz(&mut self, dec: &mut Decoder<'_>) {
                    dec.decode_bytes_fixed(self);
                }
            }
        )*
    };
}

impl_blob_object!(
    [const N: usize] [u8; N],
    [const N: usize] FixedBytes<N>,
    [] Address,
    [] Bloom,
);

/// Fork version.
pub type Fork = FixedBytes<FORK_LENGTH>;
/// Block nonce.
pub type Nonce = FixedBytes<NONCE_LENGTH>;
/// Verkle stem.
pub type VerkleStem = FixedBytes<VERKLE_STEM_LENGTH>;
/// 32 byte hash.
pub type Hash = FixedBytes<HASH_LENGTH>;
/// BLS public key.
pub type Pubkey = FixedBytes<PUBKEY_LENGTH>;
/// Committee bits.
pub type Committee = FixedBytes<COMMITTEE_LENGTH>;
/// BLS signature.
pub type Signature = FixedBytes<SIGNATURE_LENGTH>;
/// Blob sidecar payload.
pub type Blob = FixedBytes<BLOB_LENGTH>;

/// Slashed balances per epoch.
pub type Slashings = [u64; SLASHINGS_LENGTH];

/// Verkle IPA vector.
pub type IpaVector = [Hash; IPA_VECTOR_LENGTH];
/// Merkle proof branch.
pub type Proof = [Hash; PROOF_LENGTH];
/// Sync committee public keys.
pub type SyncCommitteeKeys = [Pubkey; SYNC_COMMITTEE_LENGTH];
/// Historical block or state roots.
pub type HistoricalRoots = [Hash; HISTORY_LENGTH];
/// Randao mixes.
pub type RandaoMixes = [Hash; RANDAO_LENGTH];
