//! Record definitions shared by the integration tests.

#![allow(dead_code)]

use alloy_primitives::{Address, U256};
use ssz_stream::{
    Decoder, Encoder, Hash, IPA_VECTOR_LENGTH, IpaVector, List, Object, SLASHINGS_LENGTH,
    Slashings,
};

pub const MAX_EXTRA_DATA: usize = 32;

/// Static: epoch and block root.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Checkpoint {
    pub epoch: u64,
    pub root: Hash,
}

impl Object for Checkpoint {
    fn static_ssz() -> bool {
        true
    }

    fn size_ssz(&self) -> u32 {
        40
    }

    fn encode_ssz(&self, enc: &mut Encoder<'_>) {
        enc.encode_u64(self.epoch);
        enc.encode_bytes_fixed(&self.root);
    }

    fn decode_ssz(&mut self, dec: &mut Decoder<'_>) {
        dec.decode_u64(&mut self.epoch);
        dec.decode_bytes_fixed(&mut self.root);
    }
}

/// Static: a withdrawal request.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Withdrawal {
    pub index: u64,
    pub address: Address,
    pub amount: u64,
    pub full: bool,
}

impl Object for Withdrawal {
    fn static_ssz() -> bool {
        true
    }

    fn size_ssz(&self) -> u32 {
        37
    }

    fn encode_ssz(&self, enc: &mut Encoder<'_>) {
        enc.encode_u64(self.index);
        enc.encode_bytes_fixed(&self.address);
        enc.encode_u64(self.amount);
        enc.encode_bool(self.full);
    }

    fn decode_ssz(&mut self, dec: &mut Decoder<'_>) {
        dec.decode_u64(&mut self.index);
        dec.decode_bytes_fixed(&mut self.address);
        dec.decode_u64(&mut self.amount);
        dec.decode_bool(&mut self.full);
    }
}

/// Dynamic: mixes every kind of field.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Payload {
    pub slot: u64,
    pub fee_recipient: Address,
    pub base_fee: U256,
    pub extra_data: Vec<u8>,
    pub checkpoint: Checkpoint,
    pub withdrawals: List<Withdrawal, 16>,
    pub transactions: List<List<u8, 64>, 8>,
    pub proof: IpaVector,
}

impl Payload {
    pub const FIXED_SIZE: u32 = 8 + 20 + 32 + 4 + 40 + 4 + 4 + (IPA_VECTOR_LENGTH as u32) * 32;
}

impl Object for Payload {
    fn static_ssz() -> bool {
        false
    }

    fn size_ssz(&self) -> u32 {
        Self::FIXED_SIZE
            + self.extra_data.len() as u32
            + self.withdrawals.size_ssz()
            + self.transactions.size_ssz()
    }

    fn fixed_size_ssz(&self) -> u32 {
        Self::FIXED_SIZE
    }

    fn encode_ssz(&self, enc: &mut Encoder<'_>) {
        enc.encode_u64(self.slot);
        enc.encode_bytes_fixed(&self.fee_recipient);
        enc.encode_u256(&self.base_fee);
        enc.encode_dynamic_bytes_offset(&self.extra_data);
        enc.encode_static_object(&self.checkpoint);
        enc.encode_dynamic_object_offset(&self.withdrawals);
        enc.encode_dynamic_object_offset(&self.transactions);
        enc.encode_bytes_array(&self.proof);

        enc.encode_dynamic_bytes_content(&self.extra_data);
        enc.encode_dynamic_object_content(&self.withdrawals);
        enc.encode_dynamic_object_content(&self.transactions);
    }

    fn decode_ssz(&mut self, dec: &mut Decoder<'_>) {
        dec.decode_u64(&mut self.slot);
        dec.decode_bytes_fixed(&mut self.fee_recipient);
        dec.decode_u256(&mut self.base_fee);
        dec.decode_offset();
        dec.decode_static_object(&mut self.checkpoint);
        dec.decode_offset();
        dec.decode_offset();
        dec.decode_bytes_array(&mut self.proof);

        dec.decode_dynamic_bytes(&mut self.extra_data, MAX_EXTRA_DATA);
        dec.decode_dynamic_object(&mut self.withdrawals);
        dec.decode_dynamic_object(&mut self.transactions);
    }
}

/// Dynamic: a single byte list and nothing else.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ExtraData {
    pub data: Vec<u8>,
}

impl Object for ExtraData {
    fn static_ssz() -> bool {
        false
    }

    fn size_ssz(&self) -> u32 {
        4 + self.data.len() as u32
    }

    fn fixed_size_ssz(&self) -> u32 {
        4
    }

    fn encode_ssz(&self, enc: &mut Encoder<'_>) {
        enc.encode_dynamic_bytes_offset(&self.data);
        enc.encode_dynamic_bytes_content(&self.data);
    }

    fn decode_ssz(&mut self, dec: &mut Decoder<'_>) {
        dec.decode_offset();
        dec.decode_dynamic_bytes(&mut self.data, MAX_EXTRA_DATA);
    }
}

/// Static: a full slashings vector.
#[derive(Debug, Clone, PartialEq)]
pub struct SlashingsState {
    pub slashings: Box<Slashings>,
}

impl Default for SlashingsState {
    fn default() -> Self {
        Self {
            slashings: Box::new([0; SLASHINGS_LENGTH]),
        }
    }
}

impl Object for SlashingsState {
    fn static_ssz() -> bool {
        true
    }

    fn size_ssz(&self) -> u32 {
        (SLASHINGS_LENGTH * 8) as u32
    }

    fn encode_ssz(&self, enc: &mut Encoder<'_>) {
        enc.encode_u64s_fixed(&*self.slashings);
    }

    fn decode_ssz(&mut self, dec: &mut Decoder<'_>) {
        dec.decode_u64s_fixed(&mut *self.slashings);
    }
}

/// A payload whose contents vary with `seed`.
pub fn sample_payload(seed: u64) -> Payload {
    let withdrawals = (0..seed % 5)
        .map(|i| Withdrawal {
            index: seed + i,
            address: Address::repeat_byte(i as u8),
            amount: 32_000_000_000 + i,
            full: i % 2 == 0,
        })
        .collect();
    let transactions = (0..seed % 4)
        .map(|i| List::new(vec![seed as u8; (i * 7 % 64) as usize]).unwrap())
        .collect();

    let mut proof = IpaVector::default();
    for (i, hash) in proof.iter_mut().enumerate() {
        *hash = Hash::repeat_byte((seed as u8).wrapping_add(i as u8));
    }

    Payload {
        slot: seed * 32,
        fee_recipient: Address::repeat_byte(seed as u8),
        base_fee: U256::from(seed) << 100usize,
        extra_data: vec![0xee; (seed % MAX_EXTRA_DATA as u64) as usize],
        checkpoint: Checkpoint {
            epoch: seed,
            root: Hash::repeat_byte(0x42),
        },
        withdrawals: List::new(withdrawals).unwrap(),
        transactions: List::new(transactions).unwrap(),
        proof,
    }
}
