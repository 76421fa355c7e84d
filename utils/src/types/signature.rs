use crate::buffer::TxnBuffer;
use crate::decode::*;

use super::{ByteString, CoveredFields, Hash};

// Bytes of the signature being produced that are covered by its own sighash:
// ParentID, PublicKeyIndex and Timelock, up to the CoveredFields.
pub const SIGNATURE_PREFIX_LENGTH: usize = Hash::ENCODED_LENGTH + 8 + 8;

#[derive(Debug, Default, PartialEq)]
pub struct TransactionSignature {
    pub parent_id: Hash,
    pub public_key_index: u64,
    pub timelock: u64,
    pub covered_fields: CoveredFields,
    pub signature: ByteString,
}

impl Decode for TransactionSignature {
    fn decode(buffer: &mut TxnBuffer) -> DecodeResult<Self> {
        Ok(TransactionSignature {
            parent_id: Hash::decode(buffer)?,
            public_key_index: buffer.read_u64()?,
            timelock: buffer.read_u64()?,
            covered_fields: CoveredFields::decode(buffer)?,
            signature: ByteString::decode(buffer)?,
        })
    }
}
