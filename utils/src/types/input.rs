use crate::buffer::TxnBuffer;
use crate::decode::*;

use super::{Hash, UnlockConditions, UnlockHash};

#[derive(Debug, Default, PartialEq)]
pub struct SiacoinInput {
    pub parent_id: Hash,
    pub unlock_conditions: UnlockConditions,
}

impl Decode for SiacoinInput {
    fn decode(buffer: &mut TxnBuffer) -> DecodeResult<Self> {
        Ok(SiacoinInput {
            parent_id: Hash::decode(buffer)?,
            unlock_conditions: UnlockConditions::decode(buffer)?,
        })
    }
}

#[derive(Debug, Default, PartialEq)]
pub struct SiafundInput {
    pub parent_id: Hash,
    pub unlock_conditions: UnlockConditions,
    pub claim_unlock_hash: UnlockHash,
}

impl Decode for SiafundInput {
    fn decode(buffer: &mut TxnBuffer) -> DecodeResult<Self> {
        Ok(SiafundInput {
            parent_id: Hash::decode(buffer)?,
            unlock_conditions: UnlockConditions::decode(buffer)?,
            claim_unlock_hash: UnlockHash::decode(buffer)?,
        })
    }
}

#[cfg(test)]
pub mod tests {
    extern crate std;

    use super::*;
    use crate::types::byte32::tests::gen_byte32;
    use crate::types::unlock_conditions::tests::encode_unlock_conditions;
    use std::vec::Vec;

    pub fn encode_siacoin_input(parent_id: &[u8; 32], keys: &[[u8; 32]]) -> Vec<u8> {
        let mut encoded = Vec::from(parent_id.as_slice());
        encoded.extend(encode_unlock_conditions(0, keys, keys.len() as u64));
        encoded
    }

    pub fn encode_siafund_input(parent_id: &[u8; 32], keys: &[[u8; 32]], claim: &[u8; 32]) -> Vec<u8> {
        let mut encoded = encode_siacoin_input(parent_id, keys);
        encoded.extend(claim);
        encoded
    }

    #[test]
    fn test_decode_siacoin_input() {
        let parent_id = gen_byte32();
        let encoded = encode_siacoin_input(&parent_id, &[gen_byte32()]);
        let mut buffer = TxnBuffer::new();
        buffer.append(&encoded).unwrap();

        let input = SiacoinInput::decode(&mut buffer).unwrap();
        assert_eq!(input.parent_id, Hash::from_bytes(parent_id));
        assert_eq!(input.unlock_conditions.public_key_count, 1);
        assert_eq!(input.unlock_conditions.signatures_required, 1);
        assert!(buffer.is_drained());
    }

    #[test]
    fn test_decode_siafund_input() {
        let parent_id = gen_byte32();
        let claim = gen_byte32();
        let encoded = encode_siafund_input(&parent_id, &[gen_byte32(), gen_byte32()], &claim);
        let mut buffer = TxnBuffer::new();
        buffer.append(&encoded[..(encoded.len() - 1)]).unwrap();
        assert_eq!(SiafundInput::decode(&mut buffer), Err(DecodeError::Incomplete));

        buffer.append(&encoded[(encoded.len() - 1)..]).unwrap();
        let input = SiafundInput::decode(&mut buffer).unwrap();
        assert_eq!(input.parent_id, Hash::from_bytes(parent_id));
        assert_eq!(input.unlock_conditions.public_key_count, 2);
        assert_eq!(input.claim_unlock_hash, UnlockHash::from_bytes(claim));
        assert!(buffer.is_drained());
    }
}
