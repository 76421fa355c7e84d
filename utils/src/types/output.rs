use crate::buffer::TxnBuffer;
use crate::decode::*;

use super::{Currency, UnlockHash};

#[derive(Debug, Default, PartialEq)]
pub struct SiacoinOutput {
    pub value: Currency,
    pub unlock_hash: UnlockHash,
}

impl Decode for SiacoinOutput {
    fn decode(buffer: &mut TxnBuffer) -> DecodeResult<Self> {
        Ok(SiacoinOutput {
            value: Currency::decode(buffer)?,
            unlock_hash: UnlockHash::decode(buffer)?,
        })
    }
}

#[derive(Debug, Default, PartialEq)]
pub struct SiafundOutput {
    pub value: Currency,
    pub unlock_hash: UnlockHash,
    pub claim_start: Currency,
}

impl Decode for SiafundOutput {
    fn decode(buffer: &mut TxnBuffer) -> DecodeResult<Self> {
        Ok(SiafundOutput {
            value: Currency::decode(buffer)?,
            unlock_hash: UnlockHash::decode(buffer)?,
            claim_start: Currency::decode(buffer)?,
        })
    }
}
