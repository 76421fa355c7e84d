use crate::buffer::TxnBuffer;
use crate::decode::*;
use crate::fixed_bytes;

use super::ByteString;

fixed_bytes!(Specifier, 16);

#[derive(Debug, Default, PartialEq)]
pub struct SiaPublicKey {
    pub algorithm: Specifier,
    pub key: ByteString,
}

impl Decode for SiaPublicKey {
    fn decode(buffer: &mut TxnBuffer) -> DecodeResult<Self> {
        Ok(SiaPublicKey {
            algorithm: Specifier::decode(buffer)?,
            key: ByteString::decode(buffer)?,
        })
    }
}

// The public keys themselves are only skipped.
#[derive(Debug, Default, PartialEq)]
pub struct UnlockConditions {
    pub timelock: u64,
    pub public_key_count: u64,
    pub signatures_required: u64,
}

impl Decode for UnlockConditions {
    fn decode(buffer: &mut TxnBuffer) -> DecodeResult<Self> {
        let timelock = buffer.read_u64()?;
        let public_key_count = buffer.read_u64()?;
        skip_many::<SiaPublicKey>(buffer, public_key_count)?;
        let signatures_required = buffer.read_u64()?;
        Ok(UnlockConditions {
            timelock,
            public_key_count,
            signatures_required,
        })
    }
}
