use crate::buffer::TxnBuffer;
use crate::decode::*;

// Length-prefixed bytes that are skipped over, only the length is kept.
#[derive(Debug, Default, PartialEq)]
pub struct ByteString {
    length: u64,
}

impl ByteString {
    #[inline]
    pub fn size(&self) -> u64 {
        self.length
    }
}

impl Decode for ByteString {
    fn decode(buffer: &mut TxnBuffer) -> DecodeResult<Self> {
        let length = buffer.read_u64()?;
        buffer.seek(length)?;
        Ok(ByteString { length })
    }
}
