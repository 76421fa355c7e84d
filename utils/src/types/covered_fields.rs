use crate::buffer::TxnBuffer;
use crate::decode::*;

// WholeTransaction flag followed by ten index lists (siacoin inputs through
// transaction signatures). The indices are skipped.
#[derive(Debug, Default, PartialEq)]
pub struct CoveredFields {
    pub whole_transaction: bool,
    pub index_count: u64,
}

impl CoveredFields {
    pub const INDEX_LISTS: usize = 10;
}

impl Decode for CoveredFields {
    fn decode(buffer: &mut TxnBuffer) -> DecodeResult<Self> {
        let whole_transaction = match buffer.next_byte()? {
            0 => false,
            1 => true,
            _ => return Err(DecodeError::InvalidData),
        };
        let mut index_count = 0u64;
        for _ in 0..Self::INDEX_LISTS {
            let count = buffer.read_u64()?;
            let size = count.checked_mul(8).ok_or(DecodeError::InvalidSize)?;
            buffer.seek(size)?;
            index_count = index_count.saturating_add(count);
        }
        Ok(CoveredFields {
            whole_transaction,
            index_count,
        })
    }
}
