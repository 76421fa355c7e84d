use crate::decode::{DecodeError, DecodeResult};

pub const MAX_PACKET_SIZE: usize = u8::MAX as usize;

#[derive(Debug, PartialEq, Eq)]
pub struct CapacityExceeded;

// Fixed-capacity transaction arena: `data[..len]` holds the bytes received and
// not yet compacted away, `index` is the read cursor into them.
pub struct TxnBuffer {
    data: [u8; TxnBuffer::CAPACITY],
    len: usize,
    index: usize,
}

impl TxnBuffer {
    pub const CAPACITY: usize = 1020;

    pub const fn new() -> Self {
        Self {
            data: [0; TxnBuffer::CAPACITY],
            len: 0,
            index: 0,
        }
    }

    pub fn reset(&mut self) {
        self.data = [0; TxnBuffer::CAPACITY];
        self.len = 0;
        self.index = 0;
    }

    // Appends a packet and moves the cursor back to the start, so a decode
    // attempt that stopped on missing bytes is retried from the beginning.
    pub fn append(&mut self, packet: &[u8]) -> Result<(), CapacityExceeded> {
        let to = self.len + packet.len();
        if to > Self::CAPACITY {
            return Err(CapacityExceeded);
        }
        self.data[self.len..to].copy_from_slice(packet);
        self.len = to;
        self.index = 0;
        Ok(())
    }

    // Drops the bytes before the cursor: `[index, len)` moves to offset 0.
    pub fn compact(&mut self) {
        self.data.copy_within(self.index..self.len, 0);
        self.len -= self.index;
        self.index = 0;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn get_index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.len - self.index
    }

    #[inline]
    pub fn is_drained(&self) -> bool {
        self.remaining() == 0
    }

    // Whether another full-size packet still fits.
    #[inline]
    pub fn can_accept_packet(&self) -> bool {
        Self::CAPACITY - self.len >= MAX_PACKET_SIZE
    }

    pub fn rewind(&mut self, index: usize) {
        debug_assert!(index <= self.index);
        self.index = index;
    }

    pub fn consumed(&self) -> &[u8] {
        &self.data[..self.index]
    }

    pub fn unread(&self) -> &[u8] {
        &self.data[self.index..self.len]
    }

    pub fn need(&self, size: u64) -> DecodeResult<()> {
        if (self.remaining() as u64) < size {
            Err(DecodeError::Incomplete)
        } else {
            Ok(())
        }
    }

    pub fn seek(&mut self, size: u64) -> DecodeResult<()> {
        self.need(size)?;
        self.index += size as usize;
        Ok(())
    }

    pub fn next_byte(&mut self) -> DecodeResult<u8> {
        self.need(1)?;
        let byte = self.data[self.index];
        self.index += 1;
        Ok(byte)
    }

    pub fn read_slice(&mut self, size: usize) -> DecodeResult<&[u8]> {
        self.need(size as u64)?;
        let from = self.index;
        self.index += size;
        Ok(&self.data[from..self.index])
    }

    pub fn read_array<const N: usize>(&mut self) -> DecodeResult<[u8; N]> {
        let mut array = [0u8; N];
        array.copy_from_slice(self.read_slice(N)?);
        Ok(array)
    }

    pub fn read_u64(&mut self) -> DecodeResult<u64> {
        self.read_array::<8>().map(u64::from_le_bytes)
    }
}

impl Default for TxnBuffer {
    fn default() -> Self {
        Self::new()
    }
}
