use core::str::from_utf8;
use numtoa::NumToA;

use crate::decode::{DecodeError, DecodeResult};

// Fixed-capacity ASCII text used for labels and display strings.
#[derive(Clone)]
pub struct TextBuffer<const N: usize> {
    data: [u8; N],
    size: usize,
}

impl<const N: usize> TextBuffer<N> {
    pub const MAX_SIZE: usize = N;

    pub const fn new() -> Self {
        Self {
            data: [0; N],
            size: 0,
        }
    }

    pub fn from_bytes(bytes: &[u8]) -> DecodeResult<Self> {
        let mut text = Self::new();
        text.write(bytes)?;
        Ok(text)
    }

    #[inline]
    pub fn reset(&mut self) {
        self.data = [0; N];
        self.size = 0;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn write(&mut self, bytes: &[u8]) -> DecodeResult<()> {
        let to = self.size + bytes.len();
        if to > N {
            return Err(DecodeError::Overflow);
        }
        self.data[self.size..to].copy_from_slice(bytes);
        self.size = to;
        Ok(())
    }

    pub fn write_u64(&mut self, value: u64) -> DecodeResult<()> {
        let mut digits = [0u8; 24];
        self.write(value.numtoa(10, &mut digits))
    }

    pub fn get(&self) -> &[u8] {
        &self.data[..self.size]
    }

    pub fn as_str(&self) -> &str {
        from_utf8(self.get()).unwrap_or("")
    }
}

impl<const N: usize> Default for TextBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> core::fmt::Debug for TextBuffer<N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("TextBuffer").field(&self.as_str()).finish()
    }
}

impl<const N: usize> PartialEq for TextBuffer<N> {
    fn eq(&self, other: &Self) -> bool {
        self.get() == other.get()
    }
}
