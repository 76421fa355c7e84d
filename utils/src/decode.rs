use crate::buffer::TxnBuffer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
  // Not enough bytes yet; the element is retried once more data arrives.
  Incomplete,
  InvalidSize,
  InvalidData,
  NotSupported,
  Overflow,
  HashFailed,
  InternalError,
}

pub type DecodeResult<T> = Result<T, DecodeError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecoderState {
  #[default]
  Partial,
  Ready,
  Finished,
  Error,
}

// A wire type read in one piece from the transaction buffer. Implementations
// may leave the cursor anywhere on `Incomplete`; the caller rewinds it.
pub trait Decode: Sized {
  fn decode(buffer: &mut TxnBuffer) -> DecodeResult<Self>;
}

// Decodes and discards `count` consecutive values of `T`.
pub fn skip_many<T: Decode>(buffer: &mut TxnBuffer, count: u64) -> DecodeResult<()> {
  for _ in 0..count {
    T::decode(buffer)?;
  }
  Ok(())
}
