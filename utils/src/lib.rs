#![no_std]

#[macro_use]
mod debug;

pub mod buffer;
pub mod decode;
pub mod element;
pub mod error_code;
pub mod hasher;
pub mod hold;
pub mod pagination;
pub mod session;
pub mod text_buffer;
pub mod txn;
pub mod types;

pub use error_code::ErrorCode;
pub use session::ReviewSession;
pub use text_buffer::TextBuffer;

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

#[inline]
pub fn to_hex<const N: usize>(m: &[u8]) -> Result<[u8; N], ()> {
    if 2 * m.len() > N {
        return Err(());
    }
    let mut hex = [0u8; N];
    write_hex(&mut hex, m);
    Ok(hex)
}

// `dst` must hold at least `2 * src.len()` bytes.
pub fn write_hex(dst: &mut [u8], src: &[u8]) {
    for (i, c) in src.iter().enumerate() {
        dst[2 * i] = HEX_DIGITS[(c >> 4) as usize];
        dst[2 * i + 1] = HEX_DIGITS[(c & 0xf) as usize];
    }
}
