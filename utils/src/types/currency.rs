use crate::buffer::TxnBuffer;
use crate::decode::*;

pub const SIACOIN_DECIMALS: usize = 24;
pub const SIACOIN_UNIT: &[u8] = b"SC";
pub const SIAFUND_DECIMALS: usize = 0;
pub const SIAFUND_UNIT: &[u8] = b"SF";

// Arbitrary-precision unsigned value, sent on the wire as a length-prefixed
// big-endian byte string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Currency {
    limbs: [u64; Currency::MAX_LIMBS],
}

impl Currency {
    pub const MAX_BYTES: usize = 128;
    pub const MAX_LIMBS: usize = Self::MAX_BYTES / 8;
    // 2^1024 has 309 decimal digits
    const MAX_DIGITS: usize = 309;

    pub fn from_be_bytes(bytes: &[u8]) -> Option<Currency> {
        if bytes.len() > Self::MAX_BYTES {
            return None;
        }
        let mut limbs = [0u64; Self::MAX_LIMBS];
        for (i, byte) in bytes.iter().rev().enumerate() {
            limbs[i / 8] |= (*byte as u64) << ((i % 8) * 8);
        }
        Some(Currency { limbs })
    }

    pub fn from_u64(value: u64) -> Currency {
        let mut limbs = [0u64; Self::MAX_LIMBS];
        limbs[0] = value;
        Currency { limbs }
    }

    pub fn is_zero(&self) -> bool {
        self.limbs.iter().all(|limb| *limb == 0)
    }

    fn significant_limbs(&self) -> usize {
        self.limbs
            .iter()
            .rposition(|limb| *limb != 0)
            .map_or(0, |index| index + 1)
    }

    // Fixed-point decimal with `decimals` fractional digits, trailing zeros
    // stripped, followed by a space and `unit`. `None` if `output` is too small.
    pub fn to_decimal<'a, const NUM: usize>(
        &self,
        decimals: usize,
        unit: &[u8],
        output: &'a mut [u8; NUM],
    ) -> Option<&'a [u8]> {
        let mut digits = [b'0'; Self::MAX_DIGITS];
        let mut count = 0;
        let mut limbs = self.limbs;
        let mut size = self.significant_limbs();
        while size > 0 {
            count += 1;
            digits[Self::MAX_DIGITS - count] = b'0' + quorem10(&mut limbs[..size]);
            while size > 0 && limbs[size - 1] == 0 {
                size -= 1;
            }
        }
        let digits = &digits[(Self::MAX_DIGITS - count)..];

        let mut index = 0;
        let (fraction, padding) = if digits.len() > decimals {
            let integer_length = digits.len() - decimals;
            extend(output, &mut index, &digits[..integer_length])?;
            (&digits[integer_length..], 0)
        } else {
            extend(output, &mut index, b"0")?;
            (digits, decimals - digits.len())
        };

        let fraction = trim_trailing_zeros(fraction);
        if !fraction.is_empty() {
            extend(output, &mut index, b".")?;
            for _ in 0..padding {
                extend(output, &mut index, b"0")?;
            }
            extend(output, &mut index, fraction)?;
        }
        extend(output, &mut index, b" ")?;
        extend(output, &mut index, unit)?;
        Some(&output[..index])
    }
}

impl Decode for Currency {
    fn decode(buffer: &mut TxnBuffer) -> DecodeResult<Self> {
        let length = buffer.read_u64()?;
        if length > (Self::MAX_BYTES as u64) {
            return Err(DecodeError::InvalidSize);
        }
        let bytes = buffer.read_slice(length as usize)?;
        Currency::from_be_bytes(bytes).ok_or(DecodeError::InvalidSize)
    }
}

// Divides the little-endian limbs by 10 in place, returns the remainder.
fn quorem10(limbs: &mut [u64]) -> u8 {
    let mut remainder = 0u64;
    for limb in limbs.iter_mut().rev() {
        let n = ((remainder as u128) << 64) | (*limb as u128);
        *limb = (n / 10) as u64;
        remainder = (n % 10) as u64;
    }
    remainder as u8
}

fn trim_trailing_zeros(digits: &[u8]) -> &[u8] {
    let length = digits
        .iter()
        .rposition(|digit| *digit != b'0')
        .map_or(0, |index| index + 1);
    &digits[..length]
}

fn extend(output: &mut [u8], index: &mut usize, bytes: &[u8]) -> Option<()> {
    let to = *index + bytes.len();
    if to > output.len() {
        return None;
    }
    output[*index..to].copy_from_slice(bytes);
    *index = to;
    Some(())
}
