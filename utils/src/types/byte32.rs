use crate::fixed_bytes;
use crate::hasher::CHECKSUM_SIZE;
use crate::write_hex;

fixed_bytes!(Byte32, 32);

// 64 hex characters of the unlock hash followed by 12 of its checksum.
pub const ADDRESS_LENGTH: usize = 2 * (Byte32::ENCODED_LENGTH + CHECKSUM_SIZE);

impl Byte32 {
    pub fn to_address(&self, checksum: &[u8; CHECKSUM_SIZE]) -> [u8; ADDRESS_LENGTH] {
        let mut address = [0u8; ADDRESS_LENGTH];
        let (hash_hex, checksum_hex) = address.split_at_mut(2 * Byte32::ENCODED_LENGTH);
        write_hex(hash_hex, &self.0);
        write_hex(checksum_hex, checksum);
        address
    }
}

#[cfg(test)]
pub mod tests {
    extern crate std;

    use super::{Byte32, ADDRESS_LENGTH};
    use crate::buffer::TxnBuffer;
    use crate::decode::{Decode, DecodeError};
    use core::str::from_utf8;
    use rand::Rng;
    use std::vec;
    use std::vec::Vec;

    pub fn gen_bytes(min_length: usize, max_length: usize) -> Vec<u8> {
        let mut rng = rand::thread_rng();
        let length = rng.gen_range(min_length..=max_length);
        let mut random_bytes = vec![0u8; length];
        rng.fill(&mut random_bytes[..]);
        random_bytes
    }

    pub fn gen_byte32() -> [u8; 32] {
        gen_bytes(32, 32).as_slice().try_into().unwrap()
    }

    #[test]
    fn test_decode_byte32() {
        let bytes = gen_bytes(Byte32::ENCODED_LENGTH, Byte32::ENCODED_LENGTH);
        let mut buffer = TxnBuffer::new();

        buffer.append(&bytes[..20]).unwrap();
        assert_eq!(Byte32::decode(&mut buffer), Err(DecodeError::Incomplete));

        buffer.append(&bytes[20..]).unwrap();
        let expected = Byte32::from_bytes(bytes.as_slice().try_into().unwrap());
        assert_eq!(Byte32::decode(&mut buffer), Ok(expected));
        assert!(buffer.is_drained());
    }

    #[test]
    fn test_to_address() {
        let hash = Byte32::from_bytes(core::array::from_fn(|i| i as u8));
        let address = hash.to_address(&[0xde, 0xad, 0xbe, 0xef, 0x00, 0x01]);
        assert_eq!(address.len(), ADDRESS_LENGTH);
        assert_eq!(
            from_utf8(&address).unwrap(),
            "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1fdeadbeef0001"
        );
    }
}
