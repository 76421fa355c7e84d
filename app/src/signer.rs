use ledger_device_sdk::ecc::Ed25519;
use sia_utils::session::{SignError, Signer, SIGNATURE_SIZE};

use crate::debug::print::{println, println_slice};

const HARDENED: u32 = 0x8000_0000;
const SIA_COIN_TYPE: u32 = 93;

// 44'/93'/index'/0'/0', all levels hardened as SLIP-10 requires for ed25519.
pub fn derivation_path(key_index: u32) -> [u32; 5] {
    [
        44 | HARDENED,
        SIA_COIN_TYPE | HARDENED,
        key_index | HARDENED,
        HARDENED,
        HARDENED,
    ]
}

pub struct DeviceSigner;

impl Signer for DeviceSigner {
    fn sign(&mut self, key_index: u32, message: &[u8]) -> Result<[u8; SIGNATURE_SIZE], SignError> {
        let path = derivation_path(key_index);
        println("sign digest");
        println_slice::<64>(message);
        let (signature, _) = Ed25519::derive_from_path_slip10(&path)
            .sign(message)
            .map_err(|_| SignError)?;
        Ok(signature)
    }
}
