use ledger_secure_sdk_sys::*;
use sia_utils::hasher::{Blake2b, HashError, BLAKE2B_HASH_SIZE};

pub struct Blake2bHasher(cx_blake2b_s);

impl Blake2b for Blake2bHasher {
    fn new() -> Self {
        let mut v = cx_blake2b_t::default();
        unsafe { cx_blake2b_init_no_throw(&mut v, BLAKE2B_HASH_SIZE * 8) };
        Self(v)
    }

    fn reset(&mut self) {
        unsafe { cx_blake2b_init_no_throw(&mut self.0, BLAKE2B_HASH_SIZE * 8) };
    }

    fn update(&mut self, input: &[u8]) -> Result<(), HashError> {
        let rc = unsafe {
            cx_hash_update(
                &mut self.0 as *mut cx_blake2b_s as *mut cx_hash_t,
                input.as_ptr(),
                input.len(),
            )
        };
        if rc == CX_OK {
            Ok(())
        } else {
            Err(HashError::Failed)
        }
    }

    // The context is re-initialized afterwards, so the hasher can be reused.
    fn finalize(&mut self) -> Result<[u8; BLAKE2B_HASH_SIZE], HashError> {
        let mut result = [0u8; BLAKE2B_HASH_SIZE];
        let rc = unsafe {
            cx_hash_final(
                &mut self.0 as *mut cx_blake2b_s as *mut cx_hash_t,
                result.as_mut_ptr(),
            )
        };
        self.reset();
        if rc == CX_OK {
            Ok(result)
        } else {
            Err(HashError::Failed)
        }
    }
}
