#[cfg(feature = "debug")]
pub mod print {

    use ledger_device_sdk::testing::debug_print;

    pub fn println(s: &str) {
        debug_print(s);
        debug_print("\n");
    }

    pub fn println_slice<const N: usize>(tab: &[u8]) {
        let Ok(hex) = sia_utils::to_hex::<N>(tab) else {
            return println("<hex overflow>");
        };
        if let Ok(m) = core::str::from_utf8(&hex[..2 * tab.len()]) {
            println(m);
        }
    }
}

#[cfg(not(feature = "debug"))]
pub mod print {
    pub fn println(_s: &str) {}
    pub fn println_slice<const N: usize>(_tab: &[u8]) {}
}
