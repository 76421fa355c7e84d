#[macro_export]
macro_rules! fixed_bytes {
    ($struct_name:ident, $encoded_length:expr) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $struct_name(pub [u8; $encoded_length]);

        impl $struct_name {
            pub const ENCODED_LENGTH: usize = $encoded_length;

            pub fn from_bytes(bytes: [u8; $encoded_length]) -> Self {
                $struct_name(bytes)
            }
        }

        impl Default for $struct_name {
            fn default() -> Self {
                Self([0; $encoded_length])
            }
        }

        impl $crate::decode::Decode for $struct_name {
            fn decode(
                buffer: &mut $crate::buffer::TxnBuffer,
            ) -> $crate::decode::DecodeResult<Self> {
                buffer.read_array::<$encoded_length>().map($struct_name)
            }
        }
    };
}
