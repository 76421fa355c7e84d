#[macro_use]
pub mod macros;
pub mod byte32;
pub mod byte_string;
pub mod covered_fields;
pub mod currency;
pub mod input;
pub mod output;
pub mod signature;
pub mod unlock_conditions;

pub use byte32::Byte32;
pub use byte_string::ByteString;
pub use covered_fields::CoveredFields;
pub use currency::Currency;
pub use input::{SiacoinInput, SiafundInput};
pub use output::{SiacoinOutput, SiafundOutput};
pub use signature::TransactionSignature;
pub use unlock_conditions::{SiaPublicKey, Specifier, UnlockConditions};

pub type Hash = Byte32;
pub type UnlockHash = Byte32;
