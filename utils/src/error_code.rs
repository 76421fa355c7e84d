use crate::decode::DecodeError;
use crate::hasher::HashError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // A packet arrived out of sequence: `More` with no session, `First` while
    // one is running, or data while waiting on the user.
    ImproperInit,
    CapacityExceeded,
    MalformedElement,
    InvalidRequestParameters,
    UserRejected,
    DeveloperError,
    HashingFailed,
    SigningFailed,
}

impl ErrorCode {
    // MalformedElement and InvalidRequestParameters share a status word, so
    // this is a mapping rather than a `repr(u16)` discriminant.
    pub fn status_word(self) -> u16 {
        match self {
            ErrorCode::ImproperInit => 0x6B02,
            ErrorCode::CapacityExceeded => 0x6700,
            ErrorCode::MalformedElement => 0x6B01,
            ErrorCode::InvalidRequestParameters => 0x6B01,
            ErrorCode::UserRejected => 0x6985,
            ErrorCode::DeveloperError => 0x6B00,
            ErrorCode::HashingFailed => 0x6B03,
            ErrorCode::SigningFailed => 0x6B04,
        }
    }
}

impl From<DecodeError> for ErrorCode {
    fn from(error: DecodeError) -> Self {
        match error {
            DecodeError::InvalidSize
            | DecodeError::InvalidData
            | DecodeError::NotSupported
            | DecodeError::Overflow => ErrorCode::MalformedElement,
            DecodeError::HashFailed => ErrorCode::HashingFailed,
            DecodeError::Incomplete | DecodeError::InternalError => ErrorCode::DeveloperError,
        }
    }
}

impl From<HashError> for ErrorCode {
    fn from(error: HashError) -> Self {
        DecodeError::from(error).into()
    }
}
