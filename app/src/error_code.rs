use ledger_device_sdk::io::Reply;
use ledger_device_sdk::io::StatusWords;
use sia_utils::ErrorCode;

#[derive(Debug, Clone, Copy)]
pub enum StatusWord {
    BadCla,
    BadIns,
    BadLen,
    Session(ErrorCode),
}

impl From<ErrorCode> for StatusWord {
    fn from(code: ErrorCode) -> Self {
        StatusWord::Session(code)
    }
}

impl From<StatusWord> for Reply {
    fn from(sw: StatusWord) -> Reply {
        match sw {
            StatusWord::BadCla => StatusWords::BadCla.into(),
            StatusWord::BadIns => StatusWords::BadIns.into(),
            StatusWord::BadLen => StatusWords::BadLen.into(),
            StatusWord::Session(code) => Reply(code.status_word()),
        }
    }
}
