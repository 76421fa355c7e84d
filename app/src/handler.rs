use ledger_device_sdk::io;
use sia_utils::session::Response;

use crate::{
    blake2b_hasher::Blake2bHasher, debug::print::println, error_code::StatusWord,
    ui::reviewer::ScreenReviewer,
};

pub type Session = sia_utils::ReviewSession<Blake2bHasher>;

const CLA: u8 = 0xE0;

#[repr(u8)]
pub enum Ins {
    GetVersion,
    CalcTxnHash,
}

impl TryFrom<io::ApduHeader> for Ins {
    type Error = StatusWord;
    fn try_from(header: io::ApduHeader) -> Result<Self, Self::Error> {
        match header.ins {
            0x01 => Ok(Ins::GetVersion),
            0x08 => Ok(Ins::CalcTxnHash),
            _ => Err(StatusWord::BadIns),
        }
    }
}

pub fn handle_apdu(
    comm: &mut io::Comm,
    ins: Ins,
    session: &mut Session,
    reviewer: &mut ScreenReviewer,
) -> Result<Response, StatusWord> {
    let apdu_header = comm.get_apdu_metadata();
    if apdu_header.cla != CLA {
        return Err(StatusWord::BadCla);
    }
    let (p1, p2) = (apdu_header.p1, apdu_header.p2);

    match ins {
        Ins::GetVersion => {
            const VERSION: [u8; 3] = [
                parse_version(env!("CARGO_PKG_VERSION_MAJOR")),
                parse_version(env!("CARGO_PKG_VERSION_MINOR")),
                parse_version(env!("CARGO_PKG_VERSION_PATCH")),
            ];
            comm.append(VERSION.as_slice());
            Ok(Response::Done)
        }
        Ins::CalcTxnHash => {
            let data = comm.get_data().map_err(|_| StatusWord::BadLen)?;
            println("txn packet");
            let response = session.handle_packet(p1, p2, data, reviewer)?;
            send_payload(comm, &response);
            Ok(response)
        }
    }
}

// Digest and signature replies carry a payload, everything else is a bare status word.
pub fn send_payload(comm: &mut io::Comm, response: &Response) {
    match response {
        Response::Digest(digest) => comm.append(digest.as_slice()),
        Response::Signature(signature) => comm.append(signature.as_slice()),
        Response::Deferred | Response::MoreData | Response::Done => {}
    }
}

const fn parse_version(s: &str) -> u8 {
    let bytes = s.as_bytes();
    let mut value = 0u8;
    let mut i = 0;
    while i < bytes.len() {
        value = value * 10 + (bytes[i] - b'0');
        i += 1;
    }
    value
}
