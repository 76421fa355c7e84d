use crate::buffer::{TxnBuffer, MAX_PACKET_SIZE};
use crate::decode::{DecodeError, DecodeResult, DecoderState};
use crate::element::Element;
use crate::error_code::ErrorCode;
use crate::hasher::{Blake2b, HashAccumulator, BLAKE2B_HASH_SIZE};
use crate::pagination::PaginationWindow;
use crate::to_hex;
use crate::txn::{DecodeStatus, TxnConfig, TxnDecoder};

pub const P1_FIRST: u8 = 0x00;
pub const P1_MORE: u8 = 0x80;
pub const P2_DISPLAY_HASH: u8 = 0x00;
pub const P2_SIGN_HASH: u8 = 0x01;

// key_index: u32 LE, sig_index: u16 LE
pub const FIRST_PACKET_HEADER_LENGTH: usize = 6;

pub const SIGNATURE_SIZE: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Continuation {
    First,
    More,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    DisplayHash,
    SignHash,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Request {
    pub continuation: Continuation,
    pub action: Action,
}

impl Request {
    pub fn parse(p1: u8, p2: u8, payload_len: usize) -> Result<Self, ErrorCode> {
        if payload_len > MAX_PACKET_SIZE {
            return Err(ErrorCode::InvalidRequestParameters);
        }
        let continuation = match p1 {
            P1_FIRST => Continuation::First,
            P1_MORE => Continuation::More,
            _ => return Err(ErrorCode::InvalidRequestParameters),
        };
        let action = match p2 {
            P2_DISPLAY_HASH => Action::DisplayHash,
            P2_SIGN_HASH => Action::SignHash,
            _ => return Err(ErrorCode::InvalidRequestParameters),
        };
        Ok(Request {
            continuation,
            action,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    SeekLeft,
    SeekRight,
    SeekLeftFast,
    SeekRightFast,
    Confirm,
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    // Waiting on the user, nothing to send yet.
    Deferred,
    // The host should send the next packet.
    MoreData,
    Digest([u8; BLAKE2B_HASH_SIZE]),
    Signature([u8; SIGNATURE_SIZE]),
    // The review ended without anything left to send.
    Done,
}

pub trait Reviewer {
    fn show(&mut self, window: &PaginationWindow);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignError;

pub trait Signer {
    fn sign(&mut self, key_index: u32, message: &[u8]) -> Result<[u8; SIGNATURE_SIZE], SignError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Idle,
    Receiving,
    Element,
    Approval,
    Comparison,
}

/// Streaming review of a transaction sent over several packets.
///
/// `initialized` guards against a second transaction being appended to one
/// that is still in progress. It is checked before anything else on every
/// packet and cleared last on every path that ends the session.
pub struct ReviewSession<H> {
    initialized: bool,
    sign: bool,
    key_index: u32,
    replay_protection: bool,
    buffer: TxnBuffer,
    decoder: TxnDecoder,
    hasher: HashAccumulator<H>,
    state: DecoderState,
    element: Option<Element>,
    part: usize,
    window: PaginationWindow,
    screen: Screen,
}

impl<H: Blake2b> ReviewSession<H> {
    pub fn new(replay_protection: bool) -> Self {
        Self {
            initialized: false,
            sign: false,
            key_index: 0,
            replay_protection,
            buffer: TxnBuffer::new(),
            decoder: TxnDecoder::new(TxnConfig::default()),
            hasher: HashAccumulator::new(),
            state: DecoderState::default(),
            element: None,
            part: 0,
            window: PaginationWindow::new(),
            screen: Screen::Idle,
        }
    }

    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    #[inline]
    pub fn is_reviewing(&self) -> bool {
        matches!(self.screen, Screen::Element | Screen::Approval | Screen::Comparison)
    }

    #[inline]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    #[inline]
    pub fn decoder_state(&self) -> DecoderState {
        self.state
    }

    #[inline]
    pub fn window(&self) -> &PaginationWindow {
        &self.window
    }

    #[inline]
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    pub fn handle_packet<R: Reviewer>(
        &mut self,
        p1: u8,
        p2: u8,
        data: &[u8],
        reviewer: &mut R,
    ) -> Result<Response, ErrorCode> {
        let request = Request::parse(p1, p2, data.len())?;
        match request.continuation {
            Continuation::First => {
                if self.initialized {
                    return Err(ErrorCode::ImproperInit);
                }
                if data.len() < FIRST_PACKET_HEADER_LENGTH {
                    return Err(ErrorCode::InvalidRequestParameters);
                }
                let key_index = u32::from_le_bytes([data[0], data[1], data[2], data[3]]);
                let sig_index = u16::from_le_bytes([data[4], data[5]]);
                self.start(request.action, key_index, sig_index);
                self.receive(&data[FIRST_PACKET_HEADER_LENGTH..], reviewer)
            }
            Continuation::More => {
                if !self.initialized || self.screen != Screen::Receiving {
                    return Err(ErrorCode::ImproperInit);
                }
                self.receive(data, reviewer)
            }
        }
    }

    pub fn handle_event<R: Reviewer, S: Signer>(
        &mut self,
        event: Event,
        reviewer: &mut R,
        signer: &mut S,
    ) -> Result<Response, ErrorCode> {
        match (self.screen, event) {
            (Screen::Idle | Screen::Receiving, _) => Ok(Response::Deferred),
            (_, Event::SeekLeft | Event::SeekLeftFast) => {
                if self.window.seek_left() {
                    reviewer.show(&self.window);
                }
                Ok(Response::Deferred)
            }
            (_, Event::SeekRight | Event::SeekRightFast) => {
                if self.window.seek_right() {
                    reviewer.show(&self.window);
                }
                Ok(Response::Deferred)
            }
            (Screen::Element, Event::Confirm) => self.next_part(reviewer),
            (Screen::Approval, Event::Confirm) => self.approve(signer),
            (Screen::Approval, Event::Reject) => {
                log_debug!("signature rejected");
                Err(self.abort(ErrorCode::UserRejected))
            }
            (Screen::Comparison, Event::Confirm) => {
                self.window.clear();
                self.screen = Screen::Idle;
                Ok(Response::Done)
            }
            (Screen::Element | Screen::Comparison, Event::Reject) => Ok(Response::Deferred),
        }
    }

    fn start(&mut self, action: Action, key_index: u32, sig_index: u16) {
        self.reset();
        self.window.clear();
        self.sign = action == Action::SignHash;
        self.key_index = key_index;
        self.decoder.reset(TxnConfig {
            sig_index,
            replay_protection: self.replay_protection,
        });
        self.screen = Screen::Receiving;
        log_debug!("new session, sign: {}, key: {}, sig: {}", self.sign, key_index, sig_index);
        self.initialized = true;
    }

    fn receive<R: Reviewer>(&mut self, data: &[u8], reviewer: &mut R) -> Result<Response, ErrorCode> {
        if self.buffer.append(data).is_err() {
            return Err(self.abort(ErrorCode::CapacityExceeded));
        }
        self.decode_next(reviewer)
    }

    fn decode_next<R: Reviewer>(&mut self, reviewer: &mut R) -> Result<Response, ErrorCode> {
        match self.decoder.next_element(&mut self.buffer, &mut self.hasher) {
            Ok(DecodeStatus::Partial) => {
                self.state = DecoderState::Partial;
                // The pending element cannot complete even with another full packet.
                if !self.buffer.can_accept_packet() {
                    return Err(self.abort(ErrorCode::CapacityExceeded));
                }
                self.screen = Screen::Receiving;
                Ok(Response::MoreData)
            }
            Ok(DecodeStatus::Ready(element)) => {
                self.state = DecoderState::Ready;
                self.element = Some(element);
                self.part = 0;
                self.screen = Screen::Element;
                self.show_part(reviewer)?;
                Ok(Response::Deferred)
            }
            Ok(DecodeStatus::Finished(digest)) => {
                self.state = DecoderState::Finished;
                self.finish(digest, reviewer)
            }
            Err(error) => {
                self.state = DecoderState::Error;
                Err(self.abort(error.into()))
            }
        }
    }

    fn show_part<R: Reviewer>(&mut self, reviewer: &mut R) -> Result<(), ErrorCode> {
        let result = match self.element.as_ref() {
            Some(element) => element.write_part(self.part, &mut self.window),
            None => Err(DecodeError::InternalError),
        };
        if let Err(error) = result {
            return Err(self.abort(error.into()));
        }
        reviewer.show(&self.window);
        Ok(())
    }

    fn next_part<R: Reviewer>(&mut self, reviewer: &mut R) -> Result<Response, ErrorCode> {
        let part_count = self.element.as_ref().map_or(0, Element::part_count);
        self.part += 1;
        if self.part < part_count {
            self.show_part(reviewer)?;
            return Ok(Response::Deferred);
        }
        self.element = None;
        self.part = 0;
        self.decode_next(reviewer)
    }

    fn finish<R: Reviewer>(
        &mut self,
        digest: [u8; BLAKE2B_HASH_SIZE],
        reviewer: &mut R,
    ) -> Result<Response, ErrorCode> {
        if self.sign {
            if let Err(error) = self.write_approval() {
                return Err(self.abort(error.into()));
            }
            self.screen = Screen::Approval;
            reviewer.show(&self.window);
            return Ok(Response::Deferred);
        }

        let Ok(hex) = to_hex::<{ 2 * BLAKE2B_HASH_SIZE }>(&digest) else {
            return Err(self.abort(ErrorCode::DeveloperError));
        };
        if let Err(error) = self.window.set(b"Compare Hash:", &hex) {
            return Err(self.abort(error.into()));
        }
        self.screen = Screen::Comparison;
        reviewer.show(&self.window);
        // The digest goes out now, the comparison screen stays up until confirmed.
        self.reset();
        Ok(Response::Digest(digest))
    }

    fn write_approval(&mut self) -> DecodeResult<()> {
        let key_index = self.key_index;
        let (label, text) = self.window.compose();
        label.write(b"Sign this Txn")?;
        text.write(b"with Key #")?;
        text.write_u64(key_index as u64)?;
        text.write(b"?")
    }

    fn approve<S: Signer>(&mut self, signer: &mut S) -> Result<Response, ErrorCode> {
        let Some(digest) = self.hasher.digest().copied() else {
            return Err(self.abort(ErrorCode::DeveloperError));
        };
        match signer.sign(self.key_index, &digest) {
            Ok(signature) => {
                log_debug!("signed with key {}", self.key_index);
                self.window.clear();
                self.screen = Screen::Idle;
                self.reset();
                Ok(Response::Signature(signature))
            }
            Err(SignError) => Err(self.abort(ErrorCode::SigningFailed)),
        }
    }

    // Ends the session on an error, returning the code to report.
    fn abort(&mut self, code: ErrorCode) -> ErrorCode {
        log_debug!("session aborted: {:?}", code);
        self.window.clear();
        self.screen = Screen::Idle;
        self.reset();
        code
    }

    fn reset(&mut self) {
        self.sign = false;
        self.key_index = 0;
        self.buffer.reset();
        self.decoder.reset(TxnConfig::default());
        self.hasher.reset();
        self.state = DecoderState::default();
        self.element = None;
        self.part = 0;
        self.initialized = false;
    }
}
