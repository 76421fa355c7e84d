use crate::decode::{DecodeError, DecodeResult};
use crate::hasher::{checksum, Blake2b};
use crate::pagination::{PaginationWindow, MAX_TEXT_SIZE};
use crate::text_buffer::TextBuffer;
use crate::types::byte32::ADDRESS_LENGTH;
use crate::types::currency::{SIACOIN_DECIMALS, SIACOIN_UNIT, SIAFUND_DECIMALS, SIAFUND_UNIT};
use crate::types::{Currency, SiacoinOutput, SiafundOutput, UnlockHash};

pub type Amount = TextBuffer<MAX_TEXT_SIZE>;

// A decoded element the user has to review. Values are formatted when the
// element is decoded, so an amount too large to display fails decoding.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    SiacoinOutput {
        index: u64,
        value: Amount,
        address: [u8; ADDRESS_LENGTH],
    },
    SiafundOutput {
        index: u64,
        value: Amount,
        address: [u8; ADDRESS_LENGTH],
    },
    MinerFee {
        index: u64,
        value: Amount,
    },
}

impl Element {
    // `index` is the position of the element in its section, starting at 1.
    pub fn siacoin_output<H: Blake2b>(index: u64, output: &SiacoinOutput) -> DecodeResult<Self> {
        Ok(Element::SiacoinOutput {
            index,
            value: format_amount(&output.value, SIACOIN_DECIMALS, SIACOIN_UNIT)?,
            address: format_address::<H>(&output.unlock_hash)?,
        })
    }

    pub fn siafund_output<H: Blake2b>(index: u64, output: &SiafundOutput) -> DecodeResult<Self> {
        Ok(Element::SiafundOutput {
            index,
            value: format_amount(&output.value, SIAFUND_DECIMALS, SIAFUND_UNIT)?,
            address: format_address::<H>(&output.unlock_hash)?,
        })
    }

    pub fn miner_fee(index: u64, fee: &Currency) -> DecodeResult<Self> {
        Ok(Element::MinerFee {
            index,
            value: format_amount(fee, SIACOIN_DECIMALS, SIACOIN_UNIT)?,
        })
    }

    // Outputs show the amount and then the recipient, fees only the amount.
    pub fn part_count(&self) -> usize {
        match self {
            Element::SiacoinOutput { .. } | Element::SiafundOutput { .. } => 2,
            Element::MinerFee { .. } => 1,
        }
    }

    pub fn write_part(&self, part: usize, window: &mut PaginationWindow) -> DecodeResult<()> {
        if part >= self.part_count() {
            return Err(DecodeError::InternalError);
        }
        let (label, text) = window.compose();
        match self {
            Element::SiacoinOutput { address, .. } | Element::SiafundOutput { address, .. } if part == 1 => {
                label.write(b"Recipient")?;
                text.write(address)
            }
            Element::SiacoinOutput { index, value, .. } => {
                label.write(b"SC Output #")?;
                label.write_u64(*index)?;
                text.write(value.get())
            }
            Element::SiafundOutput { index, value, .. } => {
                label.write(b"SF Output #")?;
                label.write_u64(*index)?;
                text.write(value.get())
            }
            Element::MinerFee { index, value } => {
                label.write(b"Miner Fee #")?;
                label.write_u64(*index)?;
                text.write(value.get())
            }
        }
    }
}

fn format_amount(value: &Currency, decimals: usize, unit: &[u8]) -> DecodeResult<Amount> {
    let mut output = [0u8; MAX_TEXT_SIZE];
    let str = value
        .to_decimal(decimals, unit, &mut output)
        .ok_or(DecodeError::Overflow)?;
    Amount::from_bytes(str)
}

fn format_address<H: Blake2b>(unlock_hash: &UnlockHash) -> DecodeResult<[u8; ADDRESS_LENGTH]> {
    let checksum = checksum::<H>(&unlock_hash.0)?;
    Ok(unlock_hash.to_address(&checksum))
}
