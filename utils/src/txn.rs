use crate::buffer::TxnBuffer;
use crate::decode::*;
use crate::element::Element;
use crate::hasher::{Blake2b, HashAccumulator, BLAKE2B_HASH_SIZE};
use crate::types::signature::SIGNATURE_PREFIX_LENGTH;
use crate::types::{Currency, SiacoinInput, SiacoinOutput, SiafundInput, SiafundOutput, TransactionSignature};

// Byte committed ahead of every input on the replay-protected chain.
const REPLAY_PREFIX: [u8; 1] = [0x01];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    SiacoinInputs,
    SiacoinOutputs,
    FileContracts,
    FileContractRevisions,
    StorageProofs,
    SiafundInputs,
    SiafundOutputs,
    MinerFees,
    ArbitraryData,
    TransactionSignatures,
}

impl Section {
    pub fn next(self) -> Option<Section> {
        match self {
            Section::SiacoinInputs => Some(Section::SiacoinOutputs),
            Section::SiacoinOutputs => Some(Section::FileContracts),
            Section::FileContracts => Some(Section::FileContractRevisions),
            Section::FileContractRevisions => Some(Section::StorageProofs),
            Section::StorageProofs => Some(Section::SiafundInputs),
            Section::SiafundInputs => Some(Section::SiafundOutputs),
            Section::SiafundOutputs => Some(Section::MinerFees),
            Section::MinerFees => Some(Section::ArbitraryData),
            Section::ArbitraryData => Some(Section::TransactionSignatures),
            Section::TransactionSignatures => None,
        }
    }

    // Sections that cannot be reviewed on the device.
    pub fn must_be_empty(self) -> bool {
        matches!(
            self,
            Section::FileContracts
                | Section::FileContractRevisions
                | Section::StorageProofs
                | Section::ArbitraryData
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TxnConfig {
    // Index of the signature being produced, within TransactionSignatures.
    pub sig_index: u16,
    pub replay_protection: bool,
}

#[derive(Debug, PartialEq)]
pub enum DecodeStatus {
    Partial,
    Ready(Element),
    Finished([u8; BLAKE2B_HASH_SIZE]),
}

// How much of a consumed element goes into the sighash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Coverage {
    Full,
    Prefix(usize),
    Excluded,
}

/// Resumable decoder over the Sia binary transaction encoding.
///
/// Every element is decoded from the start of the buffer in one attempt. On
/// `Incomplete` the cursor is rewound and nothing is committed, so the same
/// element is retried once the next packet is appended. A complete element is
/// committed to the hash and compacted out of the buffer before the decoder
/// moves on.
#[derive(Debug, Default)]
pub struct TxnDecoder {
    config: TxnConfig,
    section: Option<Section>,
    slice_index: u64,
    slice_len: u64,
}

impl TxnDecoder {
    pub const fn new(config: TxnConfig) -> Self {
        Self {
            config,
            section: None,
            slice_index: 0,
            slice_len: 0,
        }
    }

    pub fn reset(&mut self, config: TxnConfig) {
        *self = Self::new(config);
    }

    #[inline]
    pub fn section(&self) -> Option<Section> {
        self.section
    }

    // Decodes until a reviewable element is available, the buffered bytes run
    // out, or the transaction ends.
    pub fn next_element<H: Blake2b>(
        &mut self,
        buffer: &mut TxnBuffer,
        hasher: &mut HashAccumulator<H>,
    ) -> DecodeResult<DecodeStatus> {
        loop {
            let mark = buffer.get_index();
            match self.step(buffer, hasher) {
                Ok(Some(status)) => return Ok(status),
                Ok(None) => continue,
                Err(DecodeError::Incomplete) => {
                    buffer.rewind(mark);
                    return Ok(DecodeStatus::Partial);
                }
                Err(error) => {
                    log_debug!("decode error {:?} in {:?} #{}", error, self.section, self.slice_index);
                    return Err(error);
                }
            }
        }
    }

    fn step<H: Blake2b>(
        &mut self,
        buffer: &mut TxnBuffer,
        hasher: &mut HashAccumulator<H>,
    ) -> DecodeResult<Option<DecodeStatus>> {
        if self.slice_index == self.slice_len {
            return self.next_section(buffer, hasher);
        }

        let section = self.section.ok_or(DecodeError::InternalError)?;
        let index = self.slice_index + 1;
        let status = match section {
            Section::SiacoinInputs => {
                SiacoinInput::decode(buffer)?;
                self.commit_replay_prefix(hasher)?;
                self.advance(buffer, hasher, Coverage::Full)?;
                None
            }
            Section::SiacoinOutputs => {
                let output = SiacoinOutput::decode(buffer)?;
                let element = Element::siacoin_output::<H>(index, &output)?;
                self.advance(buffer, hasher, Coverage::Full)?;
                Some(DecodeStatus::Ready(element))
            }
            Section::SiafundInputs => {
                SiafundInput::decode(buffer)?;
                self.commit_replay_prefix(hasher)?;
                self.advance(buffer, hasher, Coverage::Full)?;
                None
            }
            Section::SiafundOutputs => {
                let output = SiafundOutput::decode(buffer)?;
                let element = Element::siafund_output::<H>(index, &output)?;
                self.advance(buffer, hasher, Coverage::Full)?;
                Some(DecodeStatus::Ready(element))
            }
            Section::MinerFees => {
                let fee = Currency::decode(buffer)?;
                let element = Element::miner_fee(index, &fee)?;
                self.advance(buffer, hasher, Coverage::Full)?;
                Some(DecodeStatus::Ready(element))
            }
            Section::TransactionSignatures => {
                TransactionSignature::decode(buffer)?;
                let coverage = if self.slice_index == self.config.sig_index as u64 {
                    Coverage::Prefix(SIGNATURE_PREFIX_LENGTH)
                } else {
                    Coverage::Excluded
                };
                self.advance(buffer, hasher, coverage)?;
                None
            }
            // Their counts were checked to be zero.
            Section::FileContracts
            | Section::FileContractRevisions
            | Section::StorageProofs
            | Section::ArbitraryData => return Err(DecodeError::InternalError),
        };
        self.slice_index += 1;
        Ok(status)
    }

    // Reads the next section's count, or ends the transaction after the
    // signatures. The count is covered by the rule of the section it opens.
    fn next_section<H: Blake2b>(
        &mut self,
        buffer: &mut TxnBuffer,
        hasher: &mut HashAccumulator<H>,
    ) -> DecodeResult<Option<DecodeStatus>> {
        let next = match self.section {
            None => Some(Section::SiacoinInputs),
            Some(section) => section.next(),
        };
        let Some(section) = next else {
            if !buffer.is_drained() {
                return Err(DecodeError::InvalidData);
            }
            let digest = hasher.finalize()?;
            return Ok(Some(DecodeStatus::Finished(digest)));
        };

        let count = buffer.read_u64()?;
        if section.must_be_empty() && count != 0 {
            return Err(DecodeError::NotSupported);
        }
        log_debug!("section {:?}, {} elements", section, count);
        self.section = Some(section);
        self.slice_index = 0;
        self.slice_len = count;
        let coverage = if section == Section::TransactionSignatures {
            Coverage::Excluded
        } else {
            Coverage::Full
        };
        self.advance(buffer, hasher, coverage)?;
        Ok(None)
    }

    fn commit_replay_prefix<H: Blake2b>(&self, hasher: &mut HashAccumulator<H>) -> DecodeResult<()> {
        if self.config.replay_protection {
            hasher.commit(&REPLAY_PREFIX)?;
        }
        Ok(())
    }

    // Commits the covered part of the element just consumed and drops it
    // from the buffer.
    fn advance<H: Blake2b>(
        &self,
        buffer: &mut TxnBuffer,
        hasher: &mut HashAccumulator<H>,
        coverage: Coverage,
    ) -> DecodeResult<()> {
        let consumed = buffer.consumed();
        let covered = match coverage {
            Coverage::Full => consumed,
            Coverage::Prefix(size) => consumed.get(..size).ok_or(DecodeError::InternalError)?,
            Coverage::Excluded => &[],
        };
        hasher.commit(covered)?;
        buffer.compact();
        Ok(())
    }
}

#[cfg(test)]
pub mod tests {
    extern crate std;

    use super::*;
    use crate::buffer::MAX_PACKET_SIZE;
    use crate::hasher::tests::{blake2b, TestHasher};
    use crate::types::byte32::tests::{gen_byte32, gen_bytes};
    use crate::types::currency::tests::encode_currency;
    use crate::types::input::tests::{encode_siacoin_input, encode_siafund_input};
    use crate::types::output::tests::{encode_siacoin_output, encode_siafund_output};
    use crate::types::signature::tests::encode_signature;
    use num_bigint::BigUint;
    use rand::Rng;
    use std::vec;
    use std::vec::Vec;

    // Builds encoded transactions together with their expected sighash.
    #[derive(Default, Clone)]
    pub struct TxnBuilder {
        pub siacoin_inputs: Vec<Vec<u8>>,
        pub siacoin_outputs: Vec<Vec<u8>>,
        pub siafund_inputs: Vec<Vec<u8>>,
        pub siafund_outputs: Vec<Vec<u8>>,
        pub miner_fees: Vec<Vec<u8>>,
        pub signatures: Vec<Vec<u8>>,
        // Declared counts of the sections that must stay empty.
        pub file_contracts: u64,
        pub arbitrary_data: u64,
    }

    impl TxnBuilder {
        pub fn siacoin_input(mut self) -> Self {
            self.siacoin_inputs.push(encode_siacoin_input(&gen_byte32(), &[gen_byte32()]));
            self
        }

        pub fn siacoin_output(mut self, value: u128) -> Self {
            self.siacoin_outputs.push(encode_siacoin_output(&BigUint::from(value), &gen_byte32()));
            self
        }

        pub fn siafund_input(mut self) -> Self {
            self.siafund_inputs
                .push(encode_siafund_input(&gen_byte32(), &[gen_byte32()], &gen_byte32()));
            self
        }

        pub fn siafund_output(mut self, value: u128) -> Self {
            self.siafund_outputs.push(encode_siafund_output(&BigUint::from(value), &gen_byte32()));
            self
        }

        pub fn miner_fee(mut self, value: u128) -> Self {
            self.miner_fees.push(encode_currency(&BigUint::from(value)));
            self
        }

        pub fn signature(mut self) -> Self {
            let index = self.signatures.len() as u64;
            self.signatures.push(encode_signature(&gen_byte32(), index, &gen_bytes(64, 64)));
            self
        }

        pub fn random() -> Self {
            let mut rng = rand::thread_rng();
            let mut builder = TxnBuilder::default();
            for _ in 0..rng.gen_range(0..3) {
                builder = builder.siacoin_input();
            }
            for _ in 0..rng.gen_range(0..4) {
                builder = builder.siacoin_output(rng.gen());
            }
            for _ in 0..rng.gen_range(0..2) {
                builder = builder.siafund_input();
            }
            for _ in 0..rng.gen_range(0..2) {
                builder = builder.siafund_output(rng.gen_range(0..10000));
            }
            for _ in 0..rng.gen_range(0..3) {
                builder = builder.miner_fee(rng.gen());
            }
            for _ in 0..rng.gen_range(1..4) {
                builder = builder.signature();
            }
            builder
        }

        fn sections(&self) -> [(Vec<u8>, &[Vec<u8>]); 10] {
            let empty: &[Vec<u8>] = &[];
            [
                (count(self.siacoin_inputs.len() as u64), self.siacoin_inputs.as_slice()),
                (count(self.siacoin_outputs.len() as u64), self.siacoin_outputs.as_slice()),
                (count(self.file_contracts), empty),
                (count(0), empty),
                (count(0), empty),
                (count(self.siafund_inputs.len() as u64), self.siafund_inputs.as_slice()),
                (count(self.siafund_outputs.len() as u64), self.siafund_outputs.as_slice()),
                (count(self.miner_fees.len() as u64), self.miner_fees.as_slice()),
                (count(self.arbitrary_data), empty),
                (count(self.signatures.len() as u64), self.signatures.as_slice()),
            ]
        }

        pub fn encode(&self) -> Vec<u8> {
            let mut encoded = Vec::new();
            for (prefix, elements) in self.sections() {
                encoded.extend(prefix);
                for element in elements {
                    encoded.extend(element);
                }
            }
            encoded
        }

        // The whole-transaction sighash computed in one pass.
        pub fn sighash(&self, config: &TxnConfig) -> [u8; BLAKE2B_HASH_SIZE] {
            let mut covered = Vec::new();
            let sections = self.sections();
            let (signatures, others) = sections.split_last().unwrap();
            for (index, (prefix, elements)) in others.iter().enumerate() {
                let is_input = index == 0 || index == 5;
                covered.extend(prefix);
                for element in elements.iter() {
                    if is_input && config.replay_protection {
                        covered.push(0x01);
                    }
                    covered.extend(element);
                }
            }
            if let Some(signature) = signatures.1.get(config.sig_index as usize) {
                covered.extend(&signature[..SIGNATURE_PREFIX_LENGTH]);
            }
            blake2b(&covered)
        }
    }

    fn count(value: u64) -> Vec<u8> {
        Vec::from(value.to_le_bytes())
    }

    pub fn random_packets(bytes: &[u8]) -> Vec<&[u8]> {
        let mut rng = rand::thread_rng();
        let mut packets = vec![];
        let mut from = 0;
        while from < bytes.len() {
            let to = core::cmp::min(bytes.len(), from + rng.gen_range(1..=MAX_PACKET_SIZE));
            packets.push(&bytes[from..to]);
            from = to;
        }
        packets
    }

    // Feeds the packets one by one, draining the decoder after each.
    pub fn decode_packets(
        packets: &[&[u8]],
        config: TxnConfig,
    ) -> DecodeResult<(Vec<Element>, Option<[u8; BLAKE2B_HASH_SIZE]>)> {
        let mut buffer = TxnBuffer::new();
        let mut hasher = HashAccumulator::<TestHasher>::new();
        let mut decoder = TxnDecoder::new(config);
        let mut elements = vec![];
        for packet in packets {
            buffer.append(packet).unwrap();
            loop {
                match decoder.next_element(&mut buffer, &mut hasher)? {
                    DecodeStatus::Partial => break,
                    DecodeStatus::Ready(element) => elements.push(element),
                    DecodeStatus::Finished(digest) => return Ok((elements, Some(digest))),
                }
            }
        }
        Ok((elements, None))
    }

    fn decode_txn(bytes: &[u8], config: TxnConfig) -> DecodeResult<(Vec<Element>, Option<[u8; BLAKE2B_HASH_SIZE]>)> {
        let packets: Vec<&[u8]> = bytes.chunks(MAX_PACKET_SIZE).collect();
        decode_packets(&packets, config)
    }

    fn labels(elements: &[Element]) -> Vec<std::string::String> {
        let mut window = crate::pagination::PaginationWindow::new();
        elements
            .iter()
            .map(|element| {
                element.write_part(0, &mut window).unwrap();
                std::string::String::from(core::str::from_utf8(window.label()).unwrap())
            })
            .collect()
    }

    #[test]
    fn test_decode_txn() {
        let builder = TxnBuilder::default()
            .siacoin_input()
            .siacoin_output(10u128.pow(24))
            .siacoin_output(5)
            .siafund_output(3)
            .miner_fee(10u128.pow(22))
            .signature();
        let config = TxnConfig::default();
        let (elements, digest) = decode_txn(&builder.encode(), config).unwrap();

        assert_eq!(
            labels(&elements),
            ["SC Output #1", "SC Output #2", "SF Output #1", "Miner Fee #1"]
        );
        assert_eq!(digest, Some(builder.sighash(&config)));
    }

    #[test]
    fn test_packet_boundary_independence() {
        for _ in 0..50 {
            let builder = TxnBuilder::random();
            let bytes = builder.encode();
            let mut rng = rand::thread_rng();
            let config = TxnConfig {
                sig_index: rng.gen_range(0..builder.signatures.len()) as u16,
                replay_protection: rng.gen(),
            };

            let expected = decode_txn(&bytes, config).unwrap();
            assert_eq!(expected.1, Some(builder.sighash(&config)));
            assert_eq!(
                expected.0.len(),
                builder.siacoin_outputs.len() + builder.siafund_outputs.len() + builder.miner_fees.len()
            );

            for _ in 0..5 {
                let packets = random_packets(&bytes);
                assert_eq!(decode_packets(&packets, config).unwrap(), expected);
            }
            let bytewise: Vec<&[u8]> = bytes.chunks(1).collect();
            assert_eq!(decode_packets(&bytewise, config).unwrap(), expected);
        }
    }

    #[test]
    fn test_signature_coverage() {
        let builder = TxnBuilder::default().miner_fee(1).signature().signature();
        let first = TxnConfig { sig_index: 0, replay_protection: false };
        let second = TxnConfig { sig_index: 1, replay_protection: false };
        let (_, first_digest) = decode_txn(&builder.encode(), first).unwrap();
        let (_, second_digest) = decode_txn(&builder.encode(), second).unwrap();
        assert_eq!(first_digest, Some(builder.sighash(&first)));
        assert_eq!(second_digest, Some(builder.sighash(&second)));
        assert_ne!(first_digest, second_digest);

        // Bytes after the prefix never reach the digest.
        let mut modified = builder.clone();
        let signature = &mut modified.signatures[0];
        let last = signature.len() - 1;
        signature[last] ^= 0xff;
        signature[SIGNATURE_PREFIX_LENGTH] ^= 0x01;
        assert_eq!(decode_txn(&modified.encode(), first).unwrap().1, first_digest);

        // The prefix of the other signature is excluded too.
        modified.signatures[1][0] ^= 0xff;
        assert_eq!(decode_txn(&modified.encode(), first).unwrap().1, first_digest);
        assert_ne!(decode_txn(&modified.encode(), second).unwrap().1, second_digest);
    }

    #[test]
    fn test_no_signatures() {
        let builder = TxnBuilder::default().siacoin_input().miner_fee(1);
        let config = TxnConfig::default();
        let (elements, digest) = decode_txn(&builder.encode(), config).unwrap();
        assert_eq!(elements.len(), 1);
        assert_eq!(digest, Some(builder.sighash(&config)));
    }

    #[test]
    fn test_replay_protection() {
        let builder = TxnBuilder::default()
            .siacoin_input()
            .siacoin_input()
            .siafund_input()
            .siacoin_output(1)
            .signature();
        let enabled = TxnConfig { sig_index: 0, replay_protection: true };
        let disabled = TxnConfig { sig_index: 0, replay_protection: false };
        let (_, protected) = decode_txn(&builder.encode(), enabled).unwrap();
        let (_, unprotected) = decode_txn(&builder.encode(), disabled).unwrap();
        assert_eq!(protected, Some(builder.sighash(&enabled)));
        assert_eq!(unprotected, Some(builder.sighash(&disabled)));
        assert_ne!(protected, unprotected);
    }

    #[test]
    fn test_sections_must_be_empty() {
        let builder = TxnBuilder {
            file_contracts: 1,
            ..TxnBuilder::default().siacoin_output(1).signature()
        };
        let result = decode_txn(&builder.encode(), TxnConfig::default());
        assert_eq!(result, Err(DecodeError::NotSupported));

        let builder = TxnBuilder {
            arbitrary_data: 2,
            ..TxnBuilder::default().signature()
        };
        let result = decode_txn(&builder.encode(), TxnConfig::default());
        assert_eq!(result, Err(DecodeError::NotSupported));
    }

    #[test]
    fn test_outputs_are_reported_before_the_error() {
        let builder = TxnBuilder {
            file_contracts: 1,
            ..TxnBuilder::default().siacoin_output(1)
        };
        let bytes = builder.encode();
        let mut buffer = TxnBuffer::new();
        let mut hasher = HashAccumulator::<TestHasher>::new();
        let mut decoder = TxnDecoder::new(TxnConfig::default());
        buffer.append(&bytes).unwrap();
        assert!(matches!(decoder.next_element(&mut buffer, &mut hasher), Ok(DecodeStatus::Ready(_))));
        assert_eq!(decoder.section(), Some(Section::SiacoinOutputs));
        assert_eq!(decoder.next_element(&mut buffer, &mut hasher), Err(DecodeError::NotSupported));
    }

    #[test]
    fn test_trailing_bytes() {
        let mut bytes = TxnBuilder::default().miner_fee(1).signature().encode();
        bytes.push(0);
        assert_eq!(decode_txn(&bytes, TxnConfig::default()), Err(DecodeError::InvalidData));
    }

    #[test]
    fn test_truncated_txn_stays_partial() {
        let builder = TxnBuilder::default().siacoin_output(1).miner_fee(1).signature();
        let bytes = builder.encode();
        let (elements, digest) = decode_txn(&bytes[..(bytes.len() - 1)], TxnConfig::default()).unwrap();
        assert_eq!(elements.len(), 2);
        assert_eq!(digest, None);
    }

    #[test]
    fn test_finished_is_repeatable() {
        let builder = TxnBuilder::default().miner_fee(1).signature();
        let mut buffer = TxnBuffer::new();
        let mut hasher = HashAccumulator::<TestHasher>::new();
        let mut decoder = TxnDecoder::new(TxnConfig::default());
        buffer.append(&builder.encode()).unwrap();
        assert!(matches!(decoder.next_element(&mut buffer, &mut hasher), Ok(DecodeStatus::Ready(_))));

        let digest = builder.sighash(&TxnConfig::default());
        assert_eq!(decoder.next_element(&mut buffer, &mut hasher), Ok(DecodeStatus::Finished(digest)));
        assert_eq!(decoder.next_element(&mut buffer, &mut hasher), Ok(DecodeStatus::Finished(digest)));
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_currency_errors() {
        let mut builder = TxnBuilder::default().signature();
        builder.miner_fees.push(encode_currency(&BigUint::from_bytes_be(&[0xff; 128])));
        assert_eq!(decode_txn(&builder.encode(), TxnConfig::default()), Err(DecodeError::Overflow));

        let mut builder = TxnBuilder::default().signature();
        let mut too_long = Vec::from(129u64.to_le_bytes());
        too_long.extend([1u8; 129]);
        builder.miner_fees.push(too_long);
        assert_eq!(decode_txn(&builder.encode(), TxnConfig::default()), Err(DecodeError::InvalidSize));
    }

    #[test]
    fn test_section_order() {
        let mut section = Section::SiacoinInputs;
        let mut count = 1;
        while let Some(next) = section.next() {
            section = next;
            count += 1;
        }
        assert_eq!(count, 10);
        assert_eq!(section, Section::TransactionSignatures);
        assert!(Section::StorageProofs.must_be_empty());
        assert!(!Section::MinerFees.must_be_empty());
    }
}
