use crate::decode::DecodeError;

pub const BLAKE2B_HASH_SIZE: usize = 32;
pub const CHECKSUM_SIZE: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashError {
    // The digest primitive reported a failure.
    Failed,
    // `commit` after the digest was produced.
    Finalized,
}

impl From<HashError> for DecodeError {
    fn from(error: HashError) -> Self {
        match error {
            HashError::Failed => DecodeError::HashFailed,
            HashError::Finalized => DecodeError::InternalError,
        }
    }
}

// Incremental BLAKE2b-256. The device backs it with the secure element's
// hashing service.
pub trait Blake2b: Sized {
    fn new() -> Self;

    fn reset(&mut self);

    fn update(&mut self, input: &[u8]) -> Result<(), HashError>;

    fn finalize(&mut self) -> Result<[u8; BLAKE2B_HASH_SIZE], HashError>;

    fn hash(input: &[u8]) -> Result<[u8; BLAKE2B_HASH_SIZE], HashError> {
        let mut hasher = Self::new();
        hasher.update(input)?;
        hasher.finalize()
    }
}

// First bytes of the BLAKE2b-256 hash, appended to unlock hashes when shown as addresses.
pub fn checksum<H: Blake2b>(input: &[u8]) -> Result<[u8; CHECKSUM_SIZE], HashError> {
    let hash = H::hash(input)?;
    let mut checksum = [0u8; CHECKSUM_SIZE];
    checksum.copy_from_slice(&hash[..CHECKSUM_SIZE]);
    Ok(checksum)
}

/// Running transaction digest. Bytes are committed as the decoder consumes
/// them; once finalized the digest is cached and further commits are rejected.
pub struct HashAccumulator<H> {
    hasher: H,
    digest: Option<[u8; BLAKE2B_HASH_SIZE]>,
}

impl<H: Blake2b> HashAccumulator<H> {
    pub fn new() -> Self {
        Self {
            hasher: H::new(),
            digest: None,
        }
    }

    pub fn reset(&mut self) {
        self.hasher.reset();
        self.digest = None;
    }

    pub fn commit(&mut self, bytes: &[u8]) -> Result<(), HashError> {
        if self.digest.is_some() {
            return Err(HashError::Finalized);
        }
        if bytes.is_empty() {
            return Ok(());
        }
        self.hasher.update(bytes)
    }

    pub fn finalize(&mut self) -> Result<[u8; BLAKE2B_HASH_SIZE], HashError> {
        if let Some(digest) = self.digest {
            return Ok(digest);
        }
        let digest = self.hasher.finalize()?;
        self.digest = Some(digest);
        Ok(digest)
    }

    #[inline]
    pub fn digest(&self) -> Option<&[u8; BLAKE2B_HASH_SIZE]> {
        self.digest.as_ref()
    }

    #[inline]
    pub fn is_finalized(&self) -> bool {
        self.digest.is_some()
    }
}

impl<H: Blake2b> Default for HashAccumulator<H> {
    fn default() -> Self {
        Self::new()
    }
}
