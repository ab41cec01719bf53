//! Entropy plumbing: raw randomness, per-generator sources and the
//! providers that hand those sources out.

use rand_core::{OsRng, TryRngCore};
use std::fmt;
use std::sync::Arc;
use zeroize::Zeroizing;

/// Failure to obtain entropy.
#[derive(Debug, thiserror::Error)]
pub enum EntropyError {
    #[error("entropy source failure: {0}")]
    Source(String),
    #[error("entropy source exhausted")]
    Exhausted,
    #[error("entropy source returned {provided} bits but {required} are required")]
    Insufficient { provided: usize, required: usize },
    #[error("cannot provide entropy sources of {0} bits")]
    Unsupported(u32),
}

/// A general-purpose randomness capability, shared by reference.
///
/// Used both to back [`BasicEntropySourceProvider`] and as the auxiliary
/// randomness a generator mixes into explicit reseeds.
pub trait Entropy: Send + Sync {
    fn fill_bytes(&self, bytes: &mut [u8]) -> Result<(), EntropyError>;
}

impl Entropy for OsRng {
    fn fill_bytes(&self, bytes: &mut [u8]) -> Result<(), EntropyError> {
        OsRng
            .try_fill_bytes(bytes)
            .map_err(|e| EntropyError::Source(e.to_string()))
    }
}

/// Seed material for exactly one generator.
pub trait EntropySource: Send {
    /// Whether every fetch returns fresh, independent entropy.
    fn is_prediction_resistant(&self) -> bool;

    /// Fetch one block of entropy, at least `entropy_size()` bits long.
    fn get_entropy(&mut self) -> Result<Zeroizing<Vec<u8>>, EntropyError>;

    /// Number of bits of entropy each fetch provides.
    fn entropy_size(&self) -> u32;
}

/// Hands out independent [`EntropySource`]s. Implementations must tolerate
/// concurrent calls to `get`.
pub trait EntropySourceProvider: Send + Sync {
    fn get(&self, bits_required: u32) -> Result<Box<dyn EntropySource>, EntropyError>;
}

/// Provider whose sources read `ceil(bits / 8)` bytes from a shared
/// [`Entropy`] on every fetch.
#[derive(Clone)]
pub struct BasicEntropySourceProvider {
    random: Arc<dyn Entropy>,
    prediction_resistant: bool,
}

impl BasicEntropySourceProvider {
    pub fn new(random: Arc<dyn Entropy>, prediction_resistant: bool) -> Self {
        Self {
            random,
            prediction_resistant,
        }
    }

    /// Provider backed by the operating system RNG.
    pub fn os(prediction_resistant: bool) -> Self {
        Self::new(Arc::new(OsRng), prediction_resistant)
    }
}

impl fmt::Debug for BasicEntropySourceProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicEntropySourceProvider")
            .field("prediction_resistant", &self.prediction_resistant)
            .finish_non_exhaustive()
    }
}

impl EntropySourceProvider for BasicEntropySourceProvider {
    fn get(&self, bits_required: u32) -> Result<Box<dyn EntropySource>, EntropyError> {
        if bits_required == 0 {
            return Err(EntropyError::Unsupported(bits_required));
        }
        Ok(Box::new(BasicEntropySource {
            random: Arc::clone(&self.random),
            bits: bits_required,
            prediction_resistant: self.prediction_resistant,
        }))
    }
}

struct BasicEntropySource {
    random: Arc<dyn Entropy>,
    bits: u32,
    prediction_resistant: bool,
}

impl EntropySource for BasicEntropySource {
    fn is_prediction_resistant(&self) -> bool {
        self.prediction_resistant
    }

    fn get_entropy(&mut self) -> Result<Zeroizing<Vec<u8>>, EntropyError> {
        let mut bytes = Zeroizing::new(vec![0; self.bits.div_ceil(8) as usize]);
        self.random.fill_bytes(&mut bytes)?;
        Ok(bytes)
    }

    fn entropy_size(&self) -> u32 {
        self.bits
    }
}
