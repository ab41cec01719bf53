use crate::{
    entropy::Entropy,
    error::DrbgError,
    mechanism::Mechanism,
    pr::PredictionResistance,
};
use rand_core::{TryCryptoRng, TryRngCore};
use std::{fmt, sync::Arc};
use zeroize::Zeroizing;

mod entropy;
pub mod variant;

const POISONED: &str = "generator disabled after an earlier mechanism fault";

/// Result of a single mechanism request that did not produce output.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// The reseed counter is exhausted. The caller must reseed and retry.
    #[error("reseed required")]
    ReseedRequired,
    #[error(transparent)]
    Drbg(#[from] DrbgError),
}

/// The black-box capability every SP 800-90A mechanism offers.
pub trait Sp80090Drbg: Send {
    /// Fill `bytes`, which must not exceed [`max_bytes_per_request`].
    ///
    /// When `prediction_resistant` is set the mechanism reseeds with
    /// `additional_input` first and then generates with none.
    ///
    /// [`max_bytes_per_request`]: Sp80090Drbg::max_bytes_per_request
    fn generate(
        &mut self,
        bytes: &mut [u8],
        additional_input: &[u8],
        prediction_resistant: bool,
    ) -> Result<(), GenerateError>;

    fn reseed(&mut self, additional_input: &[u8]) -> Result<(), DrbgError>;

    /// Output block size in bits.
    fn block_size(&self) -> usize;

    fn security_strength(&self) -> u32;

    fn max_bytes_per_request(&self) -> usize;
}

/// A secure random generator over one SP 800-90A mechanism.
///
/// Requests larger than the mechanism allows are split into chunks. If the
/// mechanism reports that its reseed counter is exhausted the generator
/// reseeds once and retries. A second report is treated as a fault and the
/// generator refuses all further requests.
pub struct Sp800SecureRandom<D = Mechanism> {
    drbg: D,
    random: Option<Arc<dyn Entropy>>,
    prediction_resistance: PredictionResistance,
    faulted: bool,
}

impl<D: Sp80090Drbg> Sp800SecureRandom<D> {
    pub fn new(
        drbg: D,
        random: Option<Arc<dyn Entropy>>,
        prediction_resistance: impl Into<PredictionResistance>,
    ) -> Self {
        Self {
            drbg,
            random,
            prediction_resistance: prediction_resistance.into(),
            faulted: false,
        }
    }

    pub fn fill_bytes(&mut self, bytes: &mut [u8]) -> Result<(), DrbgError> {
        self.fill_bytes_with_ai(bytes, &[])
    }

    pub fn fill_bytes_with_ai(
        &mut self,
        bytes: &mut [u8],
        additional_input: &[u8],
    ) -> Result<(), DrbgError> {
        self.check_usable()?;
        let prediction_resistant = self.prediction_resistance.is_pr();
        let chunk_len = self.drbg.max_bytes_per_request().max(1);
        for chunk in bytes.chunks_mut(chunk_len) {
            match self
                .drbg
                .generate(chunk, additional_input, prediction_resistant)
            {
                Ok(()) => {}
                Err(GenerateError::ReseedRequired) => {
                    tracing::debug!("reseed interval exhausted, reseeding");
                    self.drbg.reseed(&[]).map_err(|e| self.fault(e))?;
                    match self
                        .drbg
                        .generate(chunk, additional_input, prediction_resistant)
                    {
                        Ok(()) => {}
                        Err(GenerateError::ReseedRequired) => {
                            return Err(self.fault(DrbgError::MechanismFault(
                                "reseed required immediately after reseed",
                            )));
                        }
                        Err(GenerateError::Drbg(e)) => return Err(self.fault(e)),
                    }
                }
                Err(GenerateError::Drbg(e)) => return Err(self.fault(e)),
            }
        }
        Ok(())
    }

    pub fn generate_bytes(&mut self, count: usize) -> Result<Vec<u8>, DrbgError> {
        self.generate_bytes_with_ai(count, &[])
    }

    pub fn generate_bytes_with_ai(
        &mut self,
        count: usize,
        additional_input: &[u8],
    ) -> Result<Vec<u8>, DrbgError> {
        let mut bytes = vec![0; count];
        self.fill_bytes_with_ai(&mut bytes, additional_input)?;
        Ok(bytes)
    }

    /// Reseed from the bound entropy source, mixing in `additional_input`
    /// and, when present, fresh bytes from the auxiliary randomness.
    pub fn reseed(&mut self, additional_input: &[u8]) -> Result<(), DrbgError> {
        self.check_usable()?;
        let additional_input = match &self.random {
            Some(random) => {
                let aux_len = self.drbg.security_strength().div_ceil(8) as usize;
                let mut input = Zeroizing::new(Vec::with_capacity(additional_input.len() + aux_len));
                input.extend_from_slice(additional_input);
                input.resize(additional_input.len() + aux_len, 0);
                random.fill_bytes(&mut input[additional_input.len()..])?;
                input
            }
            None => Zeroizing::new(additional_input.to_vec()),
        };
        self.drbg.reseed(&additional_input).map_err(|e| self.fault(e))?;
        tracing::debug!(
            security_strength = self.drbg.security_strength(),
            "generator reseeded"
        );
        Ok(())
    }

    pub fn is_prediction_resistant(&self) -> bool {
        self.prediction_resistance.is_pr()
    }

    pub fn security_strength(&self) -> u32 {
        self.drbg.security_strength()
    }

    /// Output block size of the wrapped mechanism in bits.
    pub fn block_size(&self) -> usize {
        self.drbg.block_size()
    }

    pub fn mechanism(&self) -> &D {
        &self.drbg
    }

    pub fn is_faulted(&self) -> bool {
        self.faulted
    }

    fn check_usable(&self) -> Result<(), DrbgError> {
        if self.faulted {
            return Err(DrbgError::MechanismFault(POISONED));
        }
        Ok(())
    }

    fn fault(&mut self, error: DrbgError) -> DrbgError {
        if let DrbgError::MechanismFault(reason) = error {
            tracing::warn!(reason, "mechanism fault, disabling generator");
            self.faulted = true;
        }
        error
    }
}

impl<D> fmt::Debug for Sp800SecureRandom<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sp800SecureRandom")
            .field("prediction_resistance", &self.prediction_resistance)
            .field("auxiliary_randomness", &self.random.is_some())
            .field("faulted", &self.faulted)
            .finish_non_exhaustive()
    }
}

impl<D: Sp80090Drbg> TryRngCore for Sp800SecureRandom<D> {
    type Error = DrbgError;

    fn try_next_u32(&mut self) -> Result<u32, Self::Error> {
        let mut bytes = [0; 4];
        self.fill_bytes(&mut bytes)?;
        Ok(u32::from_le_bytes(bytes))
    }

    fn try_next_u64(&mut self) -> Result<u64, Self::Error> {
        let mut bytes = [0; 8];
        self.fill_bytes(&mut bytes)?;
        Ok(u64::from_le_bytes(bytes))
    }

    fn try_fill_bytes(&mut self, dst: &mut [u8]) -> Result<(), Self::Error> {
        self.fill_bytes(dst)
    }
}

impl<D: Sp80090Drbg> TryCryptoRng for Sp800SecureRandom<D> {}
