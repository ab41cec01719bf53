use crate::{
    drbg::{GenerateError, Sp80090Drbg, entropy::fetch_entropy},
    entropy::EntropySource,
    error::{ConfigError, DrbgError},
    mechanism::InstantiateParams,
};

pub const MAX_BYTES_PER_REQUEST: usize = 1 << 16;
pub const MAX_PERSONALIZATION_STRING_LENGTH: usize = u32::MAX as usize;
pub const MAX_ADDITIONAL_INPUT_LENGTH: usize = u32::MAX as usize;

/// The algorithm core of one SP 800-90A mechanism.
///
/// Implementations hold only working state. Entropy fetching, the reseed
/// counter and prediction resistance live in [`SeededDrbg`].
pub trait DrbgVariant: Send + Sized {
    /// Largest number of requests (or, for block-counting mechanisms, output
    /// blocks) allowed between reseeds.
    const MAX_RESEED_INTERVAL: u64;

    /// Primitive selection made at build time.
    type Config: Copy + Send;

    fn instantiate(
        config: Self::Config,
        entropy_input: &[u8],
        nonce: &[u8],
        personalization_string: &[u8],
    ) -> Result<Self, DrbgError>;

    fn reseed(&mut self, entropy_input: &[u8], additional_input: &[u8]);

    fn generate(
        &mut self,
        bytes: &mut [u8],
        additional_input: &[u8],
        reseed_counter: u64,
    ) -> Result<(), DrbgError>;

    /// Output block size in bits.
    fn block_size(&self) -> usize;

    /// Amount a request of `len` bytes adds to the reseed counter.
    fn request_cost(&self, _len: usize) -> u64 {
        1
    }

    fn max_bytes_per_request(&self, _reseed_interval: u64) -> usize {
        MAX_BYTES_PER_REQUEST
    }
}

/// A [`DrbgVariant`] bound to the entropy source that seeded it.
pub struct SeededDrbg<V> {
    variant: V,
    entropy_source: Box<dyn EntropySource>,
    security_strength: u32,
    reseed_counter: u64,
    reseed_interval: u64,
}

impl<V: DrbgVariant> SeededDrbg<V> {
    pub fn instantiate(
        config: V::Config,
        mut entropy_source: Box<dyn EntropySource>,
        params: &InstantiateParams,
    ) -> Result<Self, DrbgError> {
        let reseed_interval = params.reseed_interval.unwrap_or(V::MAX_RESEED_INTERVAL);
        if reseed_interval == 0 || reseed_interval > V::MAX_RESEED_INTERVAL {
            return Err(ConfigError::ReseedIntervalOutOfRange {
                requested: reseed_interval,
                max: V::MAX_RESEED_INTERVAL,
            }
            .into());
        }
        let personalization_string = params.personalization_string.as_deref().unwrap_or_default();
        if personalization_string.len() > MAX_PERSONALIZATION_STRING_LENGTH {
            return Err(ConfigError::PersonalizationStringTooLong.into());
        }

        let entropy_input = fetch_entropy(entropy_source.as_mut(), params.security_strength)?;
        let variant = V::instantiate(
            config,
            &entropy_input,
            &params.nonce,
            personalization_string,
        )?;

        Ok(Self {
            variant,
            entropy_source,
            security_strength: params.security_strength,
            reseed_counter: 0,
            reseed_interval,
        })
    }

    pub fn variant(&self) -> &V {
        &self.variant
    }

    pub fn reseed_interval(&self) -> u64 {
        self.reseed_interval
    }
}

impl<V: DrbgVariant> Sp80090Drbg for SeededDrbg<V> {
    fn generate(
        &mut self,
        bytes: &mut [u8],
        additional_input: &[u8],
        prediction_resistant: bool,
    ) -> Result<(), GenerateError> {
        if bytes.len() > self.max_bytes_per_request() {
            return Err(DrbgError::MechanismFault("request exceeds the per-request limit").into());
        }
        let cost = self.variant.request_cost(bytes.len());

        let mut additional_input = additional_input;
        if prediction_resistant {
            self.reseed(additional_input)?;
            additional_input = &[];
        } else if additional_input.len() > MAX_ADDITIONAL_INPUT_LENGTH {
            return Err(DrbgError::from(ConfigError::AdditionalInputTooLong).into());
        }

        if self.reseed_counter + cost > self.reseed_interval {
            return Err(GenerateError::ReseedRequired);
        }

        self.variant
            .generate(bytes, additional_input, self.reseed_counter + 1)?;
        self.reseed_counter += cost;
        Ok(())
    }

    fn reseed(&mut self, additional_input: &[u8]) -> Result<(), DrbgError> {
        if additional_input.len() > MAX_ADDITIONAL_INPUT_LENGTH {
            return Err(ConfigError::AdditionalInputTooLong.into());
        }
        let entropy_input = fetch_entropy(self.entropy_source.as_mut(), self.security_strength)?;
        self.variant.reseed(&entropy_input, additional_input);
        self.reseed_counter = 0;
        Ok(())
    }

    fn block_size(&self) -> usize {
        self.variant.block_size()
    }

    fn security_strength(&self) -> u32 {
        self.security_strength
    }

    fn max_bytes_per_request(&self) -> usize {
        self.variant.max_bytes_per_request(self.reseed_interval)
    }
}
