use crate::{
    ctr::BlockCipher,
    drbg::Sp800SecureRandom,
    entropy::{BasicEntropySourceProvider, Entropy, EntropySourceProvider},
    error::{ConfigError, DrbgError},
    hash_based::DigestAlgorithm,
    mechanism::{InstantiateParams, MechanismProvider},
};
use rand_core::OsRng;
use std::{fmt, sync::Arc};

/// Settings copied into every mechanism a builder produces.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuilderConfig {
    pub personalization_string: Option<Vec<u8>>,
    pub security_strength: u32,
    pub entropy_bits_required: u32,
    /// `None` selects the mechanism maximum.
    pub reseed_interval: Option<u64>,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            personalization_string: None,
            security_strength: 256,
            entropy_bits_required: 256,
            reseed_interval: None,
        }
    }
}

/// Builds [`Sp800SecureRandom`] generators over any of the four
/// SP 800-90A mechanisms.
///
/// Setters only record values. Every `build_*` call validates the
/// configuration against the chosen primitive before any entropy is
/// requested, then draws a fresh entropy source for the new generator.
///
/// ```
/// use sp800_rand::{DigestAlgorithm, Sp800SecureRandomBuilder};
///
/// let mut rng = Sp800SecureRandomBuilder::new()
///     .personalization_string(b"my application")
///     .build_hmac(DigestAlgorithm::Sha256, b"unique nonce", false)?;
/// let key = rng.generate_bytes(32)?;
/// assert_eq!(key.len(), 32);
/// # Ok::<(), sp800_rand::DrbgError>(())
/// ```
#[derive(Clone)]
pub struct Sp800SecureRandomBuilder {
    random: Option<Arc<dyn Entropy>>,
    provider: Arc<dyn EntropySourceProvider>,
    config: BuilderConfig,
}

impl Default for Sp800SecureRandomBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Sp800SecureRandomBuilder {
    /// Builder seeded from the operating system RNG, without prediction
    /// resistant sources.
    pub fn new() -> Self {
        Self::from_entropy(Arc::new(OsRng), false)
    }

    /// Builder whose entropy sources and reseed augmentation both draw from
    /// `random`.
    pub fn from_entropy(random: Arc<dyn Entropy>, prediction_resistant: bool) -> Self {
        let provider = BasicEntropySourceProvider::new(Arc::clone(&random), prediction_resistant);
        Self {
            random: Some(random),
            provider: Arc::new(provider),
            config: BuilderConfig::default(),
        }
    }

    /// Builder over an explicit entropy source provider. Generators built
    /// this way have no auxiliary randomness.
    pub fn with_provider(provider: Arc<dyn EntropySourceProvider>) -> Self {
        Self {
            random: None,
            provider,
            config: BuilderConfig::default(),
        }
    }

    pub fn with_config(mut self, config: BuilderConfig) -> Self {
        self.config = config;
        self
    }

    pub fn personalization_string(mut self, personalization_string: &[u8]) -> Self {
        self.config.personalization_string = Some(personalization_string.to_vec());
        self
    }

    pub fn security_strength(mut self, security_strength: u32) -> Self {
        self.config.security_strength = security_strength;
        self
    }

    pub fn entropy_bits_required(mut self, entropy_bits_required: u32) -> Self {
        self.config.entropy_bits_required = entropy_bits_required;
        self
    }

    pub fn reseed_interval(mut self, reseed_interval: u64) -> Self {
        self.config.reseed_interval = Some(reseed_interval);
        self
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    pub fn build_hash(
        &self,
        digest: DigestAlgorithm,
        nonce: &[u8],
        prediction_resistant: bool,
    ) -> Result<Sp800SecureRandom, DrbgError> {
        let provider = MechanismProvider::Hash {
            digest,
            params: self.params(nonce),
        };
        self.build(provider, digest.name(), prediction_resistant)
    }

    pub fn build_hmac(
        &self,
        digest: DigestAlgorithm,
        nonce: &[u8],
        prediction_resistant: bool,
    ) -> Result<Sp800SecureRandom, DrbgError> {
        let provider = MechanismProvider::Hmac {
            digest,
            params: self.params(nonce),
        };
        self.build(provider, digest.name(), prediction_resistant)
    }

    /// Build a CTR_DRBG. `seed_length_bits` must equal the key size plus the
    /// cipher block size.
    pub fn build_ctr(
        &self,
        cipher: BlockCipher,
        key_size_bits: u32,
        seed_length_bits: u32,
        nonce: &[u8],
        prediction_resistant: bool,
    ) -> Result<Sp800SecureRandom, DrbgError> {
        if !cipher.supports_key_size(key_size_bits) {
            return Err(ConfigError::UnsupportedKeySize {
                key_size: key_size_bits,
                cipher: cipher.name(),
            }
            .into());
        }
        let expected = key_size_bits + cipher.block_len() as u32 * 8;
        if seed_length_bits != expected {
            return Err(ConfigError::SeedLengthMismatch {
                given: seed_length_bits,
                expected,
                cipher: cipher.name(),
            }
            .into());
        }
        let provider = MechanismProvider::Ctr {
            cipher,
            key_size_bits,
            params: self.params(nonce),
        };
        self.build(provider, cipher.name(), prediction_resistant)
    }

    pub fn build_dual_ec(
        &self,
        digest: DigestAlgorithm,
        nonce: &[u8],
        prediction_resistant: bool,
    ) -> Result<Sp800SecureRandom, DrbgError> {
        let provider = MechanismProvider::DualEc {
            digest,
            params: self.params(nonce),
        };
        self.build(provider, digest.name(), prediction_resistant)
    }

    fn params(&self, nonce: &[u8]) -> InstantiateParams {
        InstantiateParams {
            nonce: nonce.to_vec(),
            personalization_string: self.config.personalization_string.clone(),
            security_strength: self.config.security_strength,
            reseed_interval: self.config.reseed_interval,
        }
    }

    fn build(
        &self,
        provider: MechanismProvider,
        primitive: &'static str,
        prediction_resistant: bool,
    ) -> Result<Sp800SecureRandom, DrbgError> {
        let entropy_bits = self.config.entropy_bits_required;
        provider.validate(entropy_bits)?;

        let entropy_source = self.provider.get(entropy_bits)?;
        let mechanism = provider.instantiate(entropy_source)?;
        tracing::debug!(
            mechanism = provider.name(),
            primitive,
            security_strength = self.config.security_strength,
            entropy_bits,
            prediction_resistant,
            auxiliary_randomness = self.random.is_some(),
            "built secure random"
        );
        Ok(Sp800SecureRandom::new(
            mechanism,
            self.random.clone(),
            prediction_resistant,
        ))
    }
}

impl fmt::Debug for Sp800SecureRandomBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sp800SecureRandomBuilder")
            .field("config", &self.config)
            .field("auxiliary_randomness", &self.random.is_some())
            .finish_non_exhaustive()
    }
}
