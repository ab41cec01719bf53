//! NIST SP 800-90A secure random generators.
//!
//! [`Sp800SecureRandomBuilder`] configures personalization, security
//! strength and entropy requirements, then builds an [`Sp800SecureRandom`]
//! over one of the four approved mechanisms: Hash_DRBG, HMAC_DRBG,
//! CTR_DRBG or Dual_EC_DRBG. The generator enforces the mechanism's reseed
//! interval, honors prediction resistance and implements
//! [`rand_core::TryRngCore`].

mod builder;
mod ctr;
mod drbg;
mod dual_ec;
mod entropy;
mod error;
mod hash_based;
mod mechanism;
mod pr;

pub use builder::{BuilderConfig, Sp800SecureRandomBuilder};
pub use ctr::BlockCipher;
pub use drbg::{GenerateError, Sp800SecureRandom, Sp80090Drbg};
pub use dual_ec::Curve;
pub use entropy::{
    BasicEntropySourceProvider, Entropy, EntropyError, EntropySource, EntropySourceProvider,
};
pub use error::{ConfigError, DrbgError};
pub use hash_based::DigestAlgorithm;
pub use mechanism::{CtrDrbg, InstantiateParams, Mechanism, MechanismProvider};
pub use pr::PredictionResistance;
