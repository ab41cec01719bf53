//! The closed set of SP 800-90A mechanisms and the providers that build them.

use crate::{
    ctr::{Aes128, Aes192, Aes256, BlockCipher, Cipher, Ctr},
    drbg::{
        GenerateError, Sp80090Drbg,
        variant::{DrbgVariant, MAX_PERSONALIZATION_STRING_LENGTH, SeededDrbg},
    },
    dual_ec::{Curve, DualEc, DualEcConfig},
    entropy::EntropySource,
    error::{ConfigError, DrbgError},
    hash_based::{DigestAlgorithm, hash::Hash, hmac::Hmac},
};

/// Parameters shared by every mechanism at instantiation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InstantiateParams {
    pub nonce: Vec<u8>,
    pub personalization_string: Option<Vec<u8>>,
    pub security_strength: u32,
    /// `None` selects the mechanism maximum.
    pub reseed_interval: Option<u64>,
}

/// How to build one mechanism once an entropy source is available.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MechanismProvider {
    Hash {
        digest: DigestAlgorithm,
        params: InstantiateParams,
    },
    Hmac {
        digest: DigestAlgorithm,
        params: InstantiateParams,
    },
    Ctr {
        cipher: BlockCipher,
        key_size_bits: u32,
        params: InstantiateParams,
    },
    DualEc {
        digest: DigestAlgorithm,
        params: InstantiateParams,
    },
}

impl MechanismProvider {
    pub fn name(&self) -> &'static str {
        match self {
            MechanismProvider::Hash { .. } => "Hash_DRBG",
            MechanismProvider::Hmac { .. } => "HMAC_DRBG",
            MechanismProvider::Ctr { .. } => "CTR_DRBG",
            MechanismProvider::DualEc { .. } => "Dual_EC_DRBG",
        }
    }

    pub fn params(&self) -> &InstantiateParams {
        match self {
            MechanismProvider::Hash { params, .. }
            | MechanismProvider::Hmac { params, .. }
            | MechanismProvider::Ctr { params, .. }
            | MechanismProvider::DualEc { params, .. } => params,
        }
    }

    fn max_reseed_interval(&self) -> u64 {
        match self {
            MechanismProvider::Hash { .. } => Hash::MAX_RESEED_INTERVAL,
            MechanismProvider::Hmac { .. } => Hmac::MAX_RESEED_INTERVAL,
            MechanismProvider::Ctr { .. } => Ctr::<Aes256>::MAX_RESEED_INTERVAL,
            MechanismProvider::DualEc { .. } => DualEc::MAX_RESEED_INTERVAL,
        }
    }

    /// Check every parameter without touching entropy.
    pub fn validate(&self, entropy_bits: u32) -> Result<(), ConfigError> {
        let params = self.params();
        let requested = params.security_strength;
        if requested == 0 {
            return Err(ConfigError::ZeroSecurityStrength);
        }
        if entropy_bits == 0 {
            return Err(ConfigError::ZeroEntropyBits);
        }

        let (supported, primitive) = match self {
            MechanismProvider::Hash { digest, .. } | MechanismProvider::Hmac { digest, .. } => {
                (digest.max_security_strength(), digest.name())
            }
            MechanismProvider::Ctr {
                cipher,
                key_size_bits,
                ..
            } => {
                if !cipher.supports_key_size(*key_size_bits) {
                    return Err(ConfigError::UnsupportedKeySize {
                        key_size: *key_size_bits,
                        cipher: cipher.name(),
                    });
                }
                (ctr_cipher_strength(*key_size_bits), cipher.name())
            }
            MechanismProvider::DualEc { digest, .. } => match Curve::for_security_strength(requested)
            {
                Some(curve) if digest.max_security_strength() < curve.security_strength() => {
                    (digest.max_security_strength(), digest.name())
                }
                Some(curve) => (curve.security_strength(), curve.name()),
                None => (Curve::P521.security_strength(), Curve::P521.name()),
            },
        };
        if requested > supported {
            return Err(ConfigError::UnsupportedSecurityStrength {
                requested,
                supported,
                primitive,
            });
        }

        if entropy_bits < requested {
            return Err(ConfigError::InsufficientEntropyBits {
                provided: entropy_bits,
                required: requested,
            });
        }

        let max = self.max_reseed_interval();
        if let Some(requested) = params.reseed_interval {
            if requested == 0 || requested > max {
                return Err(ConfigError::ReseedIntervalOutOfRange { requested, max });
            }
        }

        if params
            .personalization_string
            .as_ref()
            .is_some_and(|ps| ps.len() > MAX_PERSONALIZATION_STRING_LENGTH)
        {
            return Err(ConfigError::PersonalizationStringTooLong);
        }
        Ok(())
    }

    /// Instantiate the mechanism, drawing its first entropy from `entropy_source`.
    pub fn instantiate(
        &self,
        entropy_source: Box<dyn EntropySource>,
    ) -> Result<Mechanism, DrbgError> {
        let mechanism = match self {
            MechanismProvider::Hash { digest, params } => {
                Mechanism::Hash(SeededDrbg::instantiate(*digest, entropy_source, params)?)
            }
            MechanismProvider::Hmac { digest, params } => {
                Mechanism::Hmac(SeededDrbg::instantiate(*digest, entropy_source, params)?)
            }
            MechanismProvider::Ctr {
                key_size_bits,
                params,
                ..
            } => Mechanism::Ctr(match key_size_bits {
                128 => CtrDrbg::Aes128(SeededDrbg::instantiate((), entropy_source, params)?),
                192 => CtrDrbg::Aes192(SeededDrbg::instantiate((), entropy_source, params)?),
                256 => CtrDrbg::Aes256(SeededDrbg::instantiate((), entropy_source, params)?),
                _ => {
                    return Err(ConfigError::UnsupportedKeySize {
                        key_size: *key_size_bits,
                        cipher: BlockCipher::Aes.name(),
                    }
                    .into());
                }
            }),
            MechanismProvider::DualEc { digest, params } => {
                let curve = Curve::for_security_strength(params.security_strength).ok_or(
                    ConfigError::UnsupportedSecurityStrength {
                        requested: params.security_strength,
                        supported: Curve::P521.security_strength(),
                        primitive: Curve::P521.name(),
                    },
                )?;
                let config = DualEcConfig {
                    digest: *digest,
                    curve,
                };
                Mechanism::DualEc(SeededDrbg::instantiate(config, entropy_source, params)?)
            }
        };
        Ok(mechanism)
    }
}

fn ctr_cipher_strength(key_size_bits: u32) -> u32 {
    match key_size_bits {
        128 => Aes128::SECURITY_STRENGTH,
        192 => Aes192::SECURITY_STRENGTH,
        _ => Aes256::SECURITY_STRENGTH,
    }
}

/// CTR_DRBG over one of the AES key sizes.
pub enum CtrDrbg {
    Aes128(SeededDrbg<Ctr<Aes128>>),
    Aes192(SeededDrbg<Ctr<Aes192>>),
    Aes256(SeededDrbg<Ctr<Aes256>>),
}

impl CtrDrbg {
    pub fn cipher_name(&self) -> &'static str {
        match self {
            CtrDrbg::Aes128(_) => Aes128::NAME,
            CtrDrbg::Aes192(_) => Aes192::NAME,
            CtrDrbg::Aes256(_) => Aes256::NAME,
        }
    }
}

/// An instantiated mechanism bound to its entropy source.
pub enum Mechanism {
    Hash(SeededDrbg<Hash>),
    Hmac(SeededDrbg<Hmac>),
    Ctr(CtrDrbg),
    DualEc(SeededDrbg<DualEc>),
}

impl Mechanism {
    pub fn name(&self) -> &'static str {
        match self {
            Mechanism::Hash(_) => "Hash_DRBG",
            Mechanism::Hmac(_) => "HMAC_DRBG",
            Mechanism::Ctr(_) => "CTR_DRBG",
            Mechanism::DualEc(_) => "Dual_EC_DRBG",
        }
    }

    pub fn reseed_interval(&self) -> u64 {
        match self {
            Mechanism::Hash(drbg) => drbg.reseed_interval(),
            Mechanism::Hmac(drbg) => drbg.reseed_interval(),
            Mechanism::Ctr(CtrDrbg::Aes128(drbg)) => drbg.reseed_interval(),
            Mechanism::Ctr(CtrDrbg::Aes192(drbg)) => drbg.reseed_interval(),
            Mechanism::Ctr(CtrDrbg::Aes256(drbg)) => drbg.reseed_interval(),
            Mechanism::DualEc(drbg) => drbg.reseed_interval(),
        }
    }
}

macro_rules! dispatch_sp800_90 {
    ($name:ident { $($variant:ident),+ $(,)? }) => {
        impl Sp80090Drbg for $name {
            fn generate(
                &mut self,
                bytes: &mut [u8],
                additional_input: &[u8],
                prediction_resistant: bool,
            ) -> Result<(), GenerateError> {
                match self {
                    $($name::$variant(drbg) => drbg.generate(bytes, additional_input, prediction_resistant),)+
                }
            }

            fn reseed(&mut self, additional_input: &[u8]) -> Result<(), DrbgError> {
                match self {
                    $($name::$variant(drbg) => drbg.reseed(additional_input),)+
                }
            }

            fn block_size(&self) -> usize {
                match self {
                    $($name::$variant(drbg) => drbg.block_size(),)+
                }
            }

            fn security_strength(&self) -> u32 {
                match self {
                    $($name::$variant(drbg) => drbg.security_strength(),)+
                }
            }

            fn max_bytes_per_request(&self) -> usize {
                match self {
                    $($name::$variant(drbg) => drbg.max_bytes_per_request(),)+
                }
            }
        }
    };
}

dispatch_sp800_90!(CtrDrbg { Aes128, Aes192, Aes256 });
dispatch_sp800_90!(Mechanism { Hash, Hmac, Ctr, DualEc });
