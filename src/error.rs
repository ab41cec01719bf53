use crate::entropy::EntropyError;

/// Errors surfaced by builders, mechanisms and generators.
#[derive(Debug, thiserror::Error)]
pub enum DrbgError {
    /// The requested configuration cannot be honored by the chosen primitive.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),
    /// The entropy source could not deliver the bits a seed needs.
    #[error("entropy unavailable: {0}")]
    EntropyUnavailable(#[from] EntropyError),
    /// The mechanism is in an inconsistent state and must not be used again.
    #[error("mechanism fault: {0}")]
    MechanismFault(&'static str),
}

/// Parameter validation failures. Always raised before entropy is consumed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("security strength must be a positive number of bits")]
    ZeroSecurityStrength,
    #[error("entropy bits required must be a positive number of bits")]
    ZeroEntropyBits,
    #[error(
        "requested security strength of {requested} bits exceeds the {supported} bits supported by {primitive}"
    )]
    UnsupportedSecurityStrength {
        requested: u32,
        supported: u32,
        primitive: &'static str,
    },
    #[error("entropy source provides {provided} bits but security strength requires {required}")]
    InsufficientEntropyBits { provided: u32, required: u32 },
    #[error("unsupported key size of {key_size} bits for {cipher}")]
    UnsupportedKeySize { key_size: u32, cipher: &'static str },
    #[error("seed length of {given} bits does not match the {expected} bits of {cipher}")]
    SeedLengthMismatch {
        given: u32,
        expected: u32,
        cipher: &'static str,
    },
    #[error("reseed interval {requested} outside 1..={max}")]
    ReseedIntervalOutOfRange { requested: u64, max: u64 },
    #[error("personalization string too long")]
    PersonalizationStringTooLong,
    #[error("additional input too long")]
    AdditionalInputTooLong,
}
