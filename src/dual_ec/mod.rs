use crate::{
    drbg::variant::{DrbgVariant, MAX_BYTES_PER_REQUEST},
    error::DrbgError,
    hash_based::DigestAlgorithm,
};
use zeroize::Zeroizing;

mod curve;

pub use curve::Curve;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DualEcConfig {
    pub digest: DigestAlgorithm,
    pub curve: Curve,
}

/// Dual_EC_DRBG working state. The reseed counter counts output blocks.
pub struct DualEc {
    config: DualEcConfig,
    s: Zeroizing<Vec<u8>>,
}

impl DualEc {
    pub fn curve(&self) -> Curve {
        self.config.curve
    }

    pub fn digest(&self) -> DigestAlgorithm {
        self.config.digest
    }

    fn hash_df(&self, parts: &[&[u8]]) -> Zeroizing<Vec<u8>> {
        self.config.digest.hash_df(parts, self.config.curve.seed_len())
    }

    /// `s` as a bit string padded with zero bits on the right to a whole
    /// number of bytes. `s` itself is kept right-aligned.
    fn pad8(&self) -> Zeroizing<Vec<u8>> {
        let mut padded = self.s.clone();
        let shift = (8 - self.config.curve.seed_len() % 8) % 8;
        if shift != 0 {
            let mut carry = 0;
            for byte in padded.iter_mut().rev() {
                let b = *byte;
                *byte = (b << shift) | carry;
                carry = b >> (8 - shift);
            }
        }
        padded
    }
}

impl DrbgVariant for DualEc {
    const MAX_RESEED_INTERVAL: u64 = 1 << 32;

    type Config = DualEcConfig;

    fn instantiate(
        config: DualEcConfig,
        entropy_input: &[u8],
        nonce: &[u8],
        personalization_string: &[u8],
    ) -> Result<Self, DrbgError> {
        let s = config
            .digest
            .hash_df(&[entropy_input, nonce, personalization_string], config.curve.seed_len());
        Ok(Self { config, s })
    }

    fn reseed(&mut self, entropy_input: &[u8], additional_input: &[u8]) {
        let s = self.pad8();
        self.s = self.hash_df(&[&s, entropy_input, additional_input]);
    }

    fn generate(
        &mut self,
        bytes: &mut [u8],
        additional_input: &[u8],
        _: u64,
    ) -> Result<(), DrbgError> {
        let curve = self.config.curve;
        let mut t = self.s.clone();
        if !additional_input.is_empty() {
            let h = self.hash_df(&[additional_input]);
            for (byte, mask) in t.iter_mut().zip(h.iter()) {
                *byte ^= mask;
            }
        }

        let skip = curve.field_len() - curve.out_len();
        for block in bytes.chunks_mut(curve.out_len()) {
            let s = curve.x_of_p(&t)?;
            let r = curve.x_of_q(&s)?;
            block.copy_from_slice(&r[skip..skip + block.len()]);
            t = s;
        }

        self.s = curve.x_of_p(&t)?;
        Ok(())
    }

    fn block_size(&self) -> usize {
        self.config.curve.out_len() * 8
    }

    fn request_cost(&self, len: usize) -> u64 {
        len.div_ceil(self.config.curve.out_len()) as u64
    }

    fn max_bytes_per_request(&self, reseed_interval: u64) -> usize {
        let out_len = self.config.curve.out_len();
        let blocks = (MAX_BYTES_PER_REQUEST / out_len) as u64;
        blocks.min(reseed_interval) as usize * out_len
    }
}
