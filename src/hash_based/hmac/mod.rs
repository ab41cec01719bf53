use crate::{drbg::variant::DrbgVariant, error::DrbgError, hash_based::hashfn::DigestAlgorithm};
use zeroize::Zeroizing;

pub struct Hmac {
    digest: DigestAlgorithm,
    v: Zeroizing<Vec<u8>>,
    key: Zeroizing<Vec<u8>>,
}

impl Hmac {
    pub fn digest(&self) -> DigestAlgorithm {
        self.digest
    }

    fn update(&mut self, provided_data: &[&[u8]]) {
        self.round(0x00, provided_data);
        if provided_data.iter().any(|part| !part.is_empty()) {
            self.round(0x01, provided_data);
        }
    }

    fn round(&mut self, separator: u8, provided_data: &[&[u8]]) {
        let separator = [separator];
        let mut input: Vec<&[u8]> = Vec::with_capacity(provided_data.len() + 2);
        input.push(&self.v);
        input.push(&separator);
        input.extend_from_slice(provided_data);
        let key = Zeroizing::new(self.digest.hmac(&self.key, &input));
        self.v = Zeroizing::new(self.digest.hmac(&key, &[&self.v]));
        self.key = key;
    }
}

impl DrbgVariant for Hmac {
    const MAX_RESEED_INTERVAL: u64 = 1 << 48;

    type Config = DigestAlgorithm;

    fn instantiate(
        digest: DigestAlgorithm,
        entropy_input: &[u8],
        nonce: &[u8],
        personalization_string: &[u8],
    ) -> Result<Self, DrbgError> {
        let mut hmac = Self {
            digest,
            v: Zeroizing::new(vec![0x01; digest.output_len()]),
            key: Zeroizing::new(vec![0x00; digest.output_len()]),
        };
        hmac.update(&[entropy_input, nonce, personalization_string]);
        Ok(hmac)
    }

    fn reseed(&mut self, entropy_input: &[u8], additional_input: &[u8]) {
        self.update(&[entropy_input, additional_input]);
    }

    fn generate(
        &mut self,
        bytes: &mut [u8],
        additional_input: &[u8],
        _: u64,
    ) -> Result<(), DrbgError> {
        if !additional_input.is_empty() {
            self.update(&[additional_input]);
        }
        for block in bytes.chunks_mut(self.digest.output_len()) {
            self.v = Zeroizing::new(self.digest.hmac(&self.key, &[&self.v]));
            block.copy_from_slice(&self.v[..block.len()]);
        }
        self.update(&[additional_input]);
        Ok(())
    }

    fn block_size(&self) -> usize {
        self.digest.output_len() * 8
    }
}
