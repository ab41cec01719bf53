use crate::{drbg::variant::DrbgVariant, error::DrbgError, hash_based::hashfn::DigestAlgorithm};
use zeroize::Zeroizing;

mod util;

/// Hash_DRBG working state.
pub struct Hash {
    digest: DigestAlgorithm,
    v: Zeroizing<Vec<u8>>,
    c: Zeroizing<Vec<u8>>,
}

impl Hash {
    pub fn digest(&self) -> DigestAlgorithm {
        self.digest
    }

    fn derive_c(&mut self) {
        self.c = self.digest.hash_df(&[&[0x00], &self.v], self.digest.seed_len());
    }

    fn hashgen(&self, bytes: &mut [u8]) {
        let mut data = self.v.clone();
        for block in bytes.chunks_mut(self.digest.output_len()) {
            let w = self.digest.digest(&[&data]);
            block.copy_from_slice(&w[..block.len()]);
            util::inc(&mut data);
        }
    }
}

impl DrbgVariant for Hash {
    const MAX_RESEED_INTERVAL: u64 = 1 << 48;

    type Config = DigestAlgorithm;

    fn instantiate(
        digest: DigestAlgorithm,
        entropy_input: &[u8],
        nonce: &[u8],
        personalization_string: &[u8],
    ) -> Result<Self, DrbgError> {
        let v = digest.hash_df(
            &[entropy_input, nonce, personalization_string],
            digest.seed_len(),
        );
        let mut hash = Self {
            digest,
            v,
            c: Zeroizing::new(Vec::new()),
        };
        hash.derive_c();
        Ok(hash)
    }

    fn reseed(&mut self, entropy_input: &[u8], additional_input: &[u8]) {
        self.v = self.digest.hash_df(
            &[&[0x01], &self.v, entropy_input, additional_input],
            self.digest.seed_len(),
        );
        self.derive_c();
    }

    fn generate(
        &mut self,
        bytes: &mut [u8],
        additional_input: &[u8],
        reseed_counter: u64,
    ) -> Result<(), DrbgError> {
        if !additional_input.is_empty() {
            let w = self.digest.digest(&[&[0x02], &self.v, additional_input]);
            util::add(&mut self.v, &w);
        }

        self.hashgen(bytes);

        let h = self.digest.digest(&[&[0x03], &self.v]);
        // Modular addition is associative.
        util::add(&mut self.v, &h);
        util::add(&mut self.v, &self.c);
        util::add(&mut self.v, &reseed_counter.to_be_bytes());
        Ok(())
    }

    fn block_size(&self) -> usize {
        self.digest.output_len() * 8
    }
}
