use crate::{drbg::variant::DrbgVariant, error::DrbgError};
use std::marker::PhantomData;
use zeroize::Zeroizing;

mod cipher;
mod util;

pub use cipher::{Aes128, Aes192, Aes256, Cipher};

/// Block ciphers available to CTR_DRBG. The key size is chosen separately.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlockCipher {
    Aes,
}

impl BlockCipher {
    pub fn name(self) -> &'static str {
        match self {
            BlockCipher::Aes => "AES",
        }
    }

    pub fn block_len(self) -> usize {
        match self {
            BlockCipher::Aes => 16,
        }
    }

    pub fn supports_key_size(self, key_size_bits: u32) -> bool {
        match self {
            BlockCipher::Aes => matches!(key_size_bits, 128 | 192 | 256),
        }
    }
}

/// CTR_DRBG working state, using the derivation function.
pub struct Ctr<C: Cipher> {
    v: Zeroizing<Vec<u8>>,
    key: Zeroizing<Vec<u8>>,
    _cipher: PhantomData<fn() -> C>,
}

impl<C: Cipher> Ctr<C> {
    fn update(&mut self, provided_data: &[u8]) {
        let cipher = C::new(&self.key);

        let mut temp = Zeroizing::new(Vec::with_capacity(C::SEED_LEN + C::BLOCK_LEN));
        while temp.len() < C::SEED_LEN {
            util::inc(&mut self.v);
            let mut output_block = self.v.clone();
            cipher.encrypt_block(&mut output_block);
            temp.extend_from_slice(&output_block);
        }
        temp.truncate(C::SEED_LEN);
        for (t, p) in temp.iter_mut().zip(provided_data) {
            *t ^= p;
        }

        self.key = Zeroizing::new(temp[..C::KEY_LEN].to_vec());
        self.v = Zeroizing::new(temp[C::KEY_LEN..].to_vec());
    }
}

impl<C: Cipher> DrbgVariant for Ctr<C> {
    const MAX_RESEED_INTERVAL: u64 = 1 << 48;

    type Config = ();

    fn instantiate(
        _: (),
        entropy_input: &[u8],
        nonce: &[u8],
        personalization_string: &[u8],
    ) -> Result<Self, DrbgError> {
        let seed_material =
            util::block_cipher_df::<C>(&[entropy_input, nonce, personalization_string]);

        let mut ctr = Self {
            v: Zeroizing::new(vec![0; C::BLOCK_LEN]),
            key: Zeroizing::new(vec![0; C::KEY_LEN]),
            _cipher: PhantomData,
        };
        ctr.update(&seed_material);
        Ok(ctr)
    }

    fn reseed(&mut self, entropy_input: &[u8], additional_input: &[u8]) {
        let seed_material = util::block_cipher_df::<C>(&[entropy_input, additional_input]);
        self.update(&seed_material);
    }

    fn generate(
        &mut self,
        bytes: &mut [u8],
        additional_input: &[u8],
        _: u64,
    ) -> Result<(), DrbgError> {
        let additional_input = if additional_input.is_empty() {
            Zeroizing::new(vec![0; C::SEED_LEN])
        } else {
            let additional_input = util::block_cipher_df::<C>(&[additional_input]);
            self.update(&additional_input);
            additional_input
        };

        let cipher = C::new(&self.key);
        for block in bytes.chunks_mut(C::BLOCK_LEN) {
            util::inc(&mut self.v);
            let mut output_block = self.v.clone();
            cipher.encrypt_block(&mut output_block);
            block.copy_from_slice(&output_block[..block.len()]);
        }

        self.update(&additional_input);
        Ok(())
    }

    fn block_size(&self) -> usize {
        C::BLOCK_LEN * 8
    }
}
