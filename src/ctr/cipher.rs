use aes::cipher::generic_array::GenericArray;

pub trait Cipher: Send + Sized {
    const NAME: &'static str;
    const BLOCK_LEN: usize = 16;
    const KEY_LEN: usize;
    const SEED_LEN: usize = Self::BLOCK_LEN + Self::KEY_LEN;

    /// Key length in bits, which bounds the security strength.
    const SECURITY_STRENGTH: u32 = (Self::KEY_LEN * 8) as u32;

    /// `key` must be exactly `KEY_LEN` bytes.
    fn new(key: &[u8]) -> Self;
    fn encrypt_block(&self, block: &mut [u8]);
}

macro_rules! impl_aes {
    ($cipher:ident, $inner:ident, $name:literal, $key_len:literal) => {
        pub struct $cipher($inner);

        impl Cipher for $cipher {
            const NAME: &'static str = $name;
            const KEY_LEN: usize = $key_len;

            fn new(key: &[u8]) -> Self {
                use aes::cipher::KeyInit;
                Self($inner::new(GenericArray::from_slice(key)))
            }

            fn encrypt_block(&self, block: &mut [u8]) {
                use aes::cipher::BlockEncrypt;
                self.0.encrypt_block(GenericArray::from_mut_slice(block));
            }
        }
    };
}

use aes::{Aes128Enc, Aes192Enc, Aes256Enc};
impl_aes!(Aes256, Aes256Enc, "AES-256", 32);
impl_aes!(Aes192, Aes192Enc, "AES-192", 24);
impl_aes!(Aes128, Aes128Enc, "AES-128", 16);
