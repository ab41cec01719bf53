use hmac::{
    SimpleHmac,
    digest::{Digest, Key, KeyInit, Mac, core_api::BlockSizeUser},
};
use zeroize::Zeroizing;

/// Approved SHA-2 digests usable by the Hash, HMAC and Dual EC mechanisms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DigestAlgorithm {
    Sha224,
    Sha256,
    Sha384,
    Sha512,
    Sha512_224,
    Sha512_256,
}

macro_rules! with_digest {
    ($algorithm:expr, $f:ident($($arg:expr),*)) => {
        match $algorithm {
            DigestAlgorithm::Sha224 => $f::<sha2::Sha224>($($arg),*),
            DigestAlgorithm::Sha256 => $f::<sha2::Sha256>($($arg),*),
            DigestAlgorithm::Sha384 => $f::<sha2::Sha384>($($arg),*),
            DigestAlgorithm::Sha512 => $f::<sha2::Sha512>($($arg),*),
            DigestAlgorithm::Sha512_224 => $f::<sha2::Sha512_224>($($arg),*),
            DigestAlgorithm::Sha512_256 => $f::<sha2::Sha512_256>($($arg),*),
        }
    };
}

impl DigestAlgorithm {
    pub fn name(self) -> &'static str {
        match self {
            DigestAlgorithm::Sha224 => "SHA-224",
            DigestAlgorithm::Sha256 => "SHA-256",
            DigestAlgorithm::Sha384 => "SHA-384",
            DigestAlgorithm::Sha512 => "SHA-512",
            DigestAlgorithm::Sha512_224 => "SHA-512/224",
            DigestAlgorithm::Sha512_256 => "SHA-512/256",
        }
    }

    /// Digest length in bytes.
    pub fn output_len(self) -> usize {
        match self {
            DigestAlgorithm::Sha224 | DigestAlgorithm::Sha512_224 => 28,
            DigestAlgorithm::Sha256 | DigestAlgorithm::Sha512_256 => 32,
            DigestAlgorithm::Sha384 => 48,
            DigestAlgorithm::Sha512 => 64,
        }
    }

    pub fn max_security_strength(self) -> u32 {
        match self {
            DigestAlgorithm::Sha224 | DigestAlgorithm::Sha512_224 => 192,
            _ => 256,
        }
    }

    /// Hash_DRBG seed length in bits.
    pub fn seed_len(self) -> usize {
        match self {
            DigestAlgorithm::Sha384 | DigestAlgorithm::Sha512 => 888,
            _ => 440,
        }
    }

    pub(crate) fn digest(self, parts: &[&[u8]]) -> Vec<u8> {
        with_digest!(self, digest_parts(parts))
    }

    pub(crate) fn hmac(self, key: &[u8], parts: &[&[u8]]) -> Vec<u8> {
        with_digest!(self, hmac_parts(key, parts))
    }

    /// Hash_df: derive `bits` bits from the concatenation of `parts`.
    ///
    /// When `bits` is not a whole number of bytes the result is shifted right
    /// so the derived value occupies the low-order bits.
    pub(crate) fn hash_df(self, parts: &[&[u8]], bits: usize) -> Zeroizing<Vec<u8>> {
        let len = bits.div_ceil(8);
        let no_of_bits = (bits as u32).to_be_bytes();
        let mut temp = Zeroizing::new(Vec::with_capacity(len + self.output_len()));
        let mut counter = 0x01u8;
        while temp.len() < len {
            let counter_bytes = [counter];
            let mut input: Vec<&[u8]> = Vec::with_capacity(parts.len() + 2);
            input.push(&counter_bytes);
            input.push(&no_of_bits);
            input.extend_from_slice(parts);
            temp.extend(self.digest(&input));
            counter = counter.wrapping_add(1);
        }
        temp.truncate(len);

        let shift = (8 - bits % 8) % 8;
        if shift != 0 {
            for i in (0..temp.len()).rev() {
                let carry = if i > 0 { temp[i - 1] << (8 - shift) } else { 0 };
                temp[i] = (temp[i] >> shift) | carry;
            }
        }
        temp
    }
}

fn digest_parts<D: Digest>(parts: &[&[u8]]) -> Vec<u8> {
    let mut hasher = D::new();
    for part in parts {
        Digest::update(&mut hasher, part);
    }
    hasher.finalize().to_vec()
}

// Keys never exceed the digest block size, so zero padding gives the HMAC key.
fn hmac_parts<D: Digest + BlockSizeUser>(key: &[u8], parts: &[&[u8]]) -> Vec<u8> {
    let mut padded = Key::<SimpleHmac<D>>::default();
    padded[..key.len()].copy_from_slice(key);
    let mut mac = <SimpleHmac<D> as KeyInit>::new(&padded);
    for part in parts {
        Mac::update(&mut mac, part);
    }
    mac.finalize().into_bytes().to_vec()
}
