use crate::ctr::Cipher;
use zeroize::Zeroizing;

pub fn inc(block: &mut [u8]) {
    for byte in block.iter_mut().rev() {
        *byte = byte.wrapping_add(1);
        if *byte != 0 {
            break;
        }
    }
}

/// Block_Cipher_df over the concatenation of `input_string`, producing
/// `C::SEED_LEN` bytes.
pub fn block_cipher_df<C: Cipher>(input_string: &[&[u8]]) -> Zeroizing<Vec<u8>> {
    let input_len: usize = input_string.iter().map(|part| part.len()).sum();
    let l = input_len as u32;
    let n = C::SEED_LEN as u32;

    let len = (std::mem::size_of::<u32>() * 2 + input_len + 1).div_ceil(C::BLOCK_LEN)
        * C::BLOCK_LEN;
    let mut s = Zeroizing::new(Vec::with_capacity(len));
    s.extend(l.to_be_bytes());
    s.extend(n.to_be_bytes());
    for part in input_string {
        s.extend_from_slice(part);
    }
    s.push(0x80);
    s.resize(len, 0);

    let k = b"\x00\x01\x02\x03\x04\x05\x06\x07\x08\x09\x0a\x0b\x0c\x0d\x0e\x0f\
              \x10\x11\x12\x13\x14\x15\x16\x17\x18\x19\x1a\x1b\x1c\x1d\x1e\x1f";
    let k = &k[..C::KEY_LEN];

    let mut temp = Zeroizing::new(Vec::with_capacity(C::SEED_LEN + C::BLOCK_LEN));
    let mut i = 0u32;
    while temp.len() < C::SEED_LEN {
        let mut iv = vec![0; C::BLOCK_LEN];
        iv[..std::mem::size_of::<u32>()].copy_from_slice(&i.to_be_bytes());
        temp.extend_from_slice(&bcc::<C>(k, &[&iv, &s]));
        i += 1;
    }

    let cipher = C::new(&temp[..C::KEY_LEN]);
    let mut x = Zeroizing::new(temp[C::KEY_LEN..C::SEED_LEN].to_vec());
    let mut out = Zeroizing::new(Vec::with_capacity(C::SEED_LEN + C::BLOCK_LEN));
    while out.len() < C::SEED_LEN {
        cipher.encrypt_block(&mut x);
        out.extend_from_slice(&x);
    }
    out.truncate(C::SEED_LEN);
    out
}

/// `data` is the concatenation of whole blocks.
fn bcc<C: Cipher>(key: &[u8], data: &[&[u8]]) -> Zeroizing<Vec<u8>> {
    let cipher = C::new(key);

    let mut chaining_value = Zeroizing::new(vec![0; C::BLOCK_LEN]);
    for part in data {
        for block in part.chunks(C::BLOCK_LEN) {
            for (i, &b) in block.iter().enumerate() {
                chaining_value[i] ^= b;
            }
            cipher.encrypt_block(&mut chaining_value);
        }
    }

    chaining_value
}
