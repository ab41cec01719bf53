/// `target = (target + addend) mod 2^(8 * target.len())`, both big-endian.
pub fn add(target: &mut [u8], addend: &[u8]) {
    let mut carry = 0u16;
    let mut addend = addend.iter().rev();
    for byte in target.iter_mut().rev() {
        let sum = *byte as u16 + *addend.next().unwrap_or(&0) as u16 + carry;
        *byte = sum as u8;
        carry = sum >> 8;
    }
}

pub fn inc(block: &mut [u8]) {
    for byte in block.iter_mut().rev() {
        *byte = byte.wrapping_add(1);
        if *byte != 0 {
            break;
        }
    }
}
