use crate::entropy::{EntropyError, EntropySource};
use zeroize::Zeroizing;

/// Pull one block from `source`, refusing blocks that carry fewer than
/// `security_strength` bits.
pub(crate) fn fetch_entropy(
    source: &mut dyn EntropySource,
    security_strength: u32,
) -> Result<Zeroizing<Vec<u8>>, EntropyError> {
    let entropy_input = source.get_entropy()?;
    let provided = entropy_input.len() * 8;
    let required = security_strength as usize;
    if provided < required {
        return Err(EntropyError::Insufficient { provided, required });
    }
    Ok(entropy_input)
}
