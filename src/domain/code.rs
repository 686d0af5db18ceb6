//! Short reference codes for orders and trade offers.

use rand::Rng;

use crate::config::REFERENCE_CODE_LENGTH;

const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ0123456789";

/// Generate a random uppercase reference code.
///
/// Ambiguous characters (I, O) are excluded from the alphabet.
pub fn reference_code() -> String {
    let mut rng = rand::thread_rng();
    (0..REFERENCE_CODE_LENGTH)
        .map(|_| {
            let idx = rng.gen_range(0..CODE_ALPHABET.len());
            CODE_ALPHABET[idx] as char
        })
        .collect()
}
