use num_bigint::BigUint;
use num_traits::{One, Zero};
use tracing::instrument;

use crate::{keccak::Hasher, types::Digest};

/// Raw 32-byte sponge digest of `data`.
#[must_use]
pub fn file_digest(data: &[u8]) -> Digest {
    let mut h = Hasher::new();
    h.update(data);
    h.finalize()
}

/// H(file) as a non-negative 256-bit integer.
#[must_use]
#[instrument(level = "debug", skip(data), fields(data_len = data.len()))]
pub fn hash_file(data: &[u8]) -> BigUint {
    file_digest(data).to_biguint()
}

/// e = H mod q, with 0 mapped to 1.
#[must_use]
pub fn digest_to_scalar(digest: &BigUint, q: &BigUint) -> BigUint {
    let e = digest % q;
    if e.is_zero() { BigUint::one() } else { e }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_residue_maps_to_one() {
        let q = BigUint::from(13u32);
        assert_eq!(digest_to_scalar(&BigUint::from(26u32), &q), BigUint::one());
        assert_eq!(digest_to_scalar(&BigUint::zero(), &q), BigUint::one());
        assert_eq!(digest_to_scalar(&BigUint::from(27u32), &q), BigUint::one());
        assert_eq!(digest_to_scalar(&BigUint::from(30u32), &q), BigUint::from(4u32));
    }

    #[test]
    fn integer_value_clears_the_top_bit() {
        let digest = file_digest(b"");
        let value = hash_file(b"");
        assert!(value.bits() <= 255);
        let mut bytes = digest.0;
        bytes[31] &= 0x7F;
        assert_eq!(value, BigUint::from_bytes_le(&bytes));
    }
}
