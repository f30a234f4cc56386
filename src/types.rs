use core::fmt;
use num_bigint::BigUint;

pub const DIGEST_LEN: usize = 32;                 // 256-bit sponge output
pub const SCALAR_HEX_LEN: usize = 64;             // one 256-bit value
pub const SIGNATURE_HEX_LEN: usize = 128;         // r || s, big-endian
pub const VERIFYING_KEY_HEX_LEN: usize = 128;     // x || y, big-endian
pub const SIGNATURE_FILE_EXT: &str = "sg";

/// Short Weierstrass curve `y^2 = x^3 + a*x + b (mod p)` with a prime-order
/// subgroup of order `q`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Curve {
    pub a: BigUint,
    pub b: BigUint,
    pub p: BigUint,
    pub q: BigUint,
}

/// A curve point in affine coordinates, or the group identity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Point {
    Infinity,
    Affine { x: BigUint, y: BigUint },
}

impl Point {
    #[must_use]
    pub const fn affine(x: BigUint, y: BigUint) -> Self {
        Self::Affine { x, y }
    }

    #[must_use]
    pub const fn is_infinity(&self) -> bool {
        matches!(self, Self::Infinity)
    }

    /// The affine `x` coordinate, `None` for the point at infinity.
    #[must_use]
    pub const fn x(&self) -> Option<&BigUint> {
        match self {
            Self::Infinity => None,
            Self::Affine { x, .. } => Some(x),
        }
    }
}

/// Curve plus the base point `P` generating the order-`q` subgroup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DomainParams {
    pub curve: Curve,
    pub base: Point,
}

/// Private exponent `d`, `1 <= d < q`.
#[derive(Clone, PartialEq, Eq)]
pub struct SigningKey {
    pub(crate) d: BigUint,
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKey").field("d", &"<redacted>").finish()
    }
}

/// Public point `Q = d*P`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerifyingKey {
    pub(crate) point: Point,
}

impl VerifyingKey {
    #[must_use]
    pub const fn point(&self) -> &Point {
        &self.point
    }
}

/// Signature pair `(r, s)` with `0 < r, s < q`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    pub r: BigUint,
    pub s: BigUint,
}

/// Raw sponge output as squeezed, before the sign-bit clear.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Digest(pub [u8; DIGEST_LEN]);

impl Digest {
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Non-negative integer value of the digest: bytes read least significant
    /// first, with the top bit of the last byte cleared.
    #[must_use]
    pub fn to_biguint(&self) -> BigUint {
        let mut bytes = self.0;
        bytes[DIGEST_LEN - 1] &= 0x7F;
        BigUint::from_bytes_le(&bytes)
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
