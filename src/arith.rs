use num_bigint::{BigInt, BigUint};
use num_traits::{One, Signed, Zero};
use rand_core::{CryptoRng, RngCore};

use crate::errors::EdsError;

/// Extended Euclid: returns `(g, x, y)` with `g = gcd(a, b) = a*x + b*y`.
///
/// `a = 0` yields `(b, 0, 1)`.
#[must_use]
pub fn extended_gcd(a: &BigInt, b: &BigInt) -> (BigInt, BigInt, BigInt) {
    if a.is_zero() {
        return (b.clone(), BigInt::zero(), BigInt::one());
    }
    // Invariants: old_r = a*old_x + b*old_y, r = a*x + b*y
    let (mut old_r, mut r) = (a.clone(), b.clone());
    let (mut old_x, mut x) = (BigInt::one(), BigInt::zero());
    let (mut old_y, mut y) = (BigInt::zero(), BigInt::one());

    while !r.is_zero() {
        let quotient = &old_r / &r;
        let next_r = &old_r - &quotient * &r;
        old_r = core::mem::replace(&mut r, next_r);
        let next_x = &old_x - &quotient * &x;
        old_x = core::mem::replace(&mut x, next_x);
        let next_y = &old_y - &quotient * &y;
        old_y = core::mem::replace(&mut y, next_y);
    }
    (old_r, old_x, old_y)
}

/// Multiplicative inverse of `a` modulo `p`, normalized into `[0, p)`.
///
/// # Errors
///
/// Returns `EdsError::ArithmeticPrecondition` when `gcd(a, p) != 1`.
pub fn mod_inverse(a: &BigUint, p: &BigUint) -> Result<BigUint, EdsError> {
    if p.is_zero() {
        return Err(EdsError::ArithmeticPrecondition);
    }
    let a = BigInt::from(a % p);
    let m = BigInt::from(p.clone());
    let (g, x, _) = extended_gcd(&a, &m);
    if !g.is_one() {
        return Err(EdsError::ArithmeticPrecondition);
    }
    let mut x = x % &m;
    if x.is_negative() {
        x += &m;
    }
    // x is in [0, m) here, so the conversion cannot fail.
    x.to_biguint().ok_or(EdsError::ArithmeticPrecondition)
}

/// `(a - b) mod m` for operands already reduced modulo `m`.
#[inline]
#[must_use]
pub fn sub_mod(a: &BigUint, b: &BigUint, m: &BigUint) -> BigUint {
    (a + m - (b % m)) % m
}

/// Draw an integer from `[min, max)`.
///
/// A buffer as wide as the two's-complement encoding of `max - min` is filled
/// from `rng`, its top bit cleared, and the resulting fraction in `[0, 1)`
/// scales the range. An empty range returns `min`.
pub fn uniform_random<R: RngCore + CryptoRng>(rng: &mut R, min: &BigUint, max: &BigUint) -> BigUint {
    if max <= min {
        return min.clone();
    }
    let difference = max - min;
    let len = usize::try_from(difference.bits() / 8 + 1).unwrap_or(usize::MAX);
    let mut data = vec![0u8; len];
    rng.fill_bytes(&mut data);
    data[len - 1] &= 0x7F;
    let numerator = BigUint::from_bytes_le(&data);
    let denominator = BigUint::one() << (len * 8 - 1);
    min + (difference * numerator) / denominator
}
