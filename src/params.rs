//! Fixed domain parameters.
//!
//! The values are the worked example of GOST R 34.10-2001 (Appendix A):
//! a 256-bit prime field, `a = 7`, and a base point of prime order `q`.
//! Existing signature files were produced under these parameters together
//! with the reference key pair below.

use hex_literal::hex;
use num_bigint::BigUint;

use crate::types::{Curve, DomainParams, Point, SigningKey, VerifyingKey};

const P: [u8; 32] = hex!("8000000000000000000000000000000000000000000000000000000000000431");
const A: [u8; 1] = [7];
const B: [u8; 32] = hex!("5fbff498aa938ce739b8e022fbafef40563f6e6a3472fc2a514c0ce9dae23b7e");
const Q: [u8; 32] = hex!("8000000000000000000000000000000150fe8a1892976154c59cfc193accf5b3");
const BASE_X: [u8; 1] = [2];
const BASE_Y: [u8; 32] = hex!("08e2a8a0e65147d4bd6316030e16d19c85c97f0a9ca267122b96abbcea7e8fc8");

const REFERENCE_D: [u8; 32] = hex!("7a929ade789bb9be10ed359dd39a72c11b60961f49397eee1d19ce9891ec3b28");
const REFERENCE_QX: [u8; 32] = hex!("7f2b49e270db6d90d8595bec458b50c58585ba1d4e9b788f6689dbd8e56fd80b");
const REFERENCE_QY: [u8; 32] = hex!("26f1b489d6701dd185c8413a977b3cbbaf64d1c593d26627dffb101a87ff77da");

impl DomainParams {
    /// GOST R 34.10-2001 Appendix A parameter set.
    #[must_use]
    pub fn gost_r3410_2001_test() -> Self {
        Self {
            curve: Curve {
                a: BigUint::from_bytes_be(&A),
                b: BigUint::from_bytes_be(&B),
                p: BigUint::from_bytes_be(&P),
                q: BigUint::from_bytes_be(&Q),
            },
            base: Point::affine(BigUint::from_bytes_be(&BASE_X), BigUint::from_bytes_be(&BASE_Y)),
        }
    }
}

impl Default for DomainParams {
    fn default() -> Self {
        Self::gost_r3410_2001_test()
    }
}

/// Private scalar `d` of the reference key pair.
#[must_use]
pub fn reference_signing_key() -> SigningKey {
    SigningKey { d: BigUint::from_bytes_be(&REFERENCE_D) }
}

/// Public point `Q = d*P` of the reference key pair.
#[must_use]
pub fn reference_verifying_key() -> VerifyingKey {
    VerifyingKey {
        point: Point::affine(
            BigUint::from_bytes_be(&REFERENCE_QX),
            BigUint::from_bytes_be(&REFERENCE_QY),
        ),
    }
}
