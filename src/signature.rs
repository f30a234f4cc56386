//! GOST R 34.10-2001 signature creation and verification over the sponge
//! digest of a file.

use num_bigint::BigUint;
use num_traits::Zero;
use rand_core::{CryptoRng, OsRng, RngCore};
use tracing::{debug, instrument, warn};

use crate::{
    arith::{mod_inverse, uniform_random},
    curve::{add, scalar_multiply},
    errors::EdsError,
    hashers::{digest_to_scalar, hash_file},
    types::{Curve, DomainParams, Point, Signature, SigningKey, VerifyingKey},
};

/// Upper bound on nonce draws per signature. A single retry already has
/// probability about `2/q`.
pub const MAX_SIGN_ATTEMPTS: u32 = 64;

impl SigningKey {
    /// Wrap a private scalar.
    ///
    /// # Errors
    ///
    /// Returns `EdsError::InvalidKey` unless `1 <= d < q`.
    pub fn from_scalar(d: BigUint, curve: &Curve) -> Result<Self, EdsError> {
        if d.is_zero() || d >= curve.q {
            return Err(EdsError::InvalidKey("scalar out of range"));
        }
        Ok(Self { d })
    }

    /// Draw a fresh private scalar in `[1, q)`.
    pub fn generate<R: RngCore + CryptoRng>(rng: &mut R, params: &DomainParams) -> Self {
        let q = &params.curve.q;
        let d = uniform_random(rng, &BigUint::zero(), &(q - 1u8)) + 1u8;
        Self { d }
    }

    #[must_use]
    pub const fn scalar(&self) -> &BigUint {
        &self.d
    }

    /// `Q = d*P`.
    ///
    /// # Errors
    ///
    /// Propagates `EdsError::ArithmeticPrecondition` from the curve engine.
    pub fn verifying_key(&self, params: &DomainParams) -> Result<VerifyingKey, EdsError> {
        let point = scalar_multiply(&params.curve, &params.base, &self.d)?;
        VerifyingKey::from_point(point, &params.curve)
    }
}

impl VerifyingKey {
    /// Wrap a public point after checking it is a finite curve point.
    ///
    /// # Errors
    ///
    /// Returns `EdsError::InvalidKey` for the point at infinity or a point
    /// that does not satisfy the curve equation.
    pub fn from_point(point: Point, curve: &Curve) -> Result<Self, EdsError> {
        if point.is_infinity() {
            return Err(EdsError::InvalidKey("point at infinity"));
        }
        if !curve.contains(&point) {
            return Err(EdsError::InvalidKey("point not on curve"));
        }
        Ok(Self { point })
    }
}

/// One signing attempt on a digest value `e` with a caller-chosen nonce
/// `k`, `1 <= k < q`. `e` is reduced modulo `q`, zero mapping to one.
///
/// # Errors
///
/// Returns `EdsError::DegenerateNonce` when `r` or `s` comes out zero; the
/// caller must draw a new `k`.
pub fn sign_prehashed_with_nonce(
    params: &DomainParams,
    key: &SigningKey,
    e: &BigUint,
    k: &BigUint,
) -> Result<Signature, EdsError> {
    let q = &params.curve.q;
    let e = digest_to_scalar(e, q);
    let big_r = scalar_multiply(&params.curve, &params.base, k)?;
    let Some(x) = big_r.x() else {
        return Err(EdsError::DegenerateNonce);
    };
    let r = x % q;
    if r.is_zero() {
        return Err(EdsError::DegenerateNonce);
    }
    let s = (&r * &key.d + k * &e) % q;
    if s.is_zero() {
        return Err(EdsError::DegenerateNonce);
    }
    Ok(Signature { r, s })
}

/// Sign a reduced digest, drawing nonces from `rng` until both signature
/// components are non-zero.
///
/// # Errors
///
/// Returns `EdsError::NonceRetriesExhausted` after [`MAX_SIGN_ATTEMPTS`]
/// degenerate draws, or propagates an arithmetic failure.
pub fn sign_prehashed<R: RngCore + CryptoRng>(
    rng: &mut R,
    params: &DomainParams,
    key: &SigningKey,
    e: &BigUint,
) -> Result<Signature, EdsError> {
    let q = &params.curve.q;
    let upper = q - 1u8;
    for attempt in 1..=MAX_SIGN_ATTEMPTS {
        let k = uniform_random(rng, &BigUint::zero(), &upper) + 1u8;
        match sign_prehashed_with_nonce(params, key, e, &k) {
            Err(EdsError::DegenerateNonce) => {
                warn!(attempt, "degenerate nonce, drawing again");
            }
            other => return other,
        }
    }
    Err(EdsError::NonceRetriesExhausted { attempts: MAX_SIGN_ATTEMPTS })
}

/// Sign file content with nonces from the operating system RNG.
///
/// # Errors
///
/// See [`sign_prehashed`].
pub fn sign(params: &DomainParams, key: &SigningKey, data: &[u8]) -> Result<Signature, EdsError> {
    sign_with_rng(&mut OsRng, params, key, data)
}

/// Sign file content with nonces from `rng`.
///
/// # Errors
///
/// See [`sign_prehashed`].
#[instrument(level = "debug", skip_all, fields(data_len = data.len()))]
pub fn sign_with_rng<R: RngCore + CryptoRng>(
    rng: &mut R,
    params: &DomainParams,
    key: &SigningKey,
    data: &[u8],
) -> Result<Signature, EdsError> {
    let e = digest_to_scalar(&hash_file(data), &params.curve.q);
    let sig = sign_prehashed(rng, params, key, &e)?;
    debug!("signature created");
    Ok(sig)
}

fn check_range(sig: &Signature, q: &BigUint) -> Result<(), EdsError> {
    if sig.r.is_zero() || &sig.r >= q {
        return Err(EdsError::MalformedSignature("r out of range"));
    }
    if sig.s.is_zero() || &sig.s >= q {
        return Err(EdsError::MalformedSignature("s out of range"));
    }
    Ok(())
}

/// Verify a signature on a reduced digest `e`.
///
/// Returns `Ok(false)` for a well-formed signature that does not match.
///
/// # Errors
///
/// Returns `EdsError::MalformedSignature` if `r` or `s` lies outside
/// `(0, q)`.
pub fn verify_prehashed(
    params: &DomainParams,
    key: &VerifyingKey,
    e: &BigUint,
    sig: &Signature,
) -> Result<bool, EdsError> {
    let q = &params.curve.q;
    check_range(sig, q)?;
    let e = digest_to_scalar(e, q);

    let v = mod_inverse(&e, q)?;
    let z1 = (&sig.s * &v) % q;
    let z2 = (q - (&sig.r * &v) % q) % q;

    let c1 = scalar_multiply(&params.curve, &params.base, &z1)?;
    let c2 = scalar_multiply(&params.curve, &key.point, &z2)?;
    let c = add(&params.curve, &c1, &c2)?;
    Ok(c.x().is_some_and(|x| x % q == sig.r))
}

/// Verify a signature over file content.
///
/// # Errors
///
/// See [`verify_prehashed`].
#[instrument(level = "debug", skip_all, fields(data_len = data.len()))]
pub fn verify(
    params: &DomainParams,
    key: &VerifyingKey,
    data: &[u8],
    sig: &Signature,
) -> Result<bool, EdsError> {
    check_range(sig, &params.curve.q)?;
    let e = digest_to_scalar(&hash_file(data), &params.curve.q);
    let valid = verify_prehashed(params, key, &e, sig)?;
    debug!(valid, "signature checked");
    Ok(valid)
}

/// Parse a signature file's content and verify it over `data`.
///
/// # Errors
///
/// Returns `EdsError::MalformedSignature` if `text` does not decode to an
/// in-range `(r, s)`.
pub fn verify_encoded(
    params: &DomainParams,
    key: &VerifyingKey,
    data: &[u8],
    text: &str,
) -> Result<bool, EdsError> {
    let sig = crate::ser::decode_signature(text, &params.curve.q)?;
    verify(params, key, data, &sig)
}
