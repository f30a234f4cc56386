#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::many_single_char_names,
    clippy::similar_names
)]

//! GOST EDS - file signatures
//!
//! This crate signs and verifies files with a GOST R 34.10-2001 elliptic-curve
//! signature over a 256-bit Keccak-family sponge digest of the file content.

// Fixed cryptographic choices:
// - Curve: GOST R 34.10-2001 Appendix A parameter set (256-bit prime field)
// - Digest: Keccak-f[1600], rate 1088, permuted after every absorbed lane,
//   big-endian lane packing, one lane squeezed per permutation
// - Signature encoding: r || s as 128 lowercase hex digits
// - Nonces: OS CSPRNG, scaled into [1, q)
//
// The digest is not SHA3-256 and must not be "fixed": signatures already in
// circulation depend on its exact output.

// Core modules
pub mod types;
pub mod errors;
pub mod params;
pub mod arith;
pub mod curve;
pub mod keccak;
pub mod hashers;
pub mod ser;
pub mod signature;

// Re-export commonly used types and functions
pub use types::*;
pub use errors::EdsError;
pub use params::{reference_signing_key, reference_verifying_key};
pub use arith::{extended_gcd, mod_inverse, uniform_random};
pub use curve::{add, double, scalar_multiply};
pub use keccak::{Hasher, KeccakState};
pub use hashers::{digest_to_scalar, file_digest, hash_file};
pub use ser::{
    decode_signature, decode_signing_key, decode_verifying_key, encode_signature,
    encode_signing_key, encode_verifying_key,
};
pub use signature::{
    sign, sign_prehashed, sign_prehashed_with_nonce, sign_with_rng, verify, verify_encoded,
    verify_prehashed, MAX_SIGN_ATTEMPTS,
};

// Version constants
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
