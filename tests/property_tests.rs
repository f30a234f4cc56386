//! Property-based tests for GOST EDS

use gost_eds::*;
use num_bigint::BigUint;
use proptest::prelude::*;

fn params() -> DomainParams {
    DomainParams::gost_r3410_2001_test()
}

// Property test: modular inverse law over the field prime and the group order
proptest! {
    #[test]
    fn inverse_law(bytes in prop::array::uniform32(any::<u8>())) {
        let params = params();
        for m in [&params.curve.p, &params.curve.q] {
            let a = BigUint::from_bytes_be(&bytes) % m;
            prop_assume!(a != BigUint::from(0u8));
            let inv = mod_inverse(&a, m).unwrap();
            prop_assert!(&inv < m);
            prop_assert_eq!((inv * &a) % m, BigUint::from(1u8));
        }
    }
}

// Property test: the point at infinity is the identity on both sides
proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]
    #[test]
    fn infinity_is_identity(k in 1u64..u64::MAX) {
        let params = params();
        let x = scalar_multiply(&params.curve, &params.base, &BigUint::from(k)).unwrap();
        let right = add(&params.curve, &x, &Point::Infinity).unwrap();
        let left = add(&params.curve, &Point::Infinity, &x).unwrap();
        prop_assert_eq!(&right, &x);
        prop_assert_eq!(&left, &right);
    }
}

// Property test: k1*P + k2*P == (k1 + k2)*P for small scalars
proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]
    #[test]
    fn scalar_homomorphism(k1 in 1u32..10_000, k2 in 1u32..10_000) {
        let params = params();
        let c = &params.curve;
        let p = &params.base;
        let a = scalar_multiply(c, p, &BigUint::from(k1)).unwrap();
        let b = scalar_multiply(c, p, &BigUint::from(k2)).unwrap();
        let sum = scalar_multiply(c, p, &(BigUint::from(k1) + k2)).unwrap();
        prop_assert_eq!(add(c, &a, &b).unwrap(), sum.clone());
        prop_assert!(c.contains(&sum));
    }
}

#[test]
fn doubling_consistency() {
    let params = params();
    let c = &params.curve;
    let p = &params.base;
    let two_p = scalar_multiply(c, p, &BigUint::from(2u8)).unwrap();
    assert_eq!(two_p, add(c, p, p).unwrap());
    assert_eq!(two_p, double(c, p).unwrap());
}

// Property test: hashing is a pure function of the bytes, independent of chunking
proptest! {
    #[test]
    fn hash_deterministic(
        data in prop::collection::vec(any::<u8>(), 0..600),
        split in any::<prop::sample::Index>()
    ) {
        let one_shot = file_digest(&data);
        prop_assert_eq!(file_digest(&data), one_shot);
        prop_assert_eq!(hash_file(&data), one_shot.to_biguint());

        let cut = split.index(data.len() + 1);
        let mut h = Hasher::new();
        h.update(&data[..cut]).update(&data[cut..]);
        prop_assert_eq!(h.finalize(), one_shot);
    }
}

#[test]
fn single_bit_flips_avalanche() {
    let mut total = 0u32;
    let samples = 64u32;
    for i in 0..samples {
        let len = 1 + (i as usize * 37) % 300;
        let data: Vec<u8> = (0..len).map(|j| (j as u32 * 131 + i * 7) as u8).collect();
        let mut flipped = data.clone();
        let bit = (i as usize * 13) % (len * 8);
        flipped[bit / 8] ^= 1 << (bit % 8);

        let a = file_digest(&data);
        let b = file_digest(&flipped);
        let diff: u32 = a.0.iter().zip(b.0.iter()).map(|(x, y)| (x ^ y).count_ones()).sum();
        assert!((64..=192).contains(&diff), "sample {i}: {diff} bits differ");
        total += diff;
    }
    let mean = total / samples;
    assert!((118..=138).contains(&mean), "mean differing bits {mean}");
}

// Property test: sign/verify round trip and tamper detection with the reference key pair
proptest! {
    #![proptest_config(ProptestConfig::with_cases(8))]
    #[test]
    fn sign_verify_roundtrip_and_tamper(
        data in prop::collection::vec(any::<u8>(), 1..300),
        at in any::<prop::sample::Index>(),
        mask in 1u8..=255
    ) {
        let params = params();
        let sk = reference_signing_key();
        let vk = reference_verifying_key();
        let sig = sign(&params, &sk, &data).unwrap();
        prop_assert!(verify(&params, &vk, &data, &sig).unwrap());

        let decoded = decode_signature(&encode_signature(&sig), &params.curve.q).unwrap();
        prop_assert_eq!(&decoded, &sig);

        let mut tampered = data.clone();
        tampered[at.index(data.len())] ^= mask;
        prop_assert!(!verify(&params, &vk, &tampered, &sig).unwrap());
    }
}

// Property test: arbitrary text never panics the signature decoder
proptest! {
    #[test]
    fn decode_signature_total(text in ".{0,200}") {
        let q = params().curve.q;
        if let Ok(sig) = decode_signature(&text, &q) {
            prop_assert!(sig.r < q && sig.s < q);
        }
    }
}
