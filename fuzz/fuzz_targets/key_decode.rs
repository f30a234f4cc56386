#![no_main]

use gost_eds::{decode_signing_key, decode_verifying_key, DomainParams};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = core::str::from_utf8(data) else { return };
    let curve = DomainParams::gost_r3410_2001_test().curve;
    let _ = decode_signing_key(text, &curve);
    if let Ok(vk) = decode_verifying_key(text, &curve) {
        assert!(curve.contains(vk.point()));
    }
});
