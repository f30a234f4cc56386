#![no_main]

use gost_eds::{decode_signature, encode_signature, DomainParams};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = core::str::from_utf8(data) else { return };
    let q = DomainParams::gost_r3410_2001_test().curve.q;
    // Anything accepted must be in range and re-encode to a canonical line
    // that decodes to the same pair.
    if let Ok(sig) = decode_signature(text, &q) {
        assert!(sig.r < q && sig.s < q);
        let line = encode_signature(&sig);
        assert_eq!(decode_signature(&line, &q).ok(), Some(sig));
    }
});
