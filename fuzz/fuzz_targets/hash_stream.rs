#![no_main]

use gost_eds::{file_digest, Hasher};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // First byte picks the chunk size; streaming must match one-shot hashing.
    let Some((&step, rest)) = data.split_first() else { return };
    let step = usize::from(step).max(1);
    let mut h = Hasher::new();
    for chunk in rest.chunks(step) {
        h.update(chunk);
    }
    assert_eq!(h.finalize(), file_digest(rest));
});
