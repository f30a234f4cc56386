//! Keccak-f\[1600\] state and the sponge built on it.
//!
//! This is not SHA3-256. Existing signatures were produced by a sponge that
//! permutes after every absorbed lane (not once per block), packs lanes
//! most-significant byte first, and squeezes one lane per permutation. All
//! three are reproduced here bit for bit.

use crate::types::{Digest, DIGEST_LEN};

pub const ROUNDS: usize = 24;
pub const RATE_BITS: usize = 1088;
pub const RATE_BYTES: usize = RATE_BITS / 8; // 136
pub const RATE_LANES: usize = RATE_BITS / 64; // 17
pub const LANE_BYTES: usize = 8;

const PAD_FIRST: u8 = 0x01;
const PAD_LAST: u8 = 0x80;

/// Iota round constants.
pub const ROUND_CONSTANTS: [u64; ROUNDS] = [
    0x0000_0000_0000_0001,
    0x0000_0000_0000_8082,
    0x8000_0000_0000_808A,
    0x8000_0000_8000_8000,
    0x0000_0000_0000_808B,
    0x0000_0000_8000_0001,
    0x8000_0000_8000_8081,
    0x8000_0000_0000_8009,
    0x0000_0000_0000_008A,
    0x0000_0000_0000_0088,
    0x0000_0000_8000_8009,
    0x0000_0000_8000_000A,
    0x0000_0000_8000_808B,
    0x8000_0000_0000_008B,
    0x8000_0000_0000_8089,
    0x8000_0000_0000_8003,
    0x8000_0000_0000_8002,
    0x8000_0000_0000_0080,
    0x0000_0000_0000_800A,
    0x8000_0000_8000_000A,
    0x8000_0000_8000_8081,
    0x8000_0000_0000_8080,
    0x0000_0000_8000_0001,
    0x8000_0000_8000_8008,
];

/// Rho rotation offsets, indexed `[x][y]`.
pub const ROTATION_OFFSETS: [[u32; 5]; 5] = [
    [0, 36, 3, 41, 18],
    [1, 44, 10, 45, 2],
    [62, 6, 43, 15, 61],
    [28, 55, 25, 21, 56],
    [27, 20, 39, 8, 14],
];

/// 5x5 array of 64-bit lanes, indexed `[x][y]`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeccakState {
    lanes: [[u64; 5]; 5],
}

impl KeccakState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn lane(&self, x: usize, y: usize) -> u64 {
        self.lanes[x][y]
    }

    /// Full 24-round permutation.
    pub fn permute(&mut self) {
        for rc in ROUND_CONSTANTS {
            self.round(rc);
        }
    }

    fn round(&mut self, rc: u64) {
        let a = &mut self.lanes;

        // Theta
        let mut c = [0u64; 5];
        for (x, col) in c.iter_mut().enumerate() {
            *col = a[x][0] ^ a[x][1] ^ a[x][2] ^ a[x][3] ^ a[x][4];
        }

        // Theta, then rho and pi into b
        let mut b = [[0u64; 5]; 5];
        for x in 0..5 {
            let d = c[(x + 4) % 5] ^ c[(x + 1) % 5].rotate_left(1);
            for y in 0..5 {
                a[x][y] ^= d;
                b[y][(2 * x + 3 * y) % 5] = a[x][y].rotate_left(ROTATION_OFFSETS[x][y]);
            }
        }

        // Chi
        for x in 0..5 {
            for y in 0..5 {
                a[x][y] = b[x][y] ^ (!b[(x + 1) % 5][y] & b[(x + 2) % 5][y]);
            }
        }

        // Iota
        a[0][0] ^= rc;
    }

    /// XOR one big-endian lane into rate position `index` (`index = 5x + y`)
    /// and permute.
    fn absorb_lane(&mut self, index: usize, bytes: &[u8]) {
        let mut word = [0u8; LANE_BYTES];
        word.copy_from_slice(bytes);
        self.lanes[index / 5][index % 5] ^= u64::from_be_bytes(word);
        self.permute();
    }

    /// Absorb one full rate block, permuting after each of its 17 lanes.
    pub fn absorb_block(&mut self, block: &[u8; RATE_BYTES]) {
        for (index, lane) in block.chunks_exact(LANE_BYTES).enumerate() {
            self.absorb_lane(index, lane);
        }
    }

    /// Read rate lane `index` out big-endian, then permute.
    fn squeeze_lane(&mut self, index: usize) -> [u8; LANE_BYTES] {
        let out = self.lanes[index / 5][index % 5].to_be_bytes();
        self.permute();
        out
    }
}

/// Incremental form of the sponge. Any split of the input into `update`
/// calls yields the same digest as hashing it in one piece.
#[derive(Clone, Debug)]
pub struct Hasher {
    state: KeccakState,
    buffer: [u8; RATE_BYTES],
    buffered: usize,
}

impl Hasher {
    #[must_use]
    pub fn new() -> Self {
        Self { state: KeccakState::new(), buffer: [0u8; RATE_BYTES], buffered: 0 }
    }

    pub fn update(&mut self, mut data: &[u8]) -> &mut Self {
        // Full blocks are absorbed eagerly: padding always adds at least one
        // byte, so a completed block can never be the padded final block.
        while !data.is_empty() {
            let take = (RATE_BYTES - self.buffered).min(data.len());
            self.buffer[self.buffered..self.buffered + take].copy_from_slice(&data[..take]);
            self.buffered += take;
            data = &data[take..];
            if self.buffered == RATE_BYTES {
                self.state.absorb_block(&self.buffer);
                self.buffered = 0;
            }
        }
        self
    }

    /// Pad, absorb the final block and squeeze the digest.
    #[must_use]
    pub fn finalize(mut self) -> Digest {
        let mut block = [0u8; RATE_BYTES];
        block[..self.buffered].copy_from_slice(&self.buffer[..self.buffered]);
        block[self.buffered] = PAD_FIRST;
        // A message ending one byte short of a block boundary is completed by
        // the 0x01 byte alone and gets no closing 0x80.
        if self.buffered + 1 < RATE_BYTES {
            block[RATE_BYTES - 1] ^= PAD_LAST;
        }
        self.state.absorb_block(&block);
        squeeze(&mut self.state)
    }
}

impl Default for Hasher {
    fn default() -> Self {
        Self::new()
    }
}

fn squeeze(state: &mut KeccakState) -> Digest {
    let mut out = [0u8; DIGEST_LEN];
    let lanes = (0..RATE_LANES).cycle();
    for (chunk, index) in out.chunks_exact_mut(LANE_BYTES).zip(lanes) {
        chunk.copy_from_slice(&state.squeeze_lane(index));
    }
    Digest(out)
}

/// Pad `message` to a whole number of rate blocks: append `0x01`, then, if
/// that is not already block aligned, zero-fill and XOR `0x80` into the last
/// byte.
#[must_use]
pub fn pad(message: &[u8]) -> Vec<u8> {
    let mut padded = Vec::with_capacity(message.len() + RATE_BYTES);
    padded.extend_from_slice(message);
    padded.push(PAD_FIRST);
    let rem = padded.len() % RATE_BYTES;
    if rem != 0 {
        padded.resize(padded.len() + RATE_BYTES - rem, 0);
        if let Some(last) = padded.last_mut() {
            *last ^= PAD_LAST;
        }
    }
    padded
}

/// One-shot sponge over `message`.
#[must_use]
pub fn keccak_digest(message: &[u8]) -> Digest {
    let mut state = KeccakState::new();
    for block in pad(message).chunks_exact(RATE_BYTES) {
        let mut buf = [0u8; RATE_BYTES];
        buf.copy_from_slice(block);
        state.absorb_block(&buf);
    }
    squeeze(&mut state)
}
