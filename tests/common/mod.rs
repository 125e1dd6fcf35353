//! Shared helpers for the integration suites: deterministic corpus
//! generation (no RNG dependency, reproducible failures) and parse-chain
//! utilities.

// Each integration binary includes this module; not all of them use every
// helper.
#![allow(dead_code)]

use zx0::Block;

/// xorshift32 — deterministic pseudo-random stream for test corpora.
pub struct XorShift32(u32);

impl XorShift32 {
    pub fn new(seed: u32) -> Self {
        XorShift32(if seed == 0 { 0x9E37_79B9 } else { seed })
    }

    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.0 = x;
        x
    }
}

/// `len` bytes drawn from an alphabet of `alphabet` symbols.
pub fn random_bytes(seed: u32, len: usize, alphabet: u16) -> Vec<u8> {
    let mut rng = XorShift32::new(seed);
    (0..len).map(|_| (rng.next_u32() % alphabet as u32) as u8).collect()
}

/// Text-like data with plenty of repeated phrases at varied distances.
pub fn repetitive_text(len: usize) -> Vec<u8> {
    let phrases: [&[u8]; 4] = [
        b"the optimal parse ",
        b"of the input ",
        b"minimizes bits ",
        b"at every offset. ",
    ];
    let mut rng = XorShift32::new(0xC0FF_EE00);
    let mut out = Vec::with_capacity(len + 32);
    while out.len() < len {
        out.extend_from_slice(phrases[(rng.next_u32() % 4) as usize]);
    }
    out.truncate(len);
    out
}

/// The parse as (length, offset) tokens, root-first; offset 0 marks a
/// literal run.
pub fn tokens(terminal: &Block) -> Vec<(usize, u32)> {
    let mut reversed = Vec::new();
    let mut walk = Some(terminal);
    while let Some(block) = walk {
        if block.chain().is_some() {
            reversed.push((block.token_length(), block.offset()));
        }
        walk = block.chain().map(|arc| arc.as_ref());
    }
    reversed.reverse();
    reversed
}
