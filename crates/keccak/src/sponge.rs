use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::{
    SHA3_256_RATE, SHA3_512_RATE, SHA3_PAD, SHAKE_PAD, SHAKE128_RATE, SHAKE256_RATE, f1600,
};

const PLEN: usize = 25;

pub type Shake128 = Keccak<SHAKE128_RATE, SHAKE_PAD>;
pub type Shake256 = Keccak<SHAKE256_RATE, SHAKE_PAD>;
pub type Sha3_256 = Keccak<SHA3_256_RATE, SHA3_PAD>;
pub type Sha3_512 = Keccak<SHA3_512_RATE, SHA3_PAD>;

#[inline]
fn xor_byte(state: &mut [u64; PLEN], pos: usize, byte: u8) {
    state[pos / 8] ^= u64::from(byte) << (8 * (pos % 8));
}

#[inline]
fn read_byte(state: &[u64; PLEN], pos: usize) -> u8 {
    (state[pos / 8] >> (8 * (pos % 8))) as u8
}

/// Absorbing side of a sponge with a `RATE`-byte rate and domain byte `DS`.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Keccak<const RATE: usize, const DS: u8> {
    state: [u64; PLEN],
    offset: usize,
}

impl<const RATE: usize, const DS: u8> Keccak<RATE, DS> {
    const RATE_FITS: () = assert!(RATE % 8 == 0 && RATE > 0 && RATE < 8 * PLEN);

    #[must_use]
    pub const fn new() -> Self {
        let () = Self::RATE_FITS;
        Self {
            state: [0; PLEN],
            offset: 0,
        }
    }

    /// XOR `data` into the state, permuting after every full rate block.
    pub fn absorb(&mut self, mut data: &[u8]) {
        while !data.is_empty() {
            if self.offset == 0 && data.len() >= RATE {
                let (block, rest) = data.split_at(RATE);
                for (lane, chunk) in self.state.iter_mut().zip(block.chunks_exact(8)) {
                    let mut bytes = [0u8; 8];
                    bytes.copy_from_slice(chunk);
                    *lane ^= u64::from_le_bytes(bytes);
                }
                f1600(&mut self.state);
                data = rest;
                continue;
            }

            let take = (RATE - self.offset).min(data.len());
            for (i, &byte) in data[..take].iter().enumerate() {
                xor_byte(&mut self.state, self.offset + i, byte);
            }
            self.offset += take;
            data = &data[take..];
            if self.offset == RATE {
                f1600(&mut self.state);
                self.offset = 0;
            }
        }
    }

    /// Builder form of [`Self::absorb`].
    #[must_use]
    pub fn chain(mut self, data: &[u8]) -> Self {
        self.absorb(data);
        self
    }

    /// Pad with the domain byte and the final `0x80` bit, then permute once.
    #[must_use]
    pub fn finalize(self) -> XofReader<RATE> {
        let mut state = self.state;
        xor_byte(&mut state, self.offset, DS);
        xor_byte(&mut state, RATE - 1, 0x80);
        f1600(&mut state);
        XofReader { state, offset: 0 }
    }
}

impl<const RATE: usize, const DS: u8> Default for Keccak<RATE, DS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const RATE: usize, const DS: u8> core::fmt::Debug for Keccak<RATE, DS> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Keccak")
            .field("rate", &RATE)
            .field("domain", &DS)
            .finish_non_exhaustive()
    }
}

/// Squeezing side of a finalized sponge.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct XofReader<const RATE: usize> {
    state: [u64; PLEN],
    offset: usize,
}

impl<const RATE: usize> XofReader<RATE> {
    /// Fill `out` with the next `out.len()` bytes of the output stream.
    pub fn squeeze(&mut self, out: &mut [u8]) {
        for byte in out {
            if self.offset == RATE {
                f1600(&mut self.state);
                self.offset = 0;
            }
            *byte = read_byte(&self.state, self.offset);
            self.offset += 1;
        }
    }

    /// Squeeze whole rate blocks. `out.len()` must be a multiple of `RATE`.
    pub fn squeeze_blocks(&mut self, out: &mut [u8]) {
        debug_assert!(out.len() % RATE == 0);
        self.squeeze(out);
    }
}

impl<const RATE: usize> core::fmt::Debug for XofReader<RATE> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("XofReader")
            .field("rate", &RATE)
            .finish_non_exhaustive()
    }
}
