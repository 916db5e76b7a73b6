//! Little-endian, LSB-first bit packing of fixed-width unsigned fields.
//!
//! Every wire format in the workspace is a concatenation of these: value `i`
//! occupies bits `[i*w, (i+1)*w)` of the output viewed as one little-endian
//! integer.

/// Pack `values`, each `bits` wide (`bits <= 32`), into `out`.
///
/// `out` must hold exactly the packed bits rounded up to a whole byte.
pub fn pack_bits(out: &mut [u8], bits: u32, values: impl IntoIterator<Item = u32>) {
    debug_assert!(bits > 0 && bits <= 32);
    let mut acc = 0u64;
    let mut filled = 0u32;
    let mut pos = 0;
    for v in values {
        debug_assert!(bits == 32 || v >> bits == 0, "{v} does not fit in {bits} bits");
        acc |= u64::from(v) << filled;
        filled += bits;
        while filled >= 8 {
            out[pos] = acc as u8;
            pos += 1;
            acc >>= 8;
            filled -= 8;
        }
    }
    if filled > 0 {
        out[pos] = acc as u8;
        pos += 1;
    }
    debug_assert_eq!(pos, out.len());
}

/// Iterator over `bits`-wide fields packed by [`pack_bits`].
#[derive(Clone, Debug)]
pub struct BitUnpacker<'a> {
    input: &'a [u8],
    bits: u32,
    acc: u64,
    filled: u32,
}

impl<'a> BitUnpacker<'a> {
    #[must_use]
    pub fn new(input: &'a [u8], bits: u32) -> Self {
        debug_assert!(bits > 0 && bits <= 32);
        Self {
            input,
            bits,
            acc: 0,
            filled: 0,
        }
    }
}

impl Iterator for BitUnpacker<'_> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        while self.filled < self.bits {
            let (&byte, rest) = self.input.split_first()?;
            self.acc |= u64::from(byte) << self.filled;
            self.filled += 8;
            self.input = rest;
        }
        let v = (self.acc & ((1u64 << self.bits) - 1)) as u32;
        self.acc >>= self.bits;
        self.filled -= self.bits;
        Some(v)
    }
}

/// Unpack into `out`, one field per slot, mapping each raw field through `f`.
pub fn unpack_bits<T>(out: &mut [T], input: &[u8], bits: u32, mut f: impl FnMut(u32) -> T) {
    for (slot, v) in out.iter_mut().zip(BitUnpacker::new(input, bits)) {
        *slot = f(v);
    }
}
