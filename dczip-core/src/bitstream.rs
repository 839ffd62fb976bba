//! MSB-first bit collection and packing for adaptive Huffman codes.
//!
//! Adaptive codes have no byte alignment, and the container format pads at
//! the *front* of the stream: packed output is `(8 - n mod 8) mod 8` zero
//! bits followed by the code bits, most significant bit first. The writer
//! therefore collects bits individually and packs once the total count is
//! known; the reader walks packed bytes with a bit cursor.

/// Bit-at-a-time writer producing front-padded, MSB-first packed bytes.
#[derive(Debug, Default)]
pub struct MsbBitWriter {
    bits: Vec<u8>,
}

impl MsbBitWriter {
    /// Create an empty writer.
    pub fn new() -> Self {
        Self { bits: Vec::new() }
    }

    /// Append a single bit (the low bit of `bit`).
    #[inline]
    pub fn write_bit(&mut self, bit: u8) {
        self.bits.push(bit & 1);
    }

    /// Append the low `count` bits of `value`, most significant first.
    pub fn write_bits(&mut self, value: u32, count: u32) {
        debug_assert!(count <= 32);
        for shift in (0..count).rev() {
            self.bits.push(((value >> shift) & 1) as u8);
        }
    }

    /// Number of bits collected so far.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// True if no bits have been collected.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Pack the collected bits into whole bytes, zero-padding at the front.
    ///
    /// Returns the pad bit count (0..=7) and the packed bytes; the pad bits
    /// are included in the bytes. An empty writer packs to no bytes.
    pub fn into_packed(self) -> (u8, Vec<u8>) {
        let pad = (8 - self.bits.len() % 8) % 8;
        let mut packed = Vec::with_capacity((pad + self.bits.len()) / 8);
        let mut acc = 0u8;
        let mut filled = pad;
        for bit in self.bits {
            acc = (acc << 1) | bit;
            filled += 1;
            if filled == 8 {
                packed.push(acc);
                acc = 0;
                filled = 0;
            }
        }
        (pad as u8, packed)
    }
}

/// MSB-first bit reader over packed bytes.
#[derive(Debug)]
pub struct MsbBitReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> MsbBitReader<'a> {
    /// Create a reader over `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Number of unread bits.
    pub fn remaining(&self) -> usize {
        self.data.len() * 8 - self.pos
    }

    /// Read one bit, or `None` when the data is exhausted.
    #[inline]
    pub fn read_bit(&mut self) -> Option<u8> {
        if self.pos >= self.data.len() * 8 {
            return None;
        }
        let bit = (self.data[self.pos / 8] >> (7 - self.pos % 8)) & 1;
        self.pos += 1;
        Some(bit)
    }

    /// Read `count` bits MSB-first as a single value.
    ///
    /// Returns `None` without consuming anything when fewer than `count`
    /// bits remain.
    pub fn read_bits(&mut self, count: u32) -> Option<u32> {
        debug_assert!(count <= 32);
        if self.remaining() < count as usize {
            return None;
        }
        let mut value = 0u32;
        for _ in 0..count {
            value = (value << 1) | u32::from(self.read_bit()?);
        }
        Some(value)
    }
}
