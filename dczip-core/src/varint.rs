//! Self-delimiting variable-length integer codec.
//!
//! A value is escalated through widening 0xFF runs: while the remainder is
//! at least `T(w) = 256^w - 1`, the encoder subtracts `T(w)`, emits `w`
//! bytes of 0xFF, and widens by one; the final remainder is emitted
//! big-endian in `w` bytes. The decoder counts leading 0xFF bytes against
//! the expected run length for the current width, accumulating `T(w)` per
//! completed run; a run cut short means its 0xFF bytes already belong to
//! the final big-endian value.
//!
//! Small values stay small (`0` is the single byte `00`), the encoding is
//! self-delimiting with no external length field, and concatenated values
//! decode back by repeated single-value decoding.
//!
//! # Examples
//!
//! ```
//! use dczip_core::varint;
//!
//! let bytes = varint::encode(&[0, 255, 256]);
//! assert_eq!(bytes, [0x00, 0xFF, 0x00, 0x00, 0xFF, 0x00, 0x01]);
//! assert_eq!(varint::decode(&bytes).unwrap(), vec![0, 255, 256]);
//! ```

use crate::error::{DczipError, Result};

/// `256^width - 1`, the escalation threshold for a given byte width.
#[inline]
fn threshold(width: u32) -> u128 {
    (1u128 << (8 * width)) - 1
}

/// Append the encoding of `value` to `out`.
pub fn encode_value(value: u64, out: &mut Vec<u8>) {
    let mut v = u128::from(value);
    let mut width = 1u32;
    let mut limit = threshold(width);
    while v >= limit {
        v -= limit;
        for _ in 0..width {
            out.push(0xFF);
        }
        width += 1;
        limit = threshold(width);
    }
    for shift in (0..width).rev() {
        out.push((v >> (8 * shift)) as u8);
    }
}

/// Encode a sequence of values as concatenated self-delimiting encodings.
pub fn encode(values: &[u64]) -> Vec<u8> {
    let mut out = Vec::with_capacity(values.len());
    for &value in values {
        encode_value(value, &mut out);
    }
    out
}

/// Decode one value from the front of `bytes`.
///
/// Returns the value and the number of bytes consumed. Fails with
/// [`DczipError::TruncatedInput`] when the buffer ends inside a run or
/// inside the value bytes, and with [`DczipError::CorruptStream`] when the
/// accumulated value exceeds the 64-bit range.
pub fn decode_value(bytes: &[u8]) -> Result<(u64, usize)> {
    if bytes.is_empty() {
        return Err(DczipError::truncated("varint at end of input"));
    }

    let mut shift = 0u128;
    let mut width = 1usize;
    let mut run = 0usize;
    let mut i = 0usize;
    while i < bytes.len() && bytes[i] == 0xFF {
        run += 1;
        i += 1;
        if run == width {
            shift += threshold(width as u32);
            if shift > u128::from(u64::MAX) {
                return Err(DczipError::corrupt("varint exceeds the 64-bit range"));
            }
            width += 1;
            run = 0;
        }
    }

    // A partial 0xFF run belongs to the value: the value spans `width`
    // bytes starting at the run's first byte.
    let start = i - run;
    let end = start + width;
    if end > bytes.len() {
        return Err(DczipError::truncated(format!(
            "varint value needs {width} bytes, {} available",
            bytes.len() - start
        )));
    }

    let mut value = 0u128;
    for &b in &bytes[start..end] {
        value = (value << 8) | u128::from(b);
    }
    let total = value + shift;
    if total > u128::from(u64::MAX) {
        return Err(DczipError::corrupt("varint exceeds the 64-bit range"));
    }
    Ok((total as u64, end))
}

/// Decode a buffer of concatenated encodings into the value sequence.
pub fn decode(bytes: &[u8]) -> Result<Vec<u64>> {
    let mut values = Vec::new();
    let mut offset = 0;
    while offset < bytes.len() {
        let (value, consumed) = decode_value(&bytes[offset..])?;
        values.push(value);
        offset += consumed;
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded(value: u64) -> Vec<u8> {
        let mut out = Vec::new();
        encode_value(value, &mut out);
        out
    }

    #[test]
    fn test_encode_literals() {
        assert_eq!(encoded(0), [0x00]);
        assert_eq!(encoded(97), [0x61]);
        assert_eq!(encoded(254), [0xFE]);
        assert_eq!(encoded(255), [0xFF, 0x00, 0x00]);
        assert_eq!(encoded(256), [0xFF, 0x00, 0x01]);
        assert_eq!(encoded(65535), [0xFF, 0xFF, 0x00]);
        assert_eq!(encoded(255 + 65535), [0xFF, 0xFF, 0xFF, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn test_decode_literals() {
        assert_eq!(decode_value(&[0x00]).unwrap(), (0, 1));
        assert_eq!(decode_value(&[0x61]).unwrap(), (97, 1));
        assert_eq!(decode_value(&[0x61, 0x62]).unwrap(), (97, 1));
        assert_eq!(decode_value(&[0xFE]).unwrap(), (254, 1));
        assert_eq!(decode_value(&[0xFF, 0x00, 0x00]).unwrap(), (255, 3));
        assert_eq!(decode_value(&[0xFF, 0x00, 0x01]).unwrap(), (256, 3));
    }

    #[test]
    fn test_decode_partial_run_inside_value() {
        // The second 0xFF never completes the width-2 run, so it is a
        // value byte: FF | FF 00 = 255 + 65280.
        assert_eq!(decode_value(&[0xFF, 0xFF, 0x00]).unwrap(), (65535, 3));
        assert_eq!(
            decode_value(&[0xFF, 0xFF, 0xFF, 0x00, 0x00, 0x00]).unwrap(),
            (65790, 6)
        );
    }

    #[test]
    fn test_roundtrip_boundaries() {
        let values = [
            0,
            1,
            254,
            255,
            256,
            65534,
            65535,
            65536,
            255 + 65535,
            1 << 32,
            u64::MAX - 1,
            u64::MAX,
        ];
        for &value in &values {
            let bytes = encoded(value);
            assert_eq!(decode_value(&bytes).unwrap(), (value, bytes.len()));
        }
    }

    #[test]
    fn test_sequence_roundtrip() {
        let values = [0u64, 1, 255, 256, 65535, 65790, 0, u64::MAX];
        let bytes = encode(&values);
        assert_eq!(decode(&bytes).unwrap(), values);
    }

    #[test]
    fn test_decode_empty_sequence() {
        assert_eq!(decode(&[]).unwrap(), Vec::<u64>::new());
    }

    #[test]
    fn test_truncated_inputs() {
        assert!(matches!(
            decode_value(&[]),
            Err(DczipError::TruncatedInput { .. })
        ));
        // Run with no terminating data byte.
        assert!(matches!(
            decode_value(&[0xFF]),
            Err(DczipError::TruncatedInput { .. })
        ));
        assert!(matches!(
            decode_value(&[0xFF, 0xFF, 0xFF]),
            Err(DczipError::TruncatedInput { .. })
        ));
        // Terminated run, but the width-2 value is cut short.
        assert!(matches!(
            decode_value(&[0xFF, 0x00]),
            Err(DczipError::TruncatedInput { .. })
        ));
    }

    #[test]
    fn test_out_of_range_is_corrupt() {
        // Completing every run through width 8 already overshoots u64.
        let bytes = vec![0xFF; 36];
        assert!(matches!(
            decode_value(&bytes),
            Err(DczipError::CorruptStream { .. })
        ));

        // Runs through width 7 plus an all-but-max 8-byte value lands just
        // past u64::MAX.
        let mut bytes = vec![0xFF; 35];
        bytes.push(0xFE);
        assert!(matches!(
            decode_value(&bytes),
            Err(DczipError::CorruptStream { .. })
        ));
    }
}
