//! Burrows-Wheeler transform over sentinel-extended input.
//!
//! The input is conceptually extended with a single [`SENTINEL`](crate::SENTINEL)
//! byte that sorts below every other symbol, and all rotations of the
//! extended string are sorted; the transform output is the last column of
//! that sorted rotation matrix. The sentinel makes the transform uniquely
//! invertible without transmitting a primary index, at the cost of
//! forbidding the sentinel byte in the input.
//!
//! Rotation order falls out of the suffix ranks: the rotation starting at
//! the sentinel sorts first, and the rotation starting at position `i`
//! sorts as suffix `i` does.

use dczip_core::error::{DczipError, Result};

use crate::SENTINEL;
use crate::suffix::suffix_ranks;

/// Apply the transform to `text`.
///
/// The output is one byte longer than the input and contains the sentinel
/// exactly once. Returns [`DczipError::InvalidSentinel`] if `text` itself
/// contains the sentinel byte.
pub fn transform(text: &[u8]) -> Result<Vec<u8>> {
    if let Some(offset) = text.iter().position(|&b| b == SENTINEL) {
        return Err(DczipError::invalid_sentinel(SENTINEL, offset));
    }

    let n = text.len();
    let ranks = suffix_ranks(text);

    // Slot 0 belongs to the sentinel rotation, whose last column entry is
    // the final input byte. The rotation starting at position i + 1 ends
    // with text[i] and sorts at rank[i + 1] among the remaining rotations;
    // the rotation starting at 0 ends with the sentinel.
    let mut output = vec![SENTINEL; n + 1];
    if n > 0 {
        output[0] = text[n - 1];
    }
    for (i, &rank) in ranks.iter().enumerate() {
        output[rank + 1] = if i == 0 { SENTINEL } else { text[i - 1] };
    }
    Ok(output)
}

/// Invert the transform, recovering the original input.
///
/// `bwt` must contain the sentinel exactly once; anything else is reported
/// as [`DczipError::CorruptStream`].
pub fn inverse_transform(bwt: &[u8]) -> Result<Vec<u8>> {
    let mut sentinel_at = None;
    for (i, &b) in bwt.iter().enumerate() {
        if b == SENTINEL {
            if sentinel_at.is_some() {
                return Err(DczipError::corrupt(
                    "transform output contains more than one sentinel",
                ));
            }
            sentinel_at = Some(i);
        }
    }
    let Some(start) = sentinel_at else {
        return Err(DczipError::corrupt("transform output contains no sentinel"));
    };

    // Stable counting sort recovers, for each sorted-column slot, the index
    // of the source byte: that mapping is exactly the successor function of
    // the rotation walk.
    let mut counts = [0usize; 256];
    for &b in bwt {
        counts[b as usize] += 1;
    }
    let mut positions = [0usize; 256];
    let mut total = 0;
    for (c, &count) in counts.iter().enumerate() {
        positions[c] = total;
        total += count;
    }
    let mut next = vec![0usize; bwt.len()];
    for (i, &b) in bwt.iter().enumerate() {
        next[positions[b as usize]] = i;
        positions[b as usize] += 1;
    }

    let mut text = Vec::with_capacity(bwt.len() - 1);
    let mut cursor = start;
    for _ in 1..bwt.len() {
        cursor = next[cursor];
        text.push(bwt[cursor]);
    }
    Ok(text)
}
