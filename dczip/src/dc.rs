//! Distance coding of a byte sequence.
//!
//! Every occurrence of a symbol stores the distance to that symbol's next
//! occurrence, measured over a conceptual buffer that prefixes the text
//! with one slot per alphabet symbol. The prefix seeds every symbol's
//! first occurrence, so no symbol table travels with the stream.
//!
//! Two reductions shrink the distances before serialization:
//!
//! * slots whose contents are already determined at decode time are not
//!   counted, so each stored distance only counts still-unknown slots;
//! * a distance of 1 (the next occurrence is the adjacent slot) is dropped
//!   entirely, because the decoder can recognize the situation and extend
//!   the run on its own.
//!
//! The encoded form is the original length followed by the surviving
//! distances in buffer order. A [`FenwickTree`] tracks which slots are
//! determined; both directions need its order-statistic queries to stay
//! O(n log n).

use dczip_core::FenwickTree;
use dczip_core::error::{DczipError, Result};

use crate::ALPHABET_SIZE;

/// Encode `text` into its distance list. The first value is the text
/// length; the rest are reduced distances in buffer order.
pub fn encode(text: &[u8]) -> Vec<u64> {
    let raw = raw_distances(text);
    let mut presence = presence_tree(text.len());

    let mut out = Vec::with_capacity(text.len() + 1);
    out.push(text.len() as u64);
    for (i, &d) in raw.iter().enumerate() {
        if d == 0 {
            // Final occurrence of its symbol.
            out.push(0);
            continue;
        }
        let target = i + d;
        let skipped = presence.range_sum(i + 1, target);
        presence.add(target, 1);
        if d != 1 {
            out.push((d - skipped) as u64);
        }
    }
    out
}

/// Decode a distance list back into the byte sequence.
pub fn decode(values: &[u64]) -> Result<Vec<u8>> {
    let Some((&header, entries)) = values.split_first() else {
        return Err(DczipError::corrupt("distance list is missing its length header"));
    };
    let total = usize::try_from(header)
        .ok()
        .and_then(|n| n.checked_add(ALPHABET_SIZE))
        .ok_or_else(|| DczipError::corrupt("length header out of range"))?;

    let mut buffer = vec![0u8; total];
    for (c, slot) in buffer.iter_mut().take(ALPHABET_SIZE).enumerate() {
        *slot = c as u8;
    }
    let mut presence = presence_tree(total - ALPHABET_SIZE);

    let mut cursor = 0usize;
    for &entry in entries {
        // A still-unknown slot right behind the cursor is the mark of a
        // dropped distance-1 entry: the symbol there repeats the one at
        // the cursor. Extend such runs before consuming the next entry.
        while cursor + 1 < total && presence.get(cursor + 1) == 0 {
            buffer[cursor + 1] = buffer[cursor];
            presence.add(cursor + 1, 1);
            cursor += 1;
        }
        if cursor >= total {
            return Err(DczipError::corrupt("distance list has entries past the buffer end"));
        }
        if entry == 0 {
            cursor += 1;
            continue;
        }
        let d = usize::try_from(entry)
            .map_err(|_| DczipError::corrupt("distance value out of range"))?;
        // Every slot up to the cursor is determined, so the d-th unknown
        // slot overall is the d-th unknown slot past the cursor.
        let Some(target) = presence.select_zero(d) else {
            return Err(DczipError::corrupt("distance points past the buffer end"));
        };
        buffer[target] = buffer[cursor];
        presence.add(target, 1);
        cursor += 1;
    }
    while cursor + 1 < total && presence.get(cursor + 1) == 0 {
        buffer[cursor + 1] = buffer[cursor];
        presence.add(cursor + 1, 1);
        cursor += 1;
    }

    if presence.prefix_sum(total) != total {
        return Err(DczipError::corrupt("distance list leaves slots undetermined"));
    }
    Ok(buffer.split_off(ALPHABET_SIZE))
}

/// Raw next-occurrence distance for every buffer slot, 0 when the symbol
/// does not occur again. Alphabet slots point at the symbol's first text
/// occurrence.
fn raw_distances(text: &[u8]) -> Vec<usize> {
    const NOWHERE: usize = usize::MAX;
    let mut raw = vec![0usize; ALPHABET_SIZE + text.len()];
    let mut next_at = [NOWHERE; ALPHABET_SIZE];
    for p in (0..text.len()).rev() {
        let c = text[p] as usize;
        let here = ALPHABET_SIZE + p;
        if next_at[c] != NOWHERE {
            raw[here] = next_at[c] - here;
        }
        next_at[c] = here;
    }
    for (c, &at) in next_at.iter().enumerate() {
        if at != NOWHERE {
            raw[c] = at - c;
        }
    }
    raw
}

/// Presence tree over the conceptual buffer: alphabet slots start known,
/// text slots start unknown.
fn presence_tree(text_len: usize) -> FenwickTree {
    let mut slots = vec![0usize; ALPHABET_SIZE + text_len];
    for slot in slots.iter_mut().take(ALPHABET_SIZE) {
        *slot = 1;
    }
    FenwickTree::from_slice(&slots)
}
