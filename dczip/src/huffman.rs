//! Adaptive Huffman entropy coding.
//!
//! Encoder and decoder grow the same code tree as symbols stream through,
//! so no frequency table is transmitted. The tree starts as a lone
//! not-yet-transmitted (NYT) leaf; a symbol's first appearance is coded as
//! the NYT path followed by the raw 8-bit value, and every appearance
//! afterwards as the path to the symbol's leaf. After each symbol the
//! touched leaf-to-root path gains weight, with nodes swapped to keep
//! heavier subtrees in lower arena slots.
//!
//! The packed form prepends one byte giving the number of leading padding
//! bits, then the code bits MSB-first. Decoding consumes bits until none
//! remain, which makes the stream self-delimiting.

use dczip_core::error::{DczipError, Result};
use dczip_core::{MsbBitReader, MsbBitWriter};

/// Vacant index marker for parent and child links.
const NONE: usize = usize::MAX;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodeValue {
    Internal,
    Nyt,
    Symbol(u8),
}

#[derive(Debug, Clone)]
struct Node {
    weight: usize,
    parent: usize,
    left: usize,
    right: usize,
    value: NodeValue,
}

/// Code tree shared (in lockstep) by the encoder and decoder.
///
/// Nodes live in one arena, the root at index 0. Weight-order bookkeeping
/// works through `heads`, which records the lowest arena index currently
/// carrying each weight; weight increases swap a node with that head when
/// the head sits strictly lower in the arena.
#[derive(Debug)]
struct HuffmanTree {
    nodes: Vec<Node>,
    /// Leaf index per symbol, `NONE` until the symbol is first seen.
    leaves: [usize; 256],
    /// Index of the current NYT leaf, always the highest arena slot.
    nyt: usize,
    /// Lowest arena index per weight, `NONE` where vacated.
    heads: Vec<usize>,
}

impl HuffmanTree {
    fn new() -> Self {
        let root = Node {
            weight: 0,
            parent: NONE,
            left: NONE,
            right: NONE,
            value: NodeValue::Nyt,
        };
        Self {
            nodes: vec![root],
            leaves: [NONE; 256],
            nyt: 0,
            heads: vec![0],
        }
    }

    fn head(&self, weight: usize) -> usize {
        self.heads.get(weight).copied().unwrap_or(NONE)
    }

    fn set_head(&mut self, weight: usize, index: usize) {
        if self.heads.len() <= weight {
            self.heads.resize(weight + 1, NONE);
        }
        self.heads[weight] = index;
    }

    fn clear_head(&mut self, weight: usize) {
        if let Some(slot) = self.heads.get_mut(weight) {
            *slot = NONE;
        }
    }

    /// Feed one symbol through the encoder side: emit its current code
    /// (plus the literal byte on first appearance) and update the tree.
    fn observe(&mut self, value: u8, out: &mut MsbBitWriter) {
        let known = self.leaves[value as usize];
        if known != NONE {
            self.emit_path(known, out);
            self.increase_weight(known);
        } else {
            self.emit_path(self.nyt, out);
            let leaf = self.split_nyt(value);
            out.write_bits(u32::from(value), 8);
            self.increase_weight(leaf);
        }
    }

    /// Decoder side of [`observe`](Self::observe): walk the tree by the
    /// next code and return the symbol, applying the same tree update.
    fn resolve(&mut self, reader: &mut MsbBitReader<'_>) -> Result<u8> {
        let mut node = 0;
        loop {
            match self.nodes[node].value {
                NodeValue::Internal => {
                    let bit = reader
                        .read_bit()
                        .ok_or_else(|| DczipError::corrupt("bit stream ends inside a code"))?;
                    node = if bit == 0 {
                        self.nodes[node].left
                    } else {
                        self.nodes[node].right
                    };
                }
                NodeValue::Nyt => {
                    let literal = reader.read_bits(8).ok_or_else(|| {
                        DczipError::truncated("bit stream ends inside a literal byte")
                    })?;
                    let value = literal as u8;
                    let leaf = self.split_nyt(value);
                    self.increase_weight(leaf);
                    return Ok(value);
                }
                NodeValue::Symbol(value) => {
                    self.increase_weight(node);
                    return Ok(value);
                }
            }
        }
    }

    /// Write the root-to-node path, 0 for a left edge and 1 for a right
    /// edge. The path is discovered leaf-upward and replayed reversed.
    fn emit_path(&self, node: usize, out: &mut MsbBitWriter) {
        let mut path = Vec::new();
        let mut cur = node;
        loop {
            let parent = self.nodes[cur].parent;
            if parent == NONE {
                break;
            }
            path.push(u8::from(self.nodes[parent].left != cur));
            cur = parent;
        }
        for &bit in path.iter().rev() {
            out.write_bit(bit);
        }
    }

    /// Turn the NYT leaf into an internal node with the new symbol on the
    /// left and a fresh NYT on the right. Returns the symbol leaf index.
    fn split_nyt(&mut self, value: u8) -> usize {
        let parent = self.nyt;
        let symbol = self.nodes.len();
        let nyt = symbol + 1;
        self.nodes.push(Node {
            weight: 0,
            parent,
            left: NONE,
            right: NONE,
            value: NodeValue::Symbol(value),
        });
        self.nodes.push(Node {
            weight: 0,
            parent,
            left: NONE,
            right: NONE,
            value: NodeValue::Nyt,
        });
        let split = &mut self.nodes[parent];
        split.value = NodeValue::Internal;
        split.left = symbol;
        split.right = nyt;
        self.leaves[value as usize] = symbol;
        self.nyt = nyt;
        symbol
    }

    /// Add one to `node`'s weight and propagate to the root, swapping each
    /// visited node with its weight-class head first so the sibling order
    /// stays valid.
    fn increase_weight(&mut self, start: usize) {
        let mut node = start;
        while node != NONE {
            let weight = self.nodes[node].weight;
            let head = self.head(weight);
            if head != NONE && head < node && head != self.nodes[node].parent {
                self.swap_nodes(head, node);
                node = head;
            }
            // The NYT leaf occupies the highest arena slot and is never on
            // a leaf-to-root path, so node + 1 is always in bounds.
            if self.nodes[node + 1].weight == weight {
                self.set_head(weight, node + 1);
            } else if self.head(weight) == node {
                self.clear_head(weight);
            }
            if self.head(weight + 1) == NONE {
                self.set_head(weight + 1, node);
            }
            self.nodes[node].weight += 1;
            node = self.nodes[node].parent;
        }
    }

    /// Exchange the subtrees and payloads of two arena slots. Indices,
    /// weights and parent links stay put; child links, values, and the
    /// affected lookups move.
    fn swap_nodes(&mut self, a: usize, b: usize) {
        let (a_left, a_right, a_value) = {
            let node = &self.nodes[a];
            (node.left, node.right, node.value)
        };
        let (b_left, b_right, b_value) = {
            let node = &self.nodes[b];
            (node.left, node.right, node.value)
        };

        self.nodes[a].left = b_left;
        self.nodes[a].right = b_right;
        self.nodes[a].value = b_value;
        self.nodes[b].left = a_left;
        self.nodes[b].right = a_right;
        self.nodes[b].value = a_value;

        for child in [b_left, b_right] {
            if child != NONE {
                self.nodes[child].parent = a;
            }
        }
        for child in [a_left, a_right] {
            if child != NONE {
                self.nodes[child].parent = b;
            }
        }

        self.reindex(a);
        self.reindex(b);
    }

    /// Refresh the leaf or NYT lookup for whatever now sits at `index`.
    fn reindex(&mut self, index: usize) {
        match self.nodes[index].value {
            NodeValue::Internal => {}
            NodeValue::Nyt => self.nyt = index,
            NodeValue::Symbol(value) => self.leaves[value as usize] = index,
        }
    }
}

/// Entropy-code `data` into a self-delimiting packed stream.
pub fn encode(data: &[u8]) -> Vec<u8> {
    let mut tree = HuffmanTree::new();
    let mut bits = MsbBitWriter::new();
    for &byte in data {
        tree.observe(byte, &mut bits);
    }
    let (pad, packed) = bits.into_packed();
    let mut out = Vec::with_capacity(1 + packed.len());
    out.push(pad);
    out.extend_from_slice(&packed);
    out
}

/// Decode a stream produced by [`encode`].
pub fn decode(data: &[u8]) -> Result<Vec<u8>> {
    let Some((&pad, packed)) = data.split_first() else {
        return Err(DczipError::truncated("missing pad header byte"));
    };
    if pad > 7 {
        return Err(DczipError::corrupt(format!("pad length {pad} out of range")));
    }
    let mut reader = MsbBitReader::new(packed);
    if reader.read_bits(u32::from(pad)).is_none() {
        return Err(DczipError::corrupt("pad length exceeds the bit stream"));
    }

    let mut tree = HuffmanTree::new();
    let mut out = Vec::new();
    while reader.remaining() > 0 {
        out.push(tree.resolve(&mut reader)?);
    }
    Ok(out)
}
