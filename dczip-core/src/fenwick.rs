//! Fenwick tree (binary indexed tree) for point updates and range sums.
//!
//! The distance coder keeps a presence index over buffer slots: reducing a
//! raw jump needs the count of already-present slots in a range, and the
//! decoder needs the position of the k-th still-empty slot. Both are
//! O(log n) here. Slot content is arbitrary counts; [`FenwickTree::select_zero`]
//! additionally assumes 0/1 content.

/// Array-backed Fenwick tree over `usize` counts.
///
/// Indices are zero-based on the public API; the backing array uses the
/// conventional one-based layout where `tree[i]` aggregates the
/// `i & i.wrapping_neg()` slots ending at `i`. The tree is never resized
/// after construction.
#[derive(Debug, Clone)]
pub struct FenwickTree {
    tree: Vec<usize>,
    len: usize,
}

impl FenwickTree {
    /// Create a tree of `len` zero-valued slots.
    pub fn new(len: usize) -> Self {
        Self {
            tree: vec![0; len + 1],
            len,
        }
    }

    /// Build a tree from initial slot values in O(n).
    pub fn from_slice(values: &[usize]) -> Self {
        let len = values.len();
        let mut tree = vec![0; len + 1];
        tree[1..].copy_from_slice(values);
        for i in 1..=len {
            let parent = i + (i & i.wrapping_neg());
            if parent <= len {
                tree[parent] += tree[i];
            }
        }
        Self { tree, len }
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if the tree has no slots.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Add `delta` to the slot at `index`.
    pub fn add(&mut self, index: usize, delta: usize) {
        debug_assert!(index < self.len);
        let mut i = index + 1;
        while i <= self.len {
            self.tree[i] += delta;
            i += i & i.wrapping_neg();
        }
    }

    /// Sum of the slots in `[0, end)`.
    pub fn prefix_sum(&self, end: usize) -> usize {
        debug_assert!(end <= self.len);
        let mut sum = 0;
        let mut i = end;
        while i > 0 {
            sum += self.tree[i];
            i -= i & i.wrapping_neg();
        }
        sum
    }

    /// Sum of the slots in `[lo, hi)`. Empty or inverted ranges sum to 0.
    pub fn range_sum(&self, lo: usize, hi: usize) -> usize {
        if hi <= lo {
            return 0;
        }
        self.prefix_sum(hi) - self.prefix_sum(lo)
    }

    /// Current value of the slot at `index`.
    pub fn get(&self, index: usize) -> usize {
        self.range_sum(index, index + 1)
    }

    /// Position of the k-th zero-valued slot (`k` is 1-based), assuming all
    /// slots hold 0 or 1.
    ///
    /// Returns `None` when fewer than `k` slots are zero. Runs in O(log n)
    /// by descending the implicit tree instead of scanning.
    pub fn select_zero(&self, k: usize) -> Option<usize> {
        debug_assert!(k >= 1);
        if self.len == 0 {
            return None;
        }
        let mut pos = 0;
        let mut remaining = k;
        let mut step = 1usize << (usize::BITS - 1 - self.len.leading_zeros());
        while step > 0 {
            let next = pos + step;
            if next <= self.len {
                let zeros = step - self.tree[next];
                if zeros < remaining {
                    remaining -= zeros;
                    pos = next;
                }
            }
            step >>= 1;
        }
        // zeros(0..pos) == k-1 here, so the k-th zero sits at `pos` itself
        // unless the count ran out.
        if pos < self.len { Some(pos) } else { None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn naive_range_sum(values: &[usize], lo: usize, hi: usize) -> usize {
        values[lo..hi].iter().sum()
    }

    #[test]
    fn test_from_slice_range_sums() {
        let values = [1, 3, 5, 7, 9, 11];
        let tree = FenwickTree::from_slice(&values);

        assert_eq!(tree.prefix_sum(6), 36);
        assert_eq!(tree.range_sum(0, 5), 25);
        assert_eq!(tree.range_sum(1, 5), 24);
        assert_eq!(tree.range_sum(3, 3), 0);
        assert_eq!(tree.range_sum(4, 3), 0);
        assert_eq!(tree.prefix_sum(0), 0);
    }

    #[test]
    fn test_add_updates_sums() {
        let mut tree = FenwickTree::from_slice(&[1, 3, 5, 7, 9, 11]);
        tree.add(1, 2);

        assert_eq!(tree.prefix_sum(6), 38);
        assert_eq!(tree.range_sum(0, 2), 6);
        assert_eq!(tree.range_sum(1, 3), 10);
        assert_eq!(tree.get(1), 5);
        assert_eq!(tree.get(2), 5);
    }

    #[test]
    fn test_new_is_all_zero() {
        let tree = FenwickTree::new(10);
        assert_eq!(tree.len(), 10);
        assert_eq!(tree.prefix_sum(10), 0);
        assert_eq!(tree.select_zero(10), Some(9));
        assert_eq!(tree.select_zero(11), None);
    }

    #[test]
    fn test_empty_tree() {
        let tree = FenwickTree::new(0);
        assert!(tree.is_empty());
        assert_eq!(tree.prefix_sum(0), 0);
        assert_eq!(tree.select_zero(1), None);
    }

    #[test]
    fn test_select_zero_literal() {
        let tree = FenwickTree::from_slice(&[1, 0, 1, 0, 0, 1, 0]);
        assert_eq!(tree.select_zero(1), Some(1));
        assert_eq!(tree.select_zero(2), Some(3));
        assert_eq!(tree.select_zero(3), Some(4));
        assert_eq!(tree.select_zero(4), Some(6));
        assert_eq!(tree.select_zero(5), None);
    }

    #[test]
    fn test_select_zero_after_updates() {
        let mut tree = FenwickTree::new(5);
        tree.add(0, 1);
        tree.add(3, 1);
        assert_eq!(tree.select_zero(1), Some(1));
        assert_eq!(tree.select_zero(2), Some(2));
        assert_eq!(tree.select_zero(3), Some(4));

        tree.add(2, 1);
        assert_eq!(tree.select_zero(2), Some(4));
        assert_eq!(tree.select_zero(3), None);
    }

    #[test]
    fn test_range_sums_match_naive_after_random_updates() {
        let mut seed: u64 = 0x1234_5678_9ABC_DEF0;
        let mut next = move || {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
            (seed >> 32) as usize
        };

        let len = 97;
        let mut values: Vec<usize> = (0..len).map(|_| next() % 10).collect();
        let mut tree = FenwickTree::from_slice(&values);

        for _ in 0..200 {
            let index = next() % len;
            let delta = next() % 5;
            values[index] += delta;
            tree.add(index, delta);

            let a = next() % (len + 1);
            let b = next() % (len + 1);
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            assert_eq!(tree.range_sum(lo, hi), naive_range_sum(&values, lo, hi));
        }
    }

    #[test]
    fn test_select_zero_matches_scan() {
        let mut seed: u64 = 0xBEEF_CAFE_0420_1337;
        let mut next = move || {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
            (seed >> 32) as usize
        };

        for len in [1, 2, 7, 64, 100] {
            let values: Vec<usize> = (0..len).map(|_| next() % 2).collect();
            let tree = FenwickTree::from_slice(&values);
            let zeros: Vec<usize> = (0..len).filter(|&i| values[i] == 0).collect();

            for (rank, &position) in zeros.iter().enumerate() {
                assert_eq!(tree.select_zero(rank + 1), Some(position));
            }
            assert_eq!(tree.select_zero(zeros.len() + 1), None);
        }
    }
}
