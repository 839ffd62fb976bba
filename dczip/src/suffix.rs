//! Suffix rank construction via SA-IS (suffix array induced sorting).
//!
//! [`suffix_ranks`] returns, for every position of the input, the rank of
//! its suffix among all suffixes sorted lexicographically, with the end of
//! the sequence treated as smaller than any symbol. The transform layer
//! turns these ranks directly into sorted-rotation positions.
//!
//! Construction is O(n): the input is shifted up by one so that 0 can serve
//! as an appended sentinel, suffixes are classified S/L, LMS suffixes are
//! induced into order, and unresolved ties recurse on the reduced naming
//! problem (Nong, Zhang & Chan 2009).

/// Marker for an empty suffix-array slot during induction.
const EMPTY: usize = usize::MAX;

/// Compute the lexicographic rank of every suffix of `text`.
///
/// `rank[i]` is the position of the suffix starting at `i` among all
/// `text.len()` suffixes; the result is a permutation of `0..text.len()`.
/// An empty input yields an empty vector.
pub fn suffix_ranks(text: &[u8]) -> Vec<usize> {
    let n = text.len();
    if n == 0 {
        return Vec::new();
    }

    // Shift bytes into 1..=256 and append the 0 sentinel, giving a unique
    // smallest final symbol over a 257-symbol alphabet.
    let mut s: Vec<u32> = Vec::with_capacity(n + 1);
    s.extend(text.iter().map(|&b| u32::from(b) + 1));
    s.push(0);

    let sa = sort_suffixes(&s, 257);
    debug_assert_eq!(sa[0], n);

    // Drop the sentinel suffix (always rank 0) and invert into rank form.
    let mut ranks = vec![0usize; n];
    for (order, &start) in sa.iter().enumerate().skip(1) {
        ranks[start] = order - 1;
    }
    ranks
}

/// SA-IS over an integer string whose last symbol is the unique smallest.
/// Returns the suffix array of `s`.
fn sort_suffixes(s: &[u32], alphabet: usize) -> Vec<usize> {
    let n = s.len();
    if n == 1 {
        return vec![0];
    }
    if n == 2 {
        // The sentinel suffix sorts first.
        return vec![1, 0];
    }

    let stype = classify(s);
    let counts = symbol_counts(s, alphabet);
    let mut sa = vec![EMPTY; n];

    // First pass: seed LMS suffixes in arbitrary order at their bucket
    // tails, then induce. This sorts the LMS substrings.
    {
        let mut tails = bucket_tails(&counts);
        for i in (1..n).rev() {
            if is_lms(&stype, i) {
                let c = s[i] as usize;
                tails[c] -= 1;
                sa[tails[c]] = i;
            }
        }
    }
    induce(s, &mut sa, &counts, &stype);

    // Name the LMS substrings in their induced order; equal substrings
    // share a name.
    let mut names = vec![0u32; n];
    let mut next_name = 0u32;
    let mut previous = None;
    for &start in sa.iter().filter(|&&p| p != EMPTY && is_lms(&stype, p)) {
        if let Some(prev) = previous {
            if !lms_substrings_equal(s, &stype, prev, start) {
                next_name += 1;
            }
        }
        names[start] = next_name;
        previous = Some(start);
    }

    let lms_positions: Vec<usize> = (1..n).filter(|&i| is_lms(&stype, i)).collect();
    let reduced: Vec<u32> = lms_positions.iter().map(|&i| names[i]).collect();
    let reduced_alphabet = next_name as usize + 1;

    // Resolve the LMS order exactly: recurse while names collide, otherwise
    // the names are already a permutation and invert directly.
    let reduced_sa = if reduced_alphabet < reduced.len() {
        sort_suffixes(&reduced, reduced_alphabet)
    } else {
        let mut inverse = vec![0usize; reduced.len()];
        for (i, &name) in reduced.iter().enumerate() {
            inverse[name as usize] = i;
        }
        inverse
    };

    // Second pass: seed LMS suffixes in their exact order and induce the
    // final suffix array.
    sa.fill(EMPTY);
    {
        let mut tails = bucket_tails(&counts);
        for &r in reduced_sa.iter().rev() {
            let pos = lms_positions[r];
            let c = s[pos] as usize;
            tails[c] -= 1;
            sa[tails[c]] = pos;
        }
    }
    induce(s, &mut sa, &counts, &stype);
    sa
}

/// S/L classification. `stype[i]` is true when suffix `i` sorts before
/// suffix `i+1`; the final (sentinel) position is S-type.
fn classify(s: &[u32]) -> Vec<bool> {
    let n = s.len();
    let mut stype = vec![false; n];
    stype[n - 1] = true;
    for i in (0..n - 1).rev() {
        stype[i] = s[i] < s[i + 1] || (s[i] == s[i + 1] && stype[i + 1]);
    }
    stype
}

/// An LMS position is an S-type position with an L-type left neighbour.
#[inline]
fn is_lms(stype: &[bool], i: usize) -> bool {
    i > 0 && stype[i] && !stype[i - 1]
}

fn symbol_counts(s: &[u32], alphabet: usize) -> Vec<usize> {
    let mut counts = vec![0usize; alphabet];
    for &c in s {
        counts[c as usize] += 1;
    }
    counts
}

/// First slot of each symbol's bucket.
fn bucket_heads(counts: &[usize]) -> Vec<usize> {
    let mut heads = Vec::with_capacity(counts.len());
    let mut sum = 0;
    for &c in counts {
        heads.push(sum);
        sum += c;
    }
    heads
}

/// One past the last slot of each symbol's bucket.
fn bucket_tails(counts: &[usize]) -> Vec<usize> {
    let mut tails = Vec::with_capacity(counts.len());
    let mut sum = 0;
    for &c in counts {
        sum += c;
        tails.push(sum);
    }
    tails
}

/// Induce L-type suffixes left to right, then S-type right to left, from
/// whatever LMS seeding `sa` currently holds.
fn induce(s: &[u32], sa: &mut [usize], counts: &[usize], stype: &[bool]) {
    let n = s.len();

    let mut heads = bucket_heads(counts);
    for i in 0..n {
        let j = sa[i];
        if j == EMPTY || j == 0 {
            continue;
        }
        let p = j - 1;
        if !stype[p] {
            let c = s[p] as usize;
            sa[heads[c]] = p;
            heads[c] += 1;
        }
    }

    let mut tails = bucket_tails(counts);
    for i in (0..n).rev() {
        let j = sa[i];
        if j == EMPTY || j == 0 {
            continue;
        }
        let p = j - 1;
        if stype[p] {
            let c = s[p] as usize;
            tails[c] -= 1;
            sa[tails[c]] = p;
        }
    }
}

/// Compare the LMS substrings starting at `a` and `b`: symbols must match
/// until both reach their next LMS boundary together. Running off the end
/// of the string on either side means inequality.
fn lms_substrings_equal(s: &[u32], stype: &[bool], a: usize, b: usize) -> bool {
    let n = s.len();
    let mut k = 0;
    loop {
        if a + k >= n || b + k >= n {
            return false;
        }
        if s[a + k] != s[b + k] {
            return false;
        }
        if k > 0 && is_lms(stype, a + k) && is_lms(stype, b + k) {
            return true;
        }
        k += 1;
    }
}
