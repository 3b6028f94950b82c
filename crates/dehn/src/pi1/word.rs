//! Words in the free group on the band generators `x1 … x(2g)`.
//!
//! A letter is a non-zero `i32`: `k` stands for `x_k`, `-k` for its inverse.
//! Every function returns freely reduced words.

/// Append letters to a freely reduced word, cancelling at the seam.
pub(crate) fn push_reduced(word: &mut Vec<i32>, letters: impl IntoIterator<Item = i32>) {
    for x in letters {
        if word.last() == Some(&-x) {
            word.pop();
        } else {
            word.push(x);
        }
    }
}

pub(crate) fn reduced(letters: impl IntoIterator<Item = i32>) -> Vec<i32> {
    let mut out = Vec::new();
    push_reduced(&mut out, letters);
    out
}

/// Letters of `word⁻¹`, lazily.
pub(crate) fn inverse_letters(word: &[i32]) -> impl Iterator<Item = i32> + '_ {
    word.iter().rev().map(|&x| -x)
}

pub(crate) fn inverse(word: &[i32]) -> Vec<i32> {
    inverse_letters(word).collect()
}

/// `word^k`; negative `k` repeats the inverse.
pub(crate) fn power(word: &[i32], k: i64) -> Vec<i32> {
    let mut out = Vec::new();
    for _ in 0..k.unsigned_abs() {
        if k > 0 {
            push_reduced(&mut out, word.iter().copied());
        } else {
            push_reduced(&mut out, inverse_letters(word));
        }
    }
    out
}

/// Strip conjugating letters: the shortest word in the conjugacy class,
/// up to rotation.
pub(crate) fn cyclically_reduced(word: Vec<i32>) -> Vec<i32> {
    let mut word = reduced(word);
    let (mut lo, mut hi) = (0, word.len());
    while hi - lo >= 2 && word[lo] == -word[hi - 1] {
        lo += 1;
        hi -= 1;
    }
    word.truncate(hi);
    word.drain(..lo);
    word
}

/// Start of the lexicographically least rotation (minimum expression
/// algorithm, linear time).
pub(crate) fn least_rotation(word: &[i32]) -> usize {
    let n = word.len();
    let (mut i, mut j, mut k) = (0, 1, 0);
    while i < n && j < n && k < n {
        let a = word[(i + k) % n];
        let b = word[(j + k) % n];
        if a == b {
            k += 1;
            continue;
        }
        if a > b {
            i += k + 1;
        } else {
            j += k + 1;
        }
        if i == j {
            j += 1;
        }
        k = 0;
    }
    i.min(j)
}

/// Canonical representative of a cyclic word: cyclically reduced, then
/// rotated to its least rotation. Two words are conjugate in the free group
/// iff their canonical forms are equal.
pub(crate) fn canonical(word: Vec<i32>) -> Vec<i32> {
    let mut word = cyclically_reduced(word);
    let start = least_rotation(&word);
    word.rotate_left(start);
    word
}

/// `u == w^k` for some integer `k`, with `w` cyclically reduced and non-empty.
pub(crate) fn power_of(u: &[i32], w: &[i32]) -> Option<i64> {
    if u.is_empty() {
        return Some(0);
    }
    if w.is_empty() || u.len() % w.len() != 0 {
        return None;
    }
    let k = u.len() / w.len();
    if u.chunks_exact(w.len()).all(|chunk| chunk == w) {
        return Some(k as i64);
    }
    let inv = inverse(w);
    if u.chunks_exact(w.len()).all(|chunk| chunk == inv.as_slice()) {
        return Some(-(k as i64));
    }
    None
}

/// Exponent sums per generator, i.e. the image in `H1 = Z^rank`.
pub(crate) fn abelianized(word: &[i32], rank: usize) -> Vec<i64> {
    let mut v = vec![0i64; rank];
    for &x in word {
        let slot = x.unsigned_abs() as usize - 1;
        if slot < rank {
            v[slot] += i64::from(x.signum());
        }
    }
    v
}
