//! Enumerate the mismatch neighborhood of a sequence.
//!
//! Index-building consumers pre-compute every string an adapter prefix can
//! look like under the allowed number of substitutions, then match reads by
//! exact lookup. Only substitutions over the plain `{A, C, G, T}` alphabet
//! are considered here.

const BASES: &[u8; 4] = b"ACGT";

/// All strings over `ACGT` at Hamming distance exactly `k` from `s`.
///
/// Strings are generated by the position of the first difference, so each
/// neighbor appears exactly once. Returns just `s` for `k == 0` and
/// nothing when `k` exceeds the length of `s`.
pub fn hamming_sphere(s: &str, k: usize) -> Vec<String> {
    if k == 0 {
        return vec![s.to_string()];
    }
    let n = s.len();
    let mut result = Vec::new();
    if k > n {
        return result;
    }
    let bytes = s.as_bytes();
    // i is the first position at which the strings differ
    for i in 0..=n - k {
        for &base in BASES {
            if base == bytes[i] {
                continue;
            }
            for suffix in hamming_sphere(&s[i + 1..], k - 1) {
                let mut t = String::with_capacity(n);
                t.push_str(&s[..i]);
                t.push(base as char);
                t.push_str(&suffix);
                result.push(t);
            }
        }
    }
    result
}

/// All strings within Hamming distance `k` of `s`, as `(t, e, m)` tuples
/// where `e` is the distance and `m = |s| - e` the number of matches.
///
/// # Examples
/// ```
/// use semialign::environment::hamming_environment;
///
/// let neighbors = hamming_environment("ACG", 1);
/// assert_eq!(neighbors.len(), 1 + 3 * 3);
/// assert_eq!(neighbors[0], ("ACG".to_string(), 0, 3));
/// assert!(neighbors.contains(&("TCG".to_string(), 1, 2)));
/// ```
pub fn hamming_environment(s: &str, k: usize) -> Vec<(String, usize, usize)> {
    let n = s.len();
    let mut result = Vec::new();
    for e in 0..=k {
        for t in hamming_sphere(s, e) {
            result.push((t, e, n - e));
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn sphere_sizes() {
        // 3 substitutions per position
        assert_eq!(hamming_sphere("A", 0), vec!["A".to_string()]);
        assert_eq!(hamming_sphere("ACGT", 1).len(), 4 * 3);
        assert_eq!(hamming_sphere("ACGT", 2).len(), 6 * 9);
        assert_eq!(hamming_sphere("AC", 3).len(), 0);
    }

    #[test]
    fn sphere_has_no_duplicates() {
        let mut sphere = hamming_sphere("ACGT", 2);
        let total = sphere.len();
        sphere.sort();
        sphere.dedup();
        assert_eq!(sphere.len(), total);
    }

    #[test]
    fn environment_counts_matches() {
        let neighbors = hamming_environment("AAAA", 2);
        assert_eq!(neighbors.len(), 1 + 4 * 3 + 6 * 9);
        for (t, e, m) in &neighbors {
            let distance = t.bytes().zip("AAAA".bytes()).filter(|(a, b)| a != b).count();
            assert_eq!(distance, *e);
            assert_eq!(*m, 4 - e);
        }
    }
}
