// hardpatch-core/src/similarity.rs
//! Levenshtein edit distance and the normalized similarity ratio.
//!
//! The ratio only feeds the diagnostic "similar" marker, so the engine calls
//! into this module exclusively while test mode is enabled.

/// Computes the Levenshtein edit distance between `a` and `b`.
///
/// Insertions, deletions and substitutions all cost 1. Characters are compared
/// for exact equality, so a case difference is a substitution.
pub fn distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    // Keep the shorter string on the row axis so the table is O(min(n, m)).
    let (long, short) = if a_chars.len() >= b_chars.len() {
        (a_chars, b_chars)
    } else {
        (b_chars, a_chars)
    };

    if short.is_empty() {
        return long.len();
    }

    let mut prev: Vec<usize> = (0..=short.len()).collect();
    let mut curr = vec![0usize; short.len() + 1];

    for (i, lc) in long.iter().enumerate() {
        curr[0] = i + 1;
        for (j, sc) in short.iter().enumerate() {
            let cost = usize::from(lc != sc);
            curr[j + 1] = (prev[j + 1] + 1)
                .min(curr[j] + 1)
                .min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[short.len()]
}

/// Returns `1 - distance / max(len(a), len(b))`, a value in `[0, 1]`.
///
/// Two empty strings are identical and score `1.0`.
pub fn similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    1.0 - distance(a, b) as f64 / max_len as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_strings_score_one() {
        for s in ["", "a", "Hello", "§a colored", "日本語"] {
            assert_eq!(similarity(s, s), 1.0, "input {:?}", s);
        }
    }

    #[test]
    fn test_empty_against_non_empty() {
        assert_eq!(distance("", "abc"), 3);
        assert_eq!(distance("abc", ""), 3);
        assert_eq!(similarity("", "abc"), 0.0);
    }

    #[test]
    fn test_single_insertion() {
        assert_eq!(distance("abc", "abcd"), 1);
        assert_eq!(similarity("abc", "abcd"), 0.75);
    }

    #[test]
    fn test_symmetry() {
        let pairs = [("kitten", "sitting"), ("flaw", "lawn"), ("Hello", "hello world"), ("", "x")];
        for (a, b) in pairs {
            assert_eq!(distance(a, b), distance(b, a));
            assert_eq!(similarity(a, b), similarity(b, a));
        }
    }

    #[test]
    fn test_classic_distances() {
        assert_eq!(distance("kitten", "sitting"), 3);
        assert_eq!(distance("flaw", "lawn"), 2);
    }

    #[test]
    fn test_case_difference_costs_one() {
        assert_eq!(distance("Hello", "hello"), 1);
        assert!((similarity("Hello", "hello") - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_counts_chars_not_bytes() {
        assert_eq!(distance("é", "e"), 1);
        assert!((similarity("日本", "日本語") - 2.0 / 3.0).abs() < 1e-9);
    }
}
