//! Single-breakpoint binary segmentation over a binary signal.
//!
//! Finds the split minimizing the total sum of squared errors of the two
//! segments, the L2 cost model of classic change-point detection. For a
//! binary signal the segment cost reduces to `s - s²/len` where `s` is the
//! segment sum, so a single prefix-sum array gives an O(n) search.

/// Minimum length of each segment on either side of the breakpoint.
const MIN_SEGMENT_LEN: usize = 2;

/// Returns the index starting the "after" segment of the best split, or
/// `None` when no split strictly improves on leaving the signal whole
/// (constant or too-short signals).
///
/// Ties go to the earliest index; the caller's stability check is the
/// binding constraint, not the exact breakpoint location.
pub fn single_change_point(signal: &[u8]) -> Option<usize> {
    let n = signal.len();
    if n < 2 * MIN_SEGMENT_LEN {
        return None;
    }

    // prefix[i] = sum of signal[..i]
    let mut prefix = vec![0u64; n + 1];
    for (i, &value) in signal.iter().enumerate() {
        prefix[i + 1] = prefix[i] + u64::from(value);
    }

    // For 0/1 values the sum of squares equals the sum, so the L2 cost of
    // [a, b) is sum - sum² / (b - a).
    let cost = |a: usize, b: usize| -> f64 {
        let sum = (prefix[b] - prefix[a]) as f64;
        sum - sum * sum / (b - a) as f64
    };

    let unsplit_cost = cost(0, n);

    let mut best: Option<(usize, f64)> = None;
    for k in MIN_SEGMENT_LEN..=(n - MIN_SEGMENT_LEN) {
        let split_cost = cost(0, k) + cost(k, n);
        if best.map_or(true, |(_, c)| split_cost < c) {
            best = Some((k, split_cost));
        }
    }

    match best {
        Some((k, split_cost)) if split_cost + 1e-12 < unsplit_cost => Some(k),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signal(zeros: usize, ones: usize) -> Vec<u8> {
        let mut s = vec![0; zeros];
        s.extend(std::iter::repeat(1).take(ones));
        s
    }

    #[test]
    fn clean_regime_switch_is_found_exactly() {
        assert_eq!(single_change_point(&signal(40, 60)), Some(40));
        assert_eq!(single_change_point(&signal(70, 30)), Some(70));
    }

    #[test]
    fn constant_signals_have_no_breakpoint() {
        assert_eq!(single_change_point(&signal(100, 0)), None);
        assert_eq!(single_change_point(&signal(0, 100)), None);
    }

    #[test]
    fn short_signals_have_no_breakpoint() {
        assert_eq!(single_change_point(&[]), None);
        assert_eq!(single_change_point(&[0, 1]), None);
        assert_eq!(single_change_point(&[0, 1, 1]), None);
    }

    #[test]
    fn noisy_switch_lands_near_the_boundary() {
        // Mostly zeros with a little noise, then mostly ones.
        let mut s = vec![0u8; 50];
        s[10] = 1;
        s[30] = 1;
        let mut tail = vec![1u8; 50];
        tail[5] = 0;
        tail[20] = 0;
        s.extend(tail);

        let k = single_change_point(&s).expect("breakpoint expected");
        assert!((45..=55).contains(&k), "breakpoint {k} too far from 50");
    }

    #[test]
    fn minimum_segment_length_is_respected() {
        // A lone 1 at the end cannot form its own segment of length >= 2,
        // and splitting elsewhere separates nothing.
        let mut s = vec![0u8; 10];
        s.push(1);
        let k = single_change_point(&s);
        assert!(k.map_or(true, |k| k <= s.len() - 2));
    }
}
