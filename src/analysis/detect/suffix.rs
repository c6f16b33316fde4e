//! Suffix-threshold scan: earliest suffix that is convincingly conventional.

/// Scans candidate split indices oldest-first and returns the first index
/// whose suffix reaches both the minimum conventional fraction and the
/// minimum absolute conventional count.
///
/// Suffixes shorter than `ceil(min_commits / min_rate)` cannot satisfy both
/// criteria, so the scan stops there. The returned boundary is snapped
/// forward to the first conventional commit at or after the qualifying
/// index, since adoption can only begin at a conventional commit.
pub fn suffix_threshold_index(signal: &[u8], min_rate: f64, min_commits: u64) -> Option<usize> {
    let total = signal.len();
    if total == 0 || min_rate <= 0.0 {
        return None;
    }

    // suffix_sum[i] = conventional commits in signal[i..]
    let mut suffix_sum = vec![0u64; total + 1];
    for i in (0..total).rev() {
        suffix_sum[i] = suffix_sum[i + 1] + u64::from(signal[i]);
    }

    let min_remaining = (min_commits as f64 / min_rate).ceil() as usize;

    for i in 0..total {
        let remaining = total - i;
        if remaining < min_remaining {
            break;
        }

        let conventional = suffix_sum[i];
        let fraction = conventional as f64 / remaining as f64;

        if fraction >= min_rate && conventional >= min_commits {
            return signal[i..].iter().position(|&s| s == 1).map(|off| i + off);
        }
    }

    None
}
