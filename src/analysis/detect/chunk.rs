//! Chunked scan: per-chunk conventional rates over fixed-width history slices.

/// Partitions the chronological signal into `chunk_count` equal chunks
/// (chunk `i` covers `[i*w, (i+1)*w)`, the last chunk absorbing the
/// remainder), then walks chunks newest-to-oldest while their conventional
/// rate stays at or above `min_rate`. The boundary is the start of the
/// earliest chunk in that trailing run.
///
/// Histories shorter than one commit per chunk report no boundary; the
/// chunks would be too small to carry a meaningful rate.
pub fn chunked_scan_index(signal: &[u8], chunk_count: usize, min_rate: f64) -> Option<usize> {
    let n = signal.len();
    if n == 0 || chunk_count == 0 {
        return None;
    }

    let width = n / chunk_count;
    if width == 0 {
        return None;
    }

    // (start index, conventional rate) per chunk.
    let mut chunks = Vec::with_capacity(chunk_count);
    for i in 0..chunk_count {
        let start = i * width;
        let end = if i == chunk_count - 1 { n } else { start + width };
        let conventional: u64 = signal[start..end].iter().map(|&s| u64::from(s)).sum();
        let rate = conventional as f64 / (end - start) as f64;
        chunks.push((start, rate));
    }

    let mut boundary = None;
    for &(start, rate) in chunks.iter().rev() {
        if rate >= min_rate {
            boundary = Some(start);
        } else {
            break;
        }
    }

    boundary
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
    fn boundary_sits_at_the_first_compliant_chunk() {
        // 100 commits, 20 chunks of 5: chunks 8..20 are all ones.
        assert_eq!(chunked_scan_index(&signal(40, 60), 20, 0.8), Some(40));
    }

    #[test]
    fn all_conventional_history_starts_at_zero() {
        assert_eq!(chunked_scan_index(&signal(0, 100), 20, 0.8), Some(0));
    }

    #[test]
    fn never_conventional_history_has_no_boundary() {
        assert_eq!(chunked_scan_index(&signal(100, 0), 20, 0.8), None);
    }

    #[test]
    fn low_rate_tail_has_no_boundary() {
        // Alternating tail has rate 0.5, below the 0.8 threshold.
        let mut s = vec![0u8; 50];
        for i in 0..50 {
            s.push((i % 2) as u8);
        }
        assert_eq!(chunked_scan_index(&s, 20, 0.8), None);
    }

    #[test]
    fn short_history_has_no_boundary() {
        assert_eq!(chunked_scan_index(&signal(3, 5), 20, 0.8), None);
    }

    #[test]
    fn remainder_commits_land_in_the_last_chunk() {
        // 103 commits: width 5, last chunk covers [95, 103).
        let s = signal(40, 63);
        assert_eq!(chunked_scan_index(&s, 20, 0.8), Some(40));
    }
}
