//! Pre-filter deciding whether adoption-point search is worth running.

use tracing::debug;

use crate::analysis::config::Tunables;

/// Decides whether a repository has enough standard-CC signal to justify the
/// change-point search.
///
/// True iff the repository has commits at all and either its standard-CC
/// rate reaches `gate_min_rate` or the absolute standard-CC count reaches
/// `gate_min_commits`. The OR combinator means large repositories with a
/// long pre-adoption tail (low rate, high count) still get evaluated.
pub fn should_evaluate(total_commits: u64, cc_type_commits: u64, tunables: &Tunables) -> bool {
    if total_commits == 0 {
        return false;
    }

    let cc_rate = cc_type_commits as f64 / total_commits as f64;
    let evaluate = cc_rate >= tunables.gate_min_rate || cc_type_commits >= tunables.gate_min_commits;

    debug!(
        total_commits,
        cc_type_commits, cc_rate, evaluate, "Adoption gate decision"
    );

    evaluate
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strong_signal_is_gated_in() {
        assert!(should_evaluate(1000, 600, &Tunables::default()));
    }

    #[test]
    fn negligible_signal_is_gated_out() {
        assert!(!should_evaluate(1000, 5, &Tunables::default()));
    }

    #[test]
    fn empty_history_is_gated_out() {
        assert!(!should_evaluate(0, 0, &Tunables::default()));
    }

    #[test]
    fn absolute_count_alone_is_enough() {
        // 500 of 100000 is only 0.5%, but the absolute count qualifies.
        assert!(should_evaluate(100_000, 500, &Tunables::default()));
    }

    #[test]
    fn rate_alone_is_enough() {
        // 12 of 100 is 12%, above the 10% rate threshold.
        assert!(should_evaluate(100, 12, &Tunables::default()));
    }

    #[test]
    fn boundary_rate_is_inclusive() {
        assert!(should_evaluate(100, 10, &Tunables::default()));
        assert!(!should_evaluate(100, 9, &Tunables::default()));
    }
}
