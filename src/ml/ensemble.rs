// ============================================================
// Layer 5 - Ensemble Voter
// ============================================================
// Combines the n-best lists that several independently trained
// models produced for the same row.
//
//   model A:  { "a": -1.0, "b": -3.0 }
//   model B:  { "a": -2.0, "c": -0.1 }
//
//   sums:     a = -3.0, b = -3.0, c = -0.1   ->  winner "c"
//
// A candidate missing from a model's list contributes 0 for that
// model, not a penalty. Because scores are log-likelihoods
// (negative), a candidate proposed by fewer models can win.
//
// Ties: the candidate seen first wins. "First" means the sets
// in the order given, and each set in its own insertion order
// (which for parsed logs is rank order).

use crate::ml::hypothesis::HypothesisSet;

/// Summed score per candidate, in first-seen order
pub fn summed_scores(sets: &[HypothesisSet]) -> Vec<(String, f64)> {
    let mut sums: Vec<(String, f64)> = Vec::new();

    for set in sets {
        for (candidate, score) in set.iter() {
            match sums.iter_mut().find(|(c, _)| c == candidate) {
                Some(entry) => entry.1 += score,
                None        => sums.push((candidate.to_string(), score)),
            }
        }
    }

    sums
}

/// Candidate with the strictly greatest summed score, as it
/// appears in the log (character tokens still space-separated).
/// None when no set has any candidate.
pub fn best_candidate(sets: &[HypothesisSet]) -> Option<(String, f64)> {
    let mut best: Option<(String, f64)> = None;

    for (candidate, sum) in summed_scores(sets) {
        let better = match &best {
            Some((_, best_sum)) => sum > *best_sum,
            None                => true,
        };
        if better {
            best = Some((candidate, sum));
        }
    }

    best
}

/// Vote and rejoin the winning character tokens into one token:
/// "[ S T E M ] - P L" -> "[STEM]-PL"
pub fn vote(sets: &[HypothesisSet]) -> Option<String> {
    best_candidate(sets).map(|(candidate, _)| candidate.replace(' ', ""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashMap;

    fn set(pairs: &[(&str, f64)]) -> HypothesisSet {
        pairs.iter().map(|(c, s)| (*c, *s)).collect()
    }

    #[test]
    fn test_tie_goes_to_first_seen() {
        let sets = vec![set(&[("a", -1.0), ("b", -3.0)]), set(&[("a", -2.0)])];
        let (winner, sum) = best_candidate(&sets).unwrap();
        assert_eq!(winner, "a");
        assert_eq!(sum, -3.0);
    }

    #[test]
    fn test_sum_not_count_decides() {
        let sets = vec![set(&[("a", -1.0)]), set(&[("a", -0.5), ("c", -0.1)])];
        let (winner, sum) = best_candidate(&sets).unwrap();
        assert_eq!(winner, "c");
        assert!((sum - -0.1).abs() < 1e-12);
    }

    #[test]
    fn test_very_low_scores_still_produce_a_winner() {
        let sets = vec![set(&[("x", -250.0)])];
        assert_eq!(vote(&sets).as_deref(), Some("x"));
    }

    #[test]
    fn test_vote_strips_spaces() {
        let sets = vec![set(&[("[ S T E M ] - P L", -0.2)])];
        assert_eq!(vote(&sets).as_deref(), Some("[STEM]-PL"));
    }

    #[test]
    fn test_no_candidates() {
        assert!(vote(&[]).is_none());
        assert!(vote(&[HypothesisSet::new(), HypothesisSet::new()]).is_none());
    }

    fn arb_set() -> impl Strategy<Value = HypothesisSet> {
        prop::collection::vec(("[a-d]", -10i32..0), 0..4)
            .prop_map(|pairs| pairs.into_iter().map(|(c, s)| (c, f64::from(s))).collect())
    }

    proptest! {
        #[test]
        fn prop_sums_do_not_depend_on_set_order(sets in prop::collection::vec(arb_set(), 1..5)) {
            let forward: HashMap<String, f64> = summed_scores(&sets).into_iter().collect();

            let mut reversed = sets.clone();
            reversed.reverse();
            let backward: HashMap<String, f64> = summed_scores(&reversed).into_iter().collect();

            // Integer-valued scores sum exactly in either order
            prop_assert_eq!(forward, backward);
        }
    }
}
