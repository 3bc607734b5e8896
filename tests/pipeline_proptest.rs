//! Property-based tests for the matching pipeline.
//!
//! - Normalization is idempotent
//! - Alignment and similarity behave sensibly on identical and swapped inputs
//! - Hard resolution never shares an entry
//! - Classification is monotonic in the score
//! - Merge priority is honoured

use castgender::similarity::longest_common_substring;
use castgender::{
    classify, merge, normalize, AlignStrategy, CandidateMap, CastEntry, CastId, ClassifyMode,
    GenderLabel, Prediction, Resolution, Resolver, RootName, Roster,
};
use proptest::prelude::*;

fn roster_of(n: usize) -> Roster {
    (0..n)
        .map(|i| CastEntry::new(format!("Entry {}", i), "Someone", None))
        .collect()
}

fn candidate_map(lists: &[Vec<usize>]) -> CandidateMap {
    let mut map = CandidateMap::new();
    for (i, list) in lists.iter().enumerate() {
        let name = RootName::normalize(&format!("name {}", i));
        for &id in list {
            map.push(&name, CastId(id));
        }
    }
    map
}

fn rank(label: GenderLabel) -> u8 {
    match label {
        GenderLabel::Male => 0,
        GenderLabel::Unknown | GenderLabel::Both => 1,
        GenderLabel::Female => 2,
    }
}

fn label_strategy() -> impl Strategy<Value = GenderLabel> {
    prop_oneof![
        Just(GenderLabel::Male),
        Just(GenderLabel::Female),
        Just(GenderLabel::Both),
        Just(GenderLabel::Unknown),
    ]
}

fn prediction_strategy() -> impl Strategy<Value = Prediction> {
    prop::collection::btree_map("[a-e]{1,3}", label_strategy(), 0..8).prop_map(|map| {
        map.into_iter()
            .map(|(name, label)| (RootName::normalize(&name), label))
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Normalizing an already normalized name changes nothing.
    #[test]
    fn normalize_idempotent(raw in "[A-Za-z .:()'/]{0,30}") {
        let once = normalize(&raw);
        let twice = normalize(&once);
        prop_assert_eq!(&once, &twice, "not idempotent for {:?}", raw);
        let root = RootName::normalize(&once);
        prop_assert_eq!(root.as_str(), once.as_str());
    }

    /// Every name is included in itself, whatever its case.
    #[test]
    fn inclusion_reflexive(name in "[a-zA-Z ]{0,20}") {
        prop_assert!(AlignStrategy::Inclusion.aligns(&name, &name));
        prop_assert!(AlignStrategy::Inclusion.aligns(&name.to_uppercase(), &name));
    }

    /// Longest common substring is symmetric and bounded by the shorter input.
    #[test]
    fn lcs_symmetric_and_bounded(a in "[a-z ]{0,20}", b in "[a-z ]{0,20}") {
        let ab = longest_common_substring(&a, &b);
        prop_assert_eq!(ab, longest_common_substring(&b, &a));
        prop_assert!(ab <= a.chars().count().min(b.chars().count()));
        prop_assert_eq!(longest_common_substring(&a, &a), a.chars().count());
    }

    /// A hard resolution assigns every name one of its own candidates, and
    /// no entry twice.
    #[test]
    fn hard_resolution_is_injective(
        lists in prop::collection::vec(prop::collection::vec(0usize..5, 0..4), 1..6)
    ) {
        let roster = roster_of(5);
        let candidates = candidate_map(&lists);
        let expected = candidates.clone();

        match Resolver::hard().resolve(candidates, &roster) {
            Resolution::Resolved(assignment) => {
                prop_assert!(assignment.is_injective());
                prop_assert_eq!(assignment.len(), expected.len());
                for (name, id) in assignment.iter() {
                    let options = expected.get(name.as_str()).unwrap_or(&[]);
                    prop_assert!(options.contains(&id));
                }
            }
            Resolution::Infeasible => {
                // Distinct single candidates always fit.
                let mut singles: Vec<CastId> = expected
                    .iter()
                    .filter(|(_, c)| c.len() == 1)
                    .map(|(_, c)| c[0])
                    .collect();
                let before = singles.len();
                singles.sort();
                singles.dedup();
                prop_assert!(before != expected.len() || singles.len() != before);
            }
            Resolution::BudgetExhausted => prop_assert!(false, "no budget was set"),
        }
    }

    /// The soft policy resolves whenever every name has a candidate.
    #[test]
    fn soft_resolution_always_completes(
        lists in prop::collection::vec(prop::collection::vec(0usize..5, 1..4), 1..6)
    ) {
        let roster = roster_of(5);
        let candidates = candidate_map(&lists);
        let names = candidates.len();
        let resolution = Resolver::soft().resolve(candidates, &roster);
        let assignment = resolution.into_assignment();
        prop_assert!(assignment.is_some());
        prop_assert_eq!(assignment.map(|a| a.len()), Some(names));
    }

    /// A higher female fraction never gives a more male label.
    #[test]
    fn classify_monotonic(a in 0.0f64..=1.0, b in 0.0f64..=1.0, soft in any::<bool>()) {
        let mode = if soft { ClassifyMode::Soft } else { ClassifyMode::Hard };
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(rank(classify(lo, mode)) <= rank(classify(hi, mode)));
    }

    /// The trumping side's confident labels always survive a merge.
    #[test]
    fn merge_priority(a in prediction_strategy(), b in prediction_strategy()) {
        for (a_trumps, winner) in [(true, &a), (false, &b)] {
            let merged = merge(&a, &b, a_trumps);
            for (name, label) in winner.iter().filter(|(_, l)| l.is_confident()) {
                prop_assert_eq!(merged.get(name), Some(label));
            }
            prop_assert!(merged.values().all(|l| l.is_confident()));
        }
    }
}
