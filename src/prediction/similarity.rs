use super::{correlation::pearson, RatingSet};

/// Similarity of two users based on the items both of them rated
///
/// Pairs the scores of every co-rated item (intersection on item id, in
/// ascending item order) and returns their Pearson correlation, bounded to
/// `[-1.0, 1.0]`. Users without a co-rated item have similarity 0.0.
///
/// Swapping the arguments yields the same value bit for bit.
pub fn similarity(a: &RatingSet, b: &RatingSet) -> f64 {
    let pairs = co_rated_pairs(a, b);

    if pairs.is_empty() {
        return 0.0;
    }

    pearson(&pairs).clamp(-1.0, 1.0)
}

/// Paired observations `(a's score, b's score)` for every item both rated
fn co_rated_pairs(a: &RatingSet, b: &RatingSet) -> Vec<(f64, f64)> {
    // Walk the smaller set; both iterate in item order, so the output order
    // only depends on which items are shared.
    if a.len() <= b.len() {
        a.iter()
            .filter_map(|(item_id, score_a)| b.get(item_id).map(|score_b| (score_a, score_b)))
            .collect()
    } else {
        b.iter()
            .filter_map(|(item_id, score_b)| a.get(item_id).map(|score_a| (score_a, score_b)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prediction::{ItemId, UserId};
    use proptest::prelude::*;

    const EPSILON: f64 = 1e-9;

    fn ratings(user_id: UserId, scores: &[(ItemId, f64)]) -> RatingSet {
        RatingSet::from_scores(user_id, scores.iter().copied()).unwrap()
    }

    #[test]
    fn test_same_direction_is_positive() {
        let u1 = ratings(1, &[(1, 5.0), (2, 3.0)]);
        let u2 = ratings(2, &[(1, 4.0), (2, 2.0)]);
        assert!((similarity(&u1, &u2) - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_opposite_direction_is_negative() {
        let u1 = ratings(1, &[(1, 5.0), (2, 3.0)]);
        let u3 = ratings(3, &[(1, 1.0), (2, 5.0)]);
        assert!((similarity(&u1, &u3) + 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_no_overlap_is_zero() {
        let a = ratings(1, &[(1, 5.0), (2, 3.0)]);
        let b = ratings(2, &[(3, 4.0), (4, 1.0)]);
        assert_eq!(similarity(&a, &b), 0.0);
    }

    #[test]
    fn test_empty_set_is_zero() {
        let a = ratings(1, &[(1, 5.0), (2, 3.0)]);
        let b = RatingSet::new(2);
        assert_eq!(similarity(&a, &b), 0.0);
    }

    #[test]
    fn test_only_shared_items_are_paired() {
        // Item 3 would flip the sign if it were paired.
        let a = ratings(1, &[(1, 1.0), (2, 5.0), (3, 5.0)]);
        let b = ratings(2, &[(1, 2.0), (2, 4.0), (4, 1.0)]);
        assert!((similarity(&a, &b) - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_identical_scores_are_zero() {
        let a = ratings(1, &[(1, 5.0), (2, 5.0), (3, 5.0)]);
        let b = ratings(2, &[(1, 1.0), (2, 4.0), (3, 2.0)]);
        assert_eq!(similarity(&a, &b), 0.0);
        assert_eq!(similarity(&b, &a), 0.0);
    }

    #[test]
    fn test_identical_fractional_scores_are_zero() {
        let a = ratings(1, &[(1, 0.1), (2, 0.1), (3, 0.1)]);
        let b = ratings(2, &[(1, 1.0), (2, 2.0), (3, 4.0)]);
        assert_eq!(similarity(&a, &b), 0.0);
        assert_eq!(similarity(&b, &a), 0.0);
    }

    #[test]
    fn test_self_similarity_is_one() {
        let a = ratings(1, &[(1, 2.0), (2, 5.0), (3, 3.0), (4, 1.0)]);
        assert!((similarity(&a, &a) - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_single_shared_item_is_zero() {
        let a = ratings(1, &[(1, 2.0), (2, 5.0)]);
        let b = ratings(2, &[(2, 1.0), (3, 4.0)]);
        assert_eq!(similarity(&a, &b), 0.0);
    }

    fn rating_set(user_id: UserId) -> impl Strategy<Value = RatingSet> {
        prop::collection::btree_map(0_u64..20, 1_u8..=5, 0..12).prop_map(move |scores| {
            RatingSet::from_scores(
                user_id,
                scores.into_iter().map(|(item, score)| (item, f64::from(score))),
            )
            .unwrap()
        })
    }

    proptest! {
        #[test]
        fn prop_similarity_is_symmetric(a in rating_set(1), b in rating_set(2)) {
            prop_assert_eq!(similarity(&a, &b), similarity(&b, &a));
        }

        #[test]
        fn prop_similarity_is_bounded(a in rating_set(1), b in rating_set(2)) {
            let sim = similarity(&a, &b);
            prop_assert!((-1.0..=1.0).contains(&sim));
        }

        #[test]
        fn prop_constant_scores_give_zero(
            a_items in prop::collection::btree_set(0_u64..20, 0..12),
            constant in -1e6_f64..1e6,
            b in rating_set(2),
        ) {
            let a = RatingSet::from_scores(1, a_items.into_iter().map(|item| (item, constant)))
                .unwrap();
            prop_assert_eq!(similarity(&a, &b), 0.0);
        }

        #[test]
        fn prop_large_scores_stay_bounded(
            scores in prop::collection::btree_map(
                0_u64..12,
                (-1e300_f64..1e300, -1e300_f64..1e300),
                0..12,
            ),
        ) {
            let a = RatingSet::from_scores(1, scores.iter().map(|(&item, &(x, _))| (item, x)))
                .unwrap();
            let b = RatingSet::from_scores(2, scores.iter().map(|(&item, &(_, y))| (item, y)))
                .unwrap();
            let sim = similarity(&a, &b);
            prop_assert!(sim.is_finite());
            prop_assert!((-1.0..=1.0).contains(&sim));
        }
    }
}
