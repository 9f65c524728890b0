//! Component tests for `BoundedTopK`
//!
//! These tests pin down admission, tie handling, eviction and the zero sentinels of
//! the aggregate queries.

#[cfg(test)]
mod tests {
    use crate::BoundedTopK;
    use rand::{Rng, SeedableRng};

    fn filled(k: usize, values: &[i64]) -> BoundedTopK<i64> {
        let mut top = BoundedTopK::new(k);
        top.extend(values.iter().copied());
        top
    }

    /// Sort-based reference: the `k` largest values, ascending.
    fn k_largest(values: &[i64], k: usize) -> Vec<i64> {
        let mut sorted = values.to_vec();
        sorted.sort_unstable();
        sorted.split_off(sorted.len().saturating_sub(k))
    }

    // ============================================================================
    // INSERTION TESTS
    // ============================================================================

    #[test]
    fn test_new_is_empty() {
        let top: BoundedTopK<i64> = BoundedTopK::new(4);
        assert_eq!(top.capacity(), 4);
        assert_eq!(top.len(), 0);
        assert!(top.is_empty());
        assert!(!top.is_full());
        assert_eq!(top.threshold(), None);
    }

    #[test]
    fn test_insert_below_capacity_always_admits() {
        let mut top = BoundedTopK::new(3);
        assert!(top.insert(5));
        assert!(top.insert(-2));
        assert!(top.insert(5));
        assert_eq!(top.to_vec(), vec![-2, 5, 5]);
        assert!(top.is_full());
    }

    #[test]
    fn test_insert_rejects_value_below_minimum() {
        let mut top = filled(2, &[3, 7]);
        let before = top.clone();
        assert!(!top.insert(2), "2 is below the minimum 3");
        assert_eq!(top, before, "rejection must not change state");
    }

    #[test]
    fn test_insert_rejects_tie_with_minimum() {
        let mut top = filled(2, &[3, 7]);
        assert!(!top.insert(3), "a tie must not displace the minimum");
        assert_eq!(top.to_vec(), vec![3, 7]);
    }

    #[test]
    fn test_insert_evicts_minimum() {
        let mut top = filled(2, &[3, 7]);
        assert_eq!(top.sum_top_two(), 10);
        assert!(top.insert(9));
        assert_eq!(top.to_vec(), vec![7, 9]);
        assert_eq!(top.sum_top_two(), 16);
    }

    #[test]
    fn test_insert_evicts_single_duplicate_minimum() {
        let mut top = filled(3, &[2, 2, 8]);
        assert!(top.insert(5));
        assert_eq!(top.to_vec(), vec![2, 5, 8], "only one of the equal minimums goes");
        assert_eq!(top.threshold(), Some(2));
    }

    #[test]
    fn test_zero_capacity_rejects_everything() {
        let mut top: BoundedTopK<i64> = BoundedTopK::new(0);
        assert!(!top.insert(100));
        assert!(top.is_empty());
        assert!(top.is_full());
        assert_eq!(top.sum(), 0);
        assert_eq!(top.kopt_sum(), 0);
    }

    #[test]
    fn test_clear_keeps_capacity() {
        let mut top = filled(2, &[1, 2]);
        top.clear();
        assert!(top.is_empty());
        assert_eq!(top.capacity(), 2);
        assert!(top.insert(1));
    }

    // ============================================================================
    // AGGREGATE TESTS
    // ============================================================================

    #[test]
    fn test_sum() {
        assert_eq!(filled(4, &[]).sum(), 0);
        assert_eq!(filled(4, &[1, 2, 3]).sum(), 6);
        assert_eq!(filled(2, &[1, 2, 3]).sum(), 5);
    }

    #[test]
    fn test_sum_top_two_sentinel() {
        assert_eq!(filled(3, &[]).sum_top_two(), 0);
        assert_eq!(filled(3, &[7]).sum_top_two(), 0);
        assert_eq!(filled(3, &[3, 7]).sum_top_two(), 10);
    }

    #[test]
    fn test_sum_top_two_with_duplicate_maximum() {
        assert_eq!(filled(4, &[1, 9, 9]).sum_top_two(), 18);
        assert_eq!(filled(4, &[1, 4, 9]).sum_top_two(), 13);
    }

    #[test]
    fn test_min() {
        assert_eq!(filled(3, &[]).min(), 0);
        assert_eq!(filled(3, &[8, 4, 6]).min(), 4);
        assert_eq!(filled(3, &[-5, 4]).min(), -5);
    }

    #[test]
    fn test_kopt_sum_folds_two_smallest() {
        // (4 + 6 + 1) / 2 = 5, plus 10
        assert_eq!(filled(3, &[10, 4, 6]).kopt_sum(), 15);
        // (4 + 5 + 1) / 2 = 5, plus 10
        assert_eq!(filled(3, &[4, 5, 10]).kopt_sum(), 15);
        // (3 + 3 + 1) / 2 = 3, plus 3 + 3
        assert_eq!(filled(4, &[3, 3, 3, 3]).kopt_sum(), 9);
    }

    #[test]
    fn test_kopt_sum_for_pair_only() {
        assert_eq!(filled(2, &[5, 8]).kopt_sum(), 7);
    }

    #[test]
    fn test_kopt_sum_under_capacity_is_zero() {
        assert_eq!(filled(3, &[4, 6]).kopt_sum(), 0);
    }

    #[test]
    fn test_kopt_sum_single_capacity_is_zero() {
        let top = filled(1, &[42]);
        assert!(top.is_full());
        assert_eq!(top.kopt_sum(), 0);
    }

    #[test]
    fn test_kopt_sum_truncates_toward_zero() {
        // (-4 + -3 + 1) / 2 = -3
        assert_eq!(filled(2, &[-4, -3]).kopt_sum(), -3);
        // (-4 + -1 + 1) / 2 = -2
        assert_eq!(filled(2, &[-4, -1]).kopt_sum(), -2);
    }

    #[test]
    fn test_other_value_types() {
        let mut top: BoundedTopK<u32> = BoundedTopK::new(3);
        top.extend([1_u32, 2, 3, 4]);
        assert_eq!(top.kopt_sum(), 7, "(2 + 3 + 1) / 2 + 4");

        let mut top: BoundedTopK<u8> = BoundedTopK::new(2);
        top.extend([10_u8, 20]);
        assert_eq!(top.sum_top_two(), 30);
    }

    #[test]
    fn test_aggregates_saturate_small_types() {
        let mut top: BoundedTopK<u8> = BoundedTopK::new(2);
        top.extend([200_u8, 100]);
        assert_eq!(top.sum(), u8::MAX);
        assert_eq!(top.sum_top_two(), u8::MAX);
        // (100 + 200 + 1) / 2 still fits
        assert_eq!(top.kopt_sum(), 150);

        let mut top: BoundedTopK<i8> = BoundedTopK::new(3);
        top.extend([-100_i8, -120, -128]);
        assert_eq!(top.sum(), i8::MIN);
        assert_eq!(top.sum_top_two(), i8::MIN);
    }

    #[test]
    fn test_kopt_sum_near_max_is_exact() {
        let top = filled(2, &[i64::MAX - 1, i64::MAX]);
        assert_eq!(top.kopt_sum(), i64::MAX, "(2 * MAX - 1 + 1) / 2");
        assert_eq!(top.sum_top_two(), i64::MAX);

        let top = filled(3, &[i64::MAX - 2, i64::MAX - 1, i64::MAX]);
        assert_eq!(top.kopt_sum(), i64::MAX, "folded pair plus MAX clamps");

        let top = filled(2, &[i64::MIN, i64::MIN]);
        assert_eq!(top.kopt_sum(), i64::MIN + 1);
    }

    #[test]
    fn test_wide_types_saturate() {
        let mut top: BoundedTopK<u128> = BoundedTopK::new(2);
        top.extend([u128::MAX, u128::MAX]);
        assert_eq!(top.sum(), u128::MAX);
        assert_eq!(top.kopt_sum(), u128::MAX / 2);
    }

    // ============================================================================
    // RANDOMIZED TESTS
    // ============================================================================

    #[test]
    fn test_random_streams_keep_k_largest() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(95756739);
        for k in 0..12 {
            let values: Vec<i64> = (0..200).map(|_| rng.random_range(-50..50)).collect();
            let mut top = BoundedTopK::new(k);
            for &value in &values {
                let at_capacity = top.is_full();
                let min = top.to_vec().first().copied();
                let admitted = top.insert(value);
                let expected_reject = at_capacity && min.is_none_or(|m| value <= m);
                assert_eq!(!admitted, expected_reject, "k={k} value={value}");
                assert!(top.len() <= k, "retained count exceeds k={k}");
            }
            assert_eq!(top.to_vec(), k_largest(&values, k), "k={k}");
        }
    }

    #[test]
    fn test_random_aggregates_match_reference() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);
        let values: Vec<i64> = (0..1000).map(|_| rng.random_range(0..10_000)).collect();
        let top = filled(8, &values);
        let expected = k_largest(&values, 8);

        assert_eq!(top.sum(), expected.iter().sum::<i64>());
        assert_eq!(top.min(), expected[0]);
        assert_eq!(top.sum_top_two(), expected[6] + expected[7]);
        let folded = (expected[0] + expected[1] + 1) / 2;
        assert_eq!(top.kopt_sum(), folded + expected[2..].iter().sum::<i64>());
    }
}
