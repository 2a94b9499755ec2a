//! Property tests for iteration grouping and the keep rule.

use iteration_sampler::*;
use proptest::prelude::*;

proptest! {
    #[test]
    fn groups_are_monotonic(population_size in 1usize..50, num_rows in 0usize..2000) {
        let groups: Vec<usize> = (0..num_rows)
            .map(|i| iteration_group(i, population_size))
            .collect();
        prop_assert!(groups.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn retained_count_matches_formula(
        population_size in 1usize..50,
        num_rows in 0usize..2000,
        stride in 1usize..20,
    ) {
        let plan = SamplingPlan::new(population_size, stride).unwrap();
        let kept = plan.retained_indices(num_rows);

        // Count rows in stride multiples plus rows in the last group, once each
        let expected = match plan.max_group(num_rows) {
            None => 0,
            Some(last) => (0..num_rows)
                .filter(|&i| {
                    let group = iteration_group(i, population_size);
                    group % stride == 0 || group == last
                })
                .count(),
        };

        prop_assert_eq!(kept.len(), expected);
        prop_assert_eq!(plan.retained_count(num_rows), expected);
    }

    #[test]
    fn first_and_last_groups_always_survive(population_size in 1usize..50, num_rows in 1usize..2000) {
        let plan = SamplingPlan::new(population_size, 10).unwrap();
        let kept = plan.retained_indices(num_rows);

        prop_assert_eq!(kept[0], 0);
        prop_assert_eq!(*kept.last().unwrap(), num_rows - 1);
        prop_assert!(kept.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn kept_groups_are_whole(population_size in 1usize..20, num_rows in 1usize..500) {
        let plan = SamplingPlan::new(population_size, 10).unwrap();
        let kept = plan.retained_indices(num_rows);
        let last = plan.max_group(num_rows).unwrap();

        for group in 0..=last {
            let start = group * population_size;
            let end = ((group + 1) * population_size).min(num_rows);
            let in_group = kept.iter().filter(|&&i| i >= start && i < end).count();
            prop_assert!(in_group == 0 || in_group == end - start);
        }
    }
}
