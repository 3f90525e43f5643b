//! Property tests for question generation

use math_adventure::quiz::{generate_question, generate_question_set};
use math_adventure::Difficulty;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

fn difficulty() -> impl Strategy<Value = Difficulty> {
    prop_oneof![Just(Difficulty::Normal), Just(Difficulty::Hard)]
}

proptest! {
    #[test]
    fn question_is_well_formed(seed in any::<u64>(), min in 1u32..=20, span in 0u32..=10, diff in difficulty()) {
        let max = min + span;
        let mut rng = Pcg32::seed_from_u64(seed);
        let q = generate_question(&mut rng, min, max, diff).unwrap();

        prop_assert_eq!(q.correct_answer, q.factor_a * q.factor_b);
        prop_assert!((min..=max).contains(&q.factor_a));
        prop_assert!((1..=12).contains(&q.factor_b));
        prop_assert_eq!(q.options.iter().filter(|&&o| o == q.correct_answer).count(), 1);
        prop_assert!(q.options.iter().all(|&o| o > 0));

        let mut sorted = q.options;
        sorted.sort_unstable();
        prop_assert!(sorted.windows(2).all(|w| w[0] != w[1]));
    }

    #[test]
    fn set_has_requested_length(seed in any::<u64>(), count in 0usize..=30) {
        let mut rng = Pcg32::seed_from_u64(seed);
        let set = generate_question_set(&mut rng, count, 2, 12, Difficulty::Normal).unwrap();
        prop_assert_eq!(set.len(), count);
    }

    #[test]
    fn correct_answer_found_by_value(seed in any::<u64>()) {
        let mut rng = Pcg32::seed_from_u64(seed);
        let q = generate_question(&mut rng, 6, 8, Difficulty::Normal).unwrap();
        let idx = q.correct_index().unwrap();
        prop_assert!(q.is_correct(q.options[idx]));
        prop_assert_eq!(q.options.iter().filter(|&&o| q.is_correct(o)).count(), 1);
    }

    #[test]
    fn inverted_range_rejected(seed in any::<u64>(), min in 2u32..=50, gap in 1u32..=10) {
        let mut rng = Pcg32::seed_from_u64(seed);
        prop_assume!(gap < min);
        prop_assert!(generate_question(&mut rng, min, min - gap, Difficulty::Normal).is_err());
    }
}

#[test]
fn ten_thousand_draws_stay_in_range() {
    let mut rng = Pcg32::seed_from_u64(42);
    for (min, max) in [(2, 5), (6, 8), (9, 10), (11, 12), (2, 12)] {
        for _ in 0..10_000 {
            let q = generate_question(&mut rng, min, max, Difficulty::Normal).unwrap();
            assert!((min..=max).contains(&q.factor_a));
            assert!((1..=12).contains(&q.factor_b));
        }
    }
}
