use rand::Rng;

/// Fisher–Yates over a copy of `items`; the caller's slice is untouched.
pub fn shuffle<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut shuffled = items.to_vec();
    for i in (1..shuffled.len()).rev() {
        let j = rng.random_range(0..=i);
        shuffled.swap(i, j);
    }
    shuffled
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn empty_input_stays_empty() {
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        let out: Vec<u8> = shuffle(&[], &mut rng);
        assert!(out.is_empty());
    }

    #[test]
    fn source_is_not_mutated() {
        let source = vec!["a", "b", "c", "d", "e", "f"];
        let mut rng = ChaCha20Rng::seed_from_u64(99);
        let _ = shuffle(&source, &mut rng);
        assert_eq!(source, vec!["a", "b", "c", "d", "e", "f"]);
    }

    #[test]
    fn same_seed_same_order() {
        let source: Vec<u32> = (0..32).collect();
        let a = shuffle(&source, &mut ChaCha20Rng::seed_from_u64(12345));
        let b = shuffle(&source, &mut ChaCha20Rng::seed_from_u64(12345));
        assert_eq!(a, b);
        let c = shuffle(&source, &mut ChaCha20Rng::seed_from_u64(54321));
        assert_ne!(a, c, "different seeds should produce different orders (high probability)");
    }

    proptest! {
        #[test]
        fn output_is_a_permutation(items in proptest::collection::vec(any::<u16>(), 0..64), seed in any::<u64>()) {
            let mut rng = ChaCha20Rng::seed_from_u64(seed);
            let mut out = shuffle(&items, &mut rng);
            prop_assert_eq!(out.len(), items.len());
            let mut expected = items.clone();
            expected.sort_unstable();
            out.sort_unstable();
            prop_assert_eq!(out, expected);
        }
    }
}
